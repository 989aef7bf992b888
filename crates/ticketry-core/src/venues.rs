//! Administered venue catalog.

use std::collections::HashMap;

use ticketry_canonical::{Bytes32, Identity};

use crate::errors::{InvariantViolation, RegistryError};
use crate::records::{NewVenue, VenueRecord};
use crate::venue_index::VenueIndex;

/// Catalog of venues, mutable only by the administrator.
///
/// Live venues are kept in a map and mirrored in a [`VenueIndex`] for
/// enumeration. Removing a venue clears its map slot, so the key can be reused.
#[derive(Debug, Clone)]
pub struct VenueRegistry {
    admin: Identity,
    venues: HashMap<Bytes32, VenueRecord>,
    index: VenueIndex,
}

impl VenueRegistry {
    /// Creates an empty catalog administered by `admin`.
    pub fn new(admin: Identity) -> Self {
        Self {
            admin,
            venues: HashMap::new(),
            index: VenueIndex::new(),
        }
    }

    /// The administrator identity.
    pub fn admin(&self) -> Identity {
        self.admin
    }

    /// Adds a venue.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotAdmin`], then [`RegistryError::VenueAlreadyExists`].
    pub fn add_venue(&mut self, caller: Identity, venue: NewVenue) -> Result<(), RegistryError> {
        let name = venue.name;
        if caller != self.admin {
            tracing::debug!(caller = %caller, venue = %name, "venue add rejected: not admin");
            return Err(RegistryError::NotAdmin);
        }
        if self.venue_exists(&name) {
            tracing::debug!(caller = %caller, venue = %name, "venue add rejected: exists");
            return Err(RegistryError::VenueAlreadyExists);
        }
        self.venues.insert(name, VenueRecord::from(venue));
        self.index.push(name);
        tracing::debug!(venue = %name, count = self.index.len(), "venue added");
        Ok(())
    }

    /// Removes a venue by swap-deleting its key from the index.
    ///
    /// # Errors
    ///
    /// Checked in order: [`RegistryError::NotAdmin`], [`RegistryError::EmptyList`],
    /// [`RegistryError::VenueNotFound`].
    pub fn remove_venue(&mut self, caller: Identity, name: &Bytes32) -> Result<(), RegistryError> {
        let result = if caller != self.admin {
            Err(RegistryError::NotAdmin)
        } else if self.index.is_empty() {
            Err(RegistryError::EmptyList)
        } else if !self.venue_exists(name) {
            Err(RegistryError::VenueNotFound)
        } else {
            Ok(())
        };
        if let Err(err) = result {
            tracing::debug!(caller = %caller, venue = %name, reason = err.code(), "venue removal rejected");
            return Err(err);
        }

        let position = self.index.swap_remove(name);
        self.venues.remove(name);
        tracing::debug!(venue = %name, ?position, count = self.index.len(), "venue removed");
        Ok(())
    }

    /// True if a live venue uses `name`.
    pub fn venue_exists(&self, name: &Bytes32) -> bool {
        self.venues
            .get(name)
            .map(|venue| venue.exists)
            .unwrap_or(false)
    }

    /// The live venue stored under `name`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::VenueNotFound`] if no live venue uses `name`.
    pub fn get_venue(&self, name: &Bytes32) -> Result<&VenueRecord, RegistryError> {
        self.venues
            .get(name)
            .filter(|venue| venue.exists)
            .ok_or(RegistryError::VenueNotFound)
    }

    /// Keys of live venues in index order.
    pub fn get_venues(&self) -> &[Bytes32] {
        self.index.as_slice()
    }

    /// Live venue records in index order.
    pub fn venue_records(&self) -> Vec<&VenueRecord> {
        self.index
            .iter()
            .filter_map(|name| self.venues.get(name))
            .collect()
    }

    /// Number of live venues.
    pub fn venue_count(&self) -> usize {
        self.index.len()
    }

    /// Checks that the index mirrors the set of live venues exactly.
    pub fn verify_index(&self) -> Result<(), InvariantViolation> {
        let live = self.venues.values().filter(|venue| venue.exists).count();
        if self.index.len() != live {
            return Err(InvariantViolation::IndexLength {
                indexed: self.index.len(),
                live,
            });
        }
        for name in self.index.iter() {
            if !self.venue_exists(name) {
                return Err(InvariantViolation::DanglingKey(name.to_string()));
            }
        }
        for (name, recorded) in self.index.positions() {
            let actual = self
                .index
                .as_slice()
                .iter()
                .position(|key| key == name)
                .unwrap_or(usize::MAX);
            if actual != recorded {
                return Err(InvariantViolation::PositionMismatch {
                    key: name.to_string(),
                    recorded,
                    actual,
                });
            }
        }
        Ok(())
    }
}
