use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::records::Role;

/// Registry rejections.
///
/// The `Display` text of each variant is the reason string surfaced to callers
/// and must stay stable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Caller is not the registry administrator.
    #[error("Caller is not admin")]
    NotAdmin,
    /// A null identity was supplied as a registration target.
    #[error("Invalid user address")]
    InvalidIdentity,
    /// The identity already holds a record.
    #[error("{role} already registered")]
    AlreadyRegistered {
        /// Role the rejected registration asked for.
        role: Role,
    },
    /// Signature did not prove the caller's identity, or the caller is unregistered.
    #[error("Login forbidden")]
    LoginForbidden,
    /// A live venue already uses this key.
    #[error("Venue already exists")]
    VenueAlreadyExists,
    /// No live venue uses this key.
    #[error("Venue does not exists")]
    VenueNotFound,
    /// Removal attempted on an empty catalog.
    #[error("Empty list")]
    EmptyList,
}

/// Coarse classification of a [`RegistryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caller lacks the required role or failed identity proof.
    Authorization,
    /// Attempted duplicate creation.
    Uniqueness,
    /// Lookup or removal of an absent key.
    NotFound,
    /// Argument rejected before any state was consulted.
    InvalidArgument,
}

impl RegistryError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            RegistryError::NotAdmin => "NotAdmin",
            RegistryError::InvalidIdentity => "InvalidIdentity",
            RegistryError::AlreadyRegistered { .. } => "AlreadyRegistered",
            RegistryError::LoginForbidden => "LoginForbidden",
            RegistryError::VenueAlreadyExists => "VenueAlreadyExists",
            RegistryError::VenueNotFound => "VenueNotFound",
            RegistryError::EmptyList => "EmptyList",
        }
    }

    /// Taxonomy bucket for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::NotAdmin | RegistryError::LoginForbidden => ErrorKind::Authorization,
            RegistryError::AlreadyRegistered { .. } | RegistryError::VenueAlreadyExists => {
                ErrorKind::Uniqueness
            }
            RegistryError::VenueNotFound => ErrorKind::NotFound,
            RegistryError::InvalidIdentity | RegistryError::EmptyList => {
                ErrorKind::InvalidArgument
            }
        }
    }
}

/// A broken structural invariant, found by an explicit consistency check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Index length differs from the number of live venues.
    #[error("venue index holds {indexed} keys but {live} venues exist")]
    IndexLength {
        /// Keys in the index.
        indexed: usize,
        /// Live venue records.
        live: usize,
    },
    /// Index entry with no live record behind it.
    #[error("venue index references missing venue '{0}'")]
    DanglingKey(String),
    /// Position map disagrees with the key list.
    #[error("venue '{key}' is recorded at position {recorded} but sits at {actual}")]
    PositionMismatch {
        /// Affected key.
        key: String,
        /// Position held in the map.
        recorded: usize,
        /// Position in the key list.
        actual: usize,
    },
}
