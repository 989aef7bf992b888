//! Journal-backed ledger hosting both registries.

use crate::config::LedgerOptions;
use crate::error::{LedgerError, StoreError};
use crate::journal::{JournalBackendReader, JournalBackendWriter};
use crate::traits::{StoreReader, StoreWriter};
use crate::transaction::{parse_entry, Call, TransactionEntry};
use crate::TxJson;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::path::Path;
use ticketry_canonical::{
    compute_tx_id, Bytes32, Canonicalizer, Digest, Hash32, Identity, ProfileId, Timestamp,
    PROFILE_ID,
};
use ticketry_core::{
    InvariantViolation, NoncePolicy, RegistryError, Role, Secp256k1Recovery, UserRecord,
    UserRegistry, VenueRecord, VenueRegistry,
};
use ticketry_journal::frame::HEADER_SIZE;
use ticketry_journal::{verify_tx_id, WriteOptions};

/// Acknowledgement of an accepted call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    /// ID of the journaled transaction.
    pub tx_id: Digest,
    /// Height of the journaled transaction.
    pub height: u64,
    /// Kind of the applied call.
    pub call: &'static str,
}

#[derive(Serialize)]
struct EntryBody<'a> {
    prev_tx_id: &'a Option<Digest>,
    height: u64,
    caller: Identity,
    recorded_at: &'a Timestamp,
    call: &'a Call,
}

/// Single-writer host for the user and venue registries.
///
/// Every accepted call is appended to the store as a transaction whose
/// `prev_tx_id` names its predecessor. Calls are applied in memory first; if
/// the append fails, the registries are restored to their state before the
/// call.
pub struct Ledger<W = JournalBackendWriter> {
    users: UserRegistry,
    venues: VenueRegistry,
    writer: W,
    head: Option<Digest>,
    next_height: u64,
    canonicalizer: Canonicalizer,
    recovery: Secp256k1Recovery,
}

fn canonicalizer() -> Result<Canonicalizer, LedgerError> {
    Ok(Canonicalizer::new(ProfileId::parse(PROFILE_ID)?))
}

fn now() -> Result<Timestamp, LedgerError> {
    Ok(Timestamp::parse(
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    )?)
}

impl Ledger<JournalBackendWriter> {
    /// Creates a ledger file at `path` and writes its genesis transaction.
    ///
    /// # Errors
    ///
    /// [`LedgerError::AlreadyInitialized`] if `path` already holds transactions,
    /// [`LedgerError::InvalidAdmin`] for the null identity.
    pub fn create<P: AsRef<Path>>(
        path: P,
        admin: Identity,
        options: LedgerOptions,
    ) -> Result<Self, LedgerError> {
        let path = path.as_ref();
        if admin.is_zero() {
            return Err(LedgerError::InvalidAdmin);
        }
        // A bare header holds no transactions and can still take a genesis.
        if fs::metadata(path).map(|m| m.len() > HEADER_SIZE as u64).unwrap_or(false) {
            return Err(LedgerError::AlreadyInitialized);
        }
        let writer = JournalBackendWriter::open(
            path,
            WriteOptions {
                sync: options.sync,
                ..WriteOptions::default()
            },
        )?;
        let ledger = Self::genesis(writer, admin, options.nonce_policy)?;
        tracing::info!(path = %path.display(), admin = %admin, "ledger created");
        Ok(ledger)
    }

    /// Opens an existing ledger file and rebuilds state by replay.
    ///
    /// With [`ReadMode::Permissive`](crate::ReadMode::Permissive) a truncated
    /// tail is cut off before the writer reopens the file.
    pub fn open<P: AsRef<Path>>(path: P, options: LedgerOptions) -> Result<Self, LedgerError> {
        let path = path.as_ref();
        let mut reader = JournalBackendReader::open(path, options.read_mode)?;
        let state = replay_state(&mut reader)?;

        let len = fs::metadata(path).map_err(StoreError::from)?.len();
        if reader.position() < len {
            tracing::warn!(
                path = %path.display(),
                valid = reader.position(),
                len,
                "discarding truncated journal tail"
            );
            OpenOptions::new()
                .write(true)
                .open(path)
                .and_then(|file| file.set_len(reader.position()))
                .map_err(StoreError::from)?;
        }

        let writer = JournalBackendWriter::open(
            path,
            WriteOptions {
                sync: options.sync,
                create: false,
                append: true,
            },
        )?;
        let ledger = state.into_ledger(writer)?;
        if ledger.nonce_policy() != options.nonce_policy {
            tracing::warn!(
                requested = ?options.nonce_policy,
                recorded = ?ledger.nonce_policy(),
                "ignoring nonce policy option; genesis fixes the policy"
            );
        }
        tracing::info!(
            path = %path.display(),
            height = ledger.next_height,
            users = ledger.users.len(),
            venues = ledger.venues.venue_count(),
            "ledger opened"
        );
        Ok(ledger)
    }
}

/// Registry state rebuilt from a transaction stream.
struct ReplayState {
    users: UserRegistry,
    venues: VenueRegistry,
    head: Option<Digest>,
    next_height: u64,
    canonicalizer: Canonicalizer,
}

impl ReplayState {
    fn into_ledger<W: StoreWriter>(self, writer: W) -> Result<Ledger<W>, LedgerError> {
        Ok(Ledger {
            users: self.users,
            venues: self.venues,
            writer,
            head: self.head,
            next_height: self.next_height,
            canonicalizer: self.canonicalizer,
            recovery: Secp256k1Recovery,
        })
    }
}

fn replay_state<R: StoreReader>(reader: &mut R) -> Result<ReplayState, LedgerError> {
    let canonicalizer = canonicalizer()?;
    let recovery = Secp256k1Recovery;
    let mut state: Option<(UserRegistry, VenueRegistry)> = None;
    let mut head: Option<Digest> = None;
    let mut next_height = 0u64;

    while let Some(json) = reader.read_next()? {
        let height = next_height;
        if !verify_tx_id(&json, &canonicalizer)? {
            return Err(LedgerError::TxIdMismatch { height });
        }
        let entry = parse_entry(&json).map_err(|err| LedgerError::Replay {
            height,
            reason: err.to_string(),
        })?;
        if entry.height != height {
            return Err(LedgerError::Replay {
                height,
                reason: format!("entry claims height {}", entry.height),
            });
        }
        if entry.prev_tx_id != head {
            return Err(LedgerError::ChainBroken { height });
        }

        if let Call::Genesis { admin, nonce_policy } = &entry.call {
            if state.is_some() {
                return Err(LedgerError::Replay {
                    height,
                    reason: "second genesis".to_string(),
                });
            }
            if admin.is_zero() {
                return Err(LedgerError::Replay {
                    height,
                    reason: "genesis names the null identity as administrator".to_string(),
                });
            }
            state = Some((
                UserRegistry::with_nonce_policy(*admin, *nonce_policy),
                VenueRegistry::new(*admin),
            ));
        } else {
            let Some((users, venues)) = state.as_mut() else {
                return Err(LedgerError::NotInitialized);
            };
            apply(users, venues, &recovery, entry.caller, &entry.call).map_err(|err| {
                LedgerError::Replay {
                    height,
                    reason: err.to_string(),
                }
            })?;
        }

        head = Some(entry.tx_id);
        next_height += 1;
    }

    let (users, venues) = state.ok_or(LedgerError::NotInitialized)?;
    tracing::info!(transactions = next_height, "journal replayed");
    Ok(ReplayState {
        users,
        venues,
        head,
        next_height,
        canonicalizer,
    })
}

/// Applies a non-genesis call to the registries.
fn apply(
    users: &mut UserRegistry,
    venues: &mut VenueRegistry,
    recovery: &Secp256k1Recovery,
    caller: Identity,
    call: &Call,
) -> Result<(), RegistryError> {
    match call {
        Call::Genesis { .. } => Ok(()),
        Call::AddUser(user) => users.add_user(caller, user.clone()),
        Call::AddPromoter(promoter) => users.add_promoter(caller, promoter.clone()),
        Call::Login {
            claimed_slot,
            signature,
            digest,
        } => users
            .login(caller, *claimed_slot, signature, digest, recovery)
            .map(|_| ()),
        Call::AddVenue(venue) => venues.add_venue(caller, venue.clone()),
        Call::RemoveVenue { name } => venues.remove_venue(caller, name),
    }
}

impl<W: StoreWriter> Ledger<W> {
    /// Starts a ledger on an empty store by writing its genesis transaction.
    pub fn genesis(
        writer: W,
        admin: Identity,
        nonce_policy: NoncePolicy,
    ) -> Result<Self, LedgerError> {
        if admin.is_zero() {
            return Err(LedgerError::InvalidAdmin);
        }
        let mut ledger = Self {
            users: UserRegistry::with_nonce_policy(admin, nonce_policy),
            venues: VenueRegistry::new(admin),
            writer,
            head: None,
            next_height: 0,
            canonicalizer: canonicalizer()?,
            recovery: Secp256k1Recovery,
        };
        ledger.append(
            admin,
            Call::Genesis {
                admin,
                nonce_policy,
            },
        )?;
        Ok(ledger)
    }

    /// Rebuilds a ledger from `reader` and continues writing to `writer`.
    ///
    /// `writer` must append to the same store `reader` was drained from.
    pub fn replay<R: StoreReader>(reader: &mut R, writer: W) -> Result<Self, LedgerError> {
        replay_state(reader)?.into_ledger(writer)
    }

    /// Applies `call` on behalf of `caller` and journals it.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Rejected`] when a registry refuses the call; nothing is
    /// written. A storage error after a successful apply rolls the registries
    /// back before it is returned.
    pub fn submit(&mut self, caller: Identity, call: Call) -> Result<Receipt, LedgerError> {
        if matches!(call, Call::Genesis { .. }) {
            return Err(LedgerError::AlreadyInitialized);
        }

        let snapshot = (self.users.clone(), self.venues.clone());
        if let Err(err) = apply(
            &mut self.users,
            &mut self.venues,
            &self.recovery,
            caller,
            &call,
        ) {
            tracing::debug!(caller = %caller, call = call.kind(), reason = %err, "call rejected");
            return Err(err.into());
        }

        match self.append(caller, call) {
            Ok(receipt) => Ok(receipt),
            Err(err) => {
                tracing::warn!(caller = %caller, error = %err, "journal append failed; rolling back");
                (self.users, self.venues) = snapshot;
                Err(err)
            }
        }
    }

    fn append(&mut self, caller: Identity, call: Call) -> Result<Receipt, LedgerError> {
        let recorded_at = now()?;
        let body = EntryBody {
            prev_tx_id: &self.head,
            height: self.next_height,
            caller,
            recorded_at: &recorded_at,
            call: &call,
        };
        let tx_id = compute_tx_id(&body, &self.canonicalizer)?;
        let entry = TransactionEntry {
            tx_id: tx_id.clone(),
            prev_tx_id: self.head.clone(),
            height: self.next_height,
            caller,
            recorded_at,
            call,
        };
        let json: TxJson = serde_json::to_value(&entry)
            .map_err(|err| StoreError::Other(format!("cannot encode transaction: {}", err)))?;
        self.writer.append(&json)?;

        let receipt = Receipt {
            tx_id: tx_id.clone(),
            height: self.next_height,
            call: entry.call.kind(),
        };
        tracing::debug!(height = receipt.height, tx_id = %tx_id, call = receipt.call, "transaction appended");
        self.head = Some(tx_id);
        self.next_height += 1;
        Ok(receipt)
    }

    /// Flushes and closes the underlying writer.
    pub fn close(self) -> Result<(), LedgerError> {
        self.writer.finish()?;
        Ok(())
    }

    /// The user registry.
    pub fn users(&self) -> &UserRegistry {
        &self.users
    }

    /// The venue registry.
    pub fn venues(&self) -> &VenueRegistry {
        &self.venues
    }

    /// Administrator of both registries.
    pub fn admin(&self) -> Identity {
        self.users.admin()
    }

    /// Nonce policy fixed at genesis.
    pub fn nonce_policy(&self) -> NoncePolicy {
        self.users.nonce_policy()
    }

    /// Number of journaled transactions, genesis included.
    pub fn height(&self) -> u64 {
        self.next_height
    }

    /// ID of the latest transaction.
    pub fn head(&self) -> Option<&Digest> {
        self.head.as_ref()
    }

    /// True if `identity` holds a user record.
    pub fn user_exists(&self, identity: &Identity) -> bool {
        self.users.user_exists(identity)
    }

    /// True if `identity` holds a promoter record.
    pub fn promoter_exists(&self, identity: &Identity) -> bool {
        self.users.promoter_exists(identity)
    }

    /// Record held by `identity`.
    pub fn get_user(&self, identity: &Identity) -> Option<&UserRecord> {
        self.users.get_user(identity)
    }

    /// Role held by `identity`.
    pub fn role_of(&self, identity: &Identity) -> Option<Role> {
        self.users.role_of(identity)
    }

    /// Digest `identity` must sign for its next login.
    pub fn login_challenge(&self, identity: &Identity) -> Option<Hash32> {
        self.users.login_challenge(identity)
    }

    /// True if a live venue uses `name`.
    pub fn venue_exists(&self, name: &Bytes32) -> bool {
        self.venues.venue_exists(name)
    }

    /// Live venue stored under `name`.
    pub fn get_venue(&self, name: &Bytes32) -> Result<&VenueRecord, RegistryError> {
        self.venues.get_venue(name)
    }

    /// Live venue keys in index order.
    pub fn get_venues(&self) -> &[Bytes32] {
        self.venues.get_venues()
    }

    /// Live venue records in index order.
    pub fn venue_records(&self) -> Vec<&VenueRecord> {
        self.venues.venue_records()
    }

    /// Number of live venues.
    pub fn venue_count(&self) -> usize {
        self.venues.venue_count()
    }

    /// Checks the venue index against the venue map.
    pub fn verify_index(&self) -> Result<(), InvariantViolation> {
        self.venues.verify_index()
    }
}
