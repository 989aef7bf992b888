//! Journal-backed execution substrate for the Ticketry registries.
//!
//! This crate provides:
//! - `Ledger`: a single-writer host for `UserRegistry` and `VenueRegistry` that
//!   persists every accepted call as a hash-chained transaction and rebuilds
//!   state by replay
//! - `StoreWriter` and `StoreReader` traits with a journal-backed implementation
//! - Transaction filtering for selective iteration
//! - Typed transaction parsing and view helpers
//!
//! A rejected call leaves both the registries and the journal untouched. The
//! caller identity handed to [`Ledger::submit`] is trusted as authenticated.

#![deny(missing_docs)]

/// Ledger configuration.
pub mod config;
/// Error types for store and ledger operations.
pub mod error;
/// Transaction filtering API.
pub mod filter;
/// Journal-backed storage implementation.
pub mod journal;
/// The ledger itself.
pub mod ledger;
/// Storage backend traits.
pub mod traits;
/// Typed transaction entries and calls.
pub mod transaction;
/// Views over the transaction history.
pub mod view;

pub use config::LedgerOptions;
pub use error::{LedgerError, StoreError};
pub use filter::{
    AndFilter, CallKindFilter, CallerFilter, FilteredReader, HeightRangeFilter, OrFilter,
    TimeRangeFilter, TxFilter, TxIdFilter,
};
pub use journal::{JournalBackendReader, JournalBackendWriter};
pub use ledger::{Ledger, Receipt};
pub use ticketry_journal::{ReadMode, TxJson, WriteOptions};
pub use traits::{StoreReader, StoreWriter};
pub use transaction::{parse_entry, Call, ParseError, TransactionEntry, CALL_KINDS};
pub use view::{registration_of, venue_history};
