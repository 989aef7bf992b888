//! Error types for store and ledger operations.

use thiserror::Error;
use ticketry_canonical::{TxIdError, ValidationError};
use ticketry_core::RegistryError;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Journal backend error.
    #[error("journal error: {0}")]
    Journal(#[from] ticketry_journal::JournalError),
    /// Parse error during transaction parsing.
    #[error("parse error: {0}")]
    Parse(#[from] crate::transaction::ParseError),
    /// Other error.
    #[error("{0}")]
    Other(String),
}

/// Errors raised by [`Ledger`](crate::Ledger).
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The registries refused the call. Nothing was applied or written.
    #[error("{0}")]
    Rejected(#[from] RegistryError),
    /// Storage failure. In-memory state was rolled back.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// A journaled transaction could not be re-applied.
    #[error("replay failed at height {height}: {reason}")]
    Replay {
        /// Height of the offending transaction.
        height: u64,
        /// What went wrong.
        reason: String,
    },
    /// `prev_tx_id` does not name the preceding transaction.
    #[error("hash chain broken at height {height}")]
    ChainBroken {
        /// Height of the offending transaction.
        height: u64,
    },
    /// Stored `tx_id` does not match the entry contents.
    #[error("transaction id mismatch at height {height}")]
    TxIdMismatch {
        /// Height of the offending transaction.
        height: u64,
    },
    /// Journal holds no genesis transaction.
    #[error("ledger is not initialized")]
    NotInitialized,
    /// Journal already holds transactions, or a second genesis was submitted.
    #[error("ledger is already initialized")]
    AlreadyInitialized,
    /// The administrator identity is the null identity.
    #[error("invalid administrator identity")]
    InvalidAdmin,
    /// Transaction ID computation failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] TxIdError),
    /// A generated value failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl LedgerError {
    /// The registry rejection behind this error, if that is what it is.
    pub fn rejection(&self) -> Option<&RegistryError> {
        match self {
            LedgerError::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ticketry_journal::JournalError> for LedgerError {
    fn from(err: ticketry_journal::JournalError) -> Self {
        LedgerError::Store(StoreError::Journal(err))
    }
}
