//! Subcommand implementations.

use std::path::PathBuf;
use thiserror::Error;
use ticketry_canonical::Identity;
use ticketry_core::{RegistryError, SignatureError};
use ticketry_store::{Ledger, LedgerError, LedgerOptions, StoreError};

#[cfg(feature = "dev-tools")]
pub mod keys;
pub mod log;
pub mod query;
pub mod submit;
pub mod verify;

/// Settings shared by every subcommand.
pub struct Context {
    pub journal: PathBuf,
    pub caller: Option<Identity>,
    pub options: LedgerOptions,
    pub json: bool,
}

impl Context {
    /// Opens the ledger named by `--journal`.
    pub fn open(&self) -> Result<Ledger, CliError> {
        Ledger::open(&self.journal, self.options).map_err(|e| match e {
            LedgerError::Store(StoreError::Journal(err)) => CliError::Open {
                path: self.journal.display().to_string(),
                reason: err.to_string(),
            },
            other => CliError::Ledger(other),
        })
    }

    /// The `--caller` identity; required for every state-changing command.
    pub fn caller(&self) -> Result<Identity, CliError> {
        self.caller.ok_or(CliError::MissingCaller)
    }
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to open ledger {path}: {reason}")]
    Open { path: String, reason: String },
    #[error("no caller given; pass --caller or set TICKETRY_CALLER")]
    MissingCaller,
    #[error("{0}")]
    Query(RegistryError),
    #[error("signature error: {0}")]
    Signature(#[from] SignatureError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Invalid(String),
}

impl CliError {
    /// Registry reason string, printed bare on stderr.
    pub fn rejection(&self) -> Option<&RegistryError> {
        match self {
            CliError::Ledger(err) => err.rejection(),
            CliError::Query(err) => Some(err),
            _ => None,
        }
    }
}
