//! Ledger configuration.

use ticketry_core::NoncePolicy;
use ticketry_journal::ReadMode;

/// Options for creating or opening a [`Ledger`](crate::Ledger).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgerOptions {
    /// fsync after every appended transaction (default: false).
    pub sync: bool,
    /// How a truncated journal tail is treated on open (default: strict).
    pub read_mode: ReadMode,
    /// Nonce policy written into genesis (default: per-account). Ignored when
    /// opening an existing ledger, whose genesis already fixes the policy.
    pub nonce_policy: NoncePolicy,
}
