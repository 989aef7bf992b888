//! Canonical wire primitives for Ticketry registries and ledgers.
//!
//! Identities, fixed-width labels and message digests live here, together with
//! the canonical JSON profile used to derive ledger transaction IDs. Every value
//! that participates in hashing, signing or authorization is defined in this crate.
//!
#![deny(missing_docs)]

/// Canonicalization helpers for deterministic hashing.
pub mod canonicalizer;
/// Digest primitives: transaction digests, Keccak-256 and message hashes.
pub mod digest;
/// Identities, fixed-width labels and other newtypes.
pub mod identifiers;
/// Transaction ID computation.
pub mod tx_id;
/// Validation errors raised by canonical types.
pub mod validation;

pub use canonicalizer::{CanonicalizationError, Canonicalizer};
pub use digest::{keccak256, personal_message_hash, Digest, DigestAlg, Hash32};
pub use identifiers::{Bytes32, Identity, ProfileId, Timestamp};
pub use tx_id::{compute_tx_id, TxIdError};
pub use validation::ValidationError;

/// Canonicalization profile used by every Ticketry ledger.
pub const PROFILE_ID: &str = "ticketry-canonical-v1";
