//! Authenticated registries for Ticketry.
//!
//! This crate provides:
//! - `UserRegistry`: write-once user and promoter records keyed by identity,
//!   with signature challenge-response login
//! - `VenueRegistry`: an administrator-gated venue catalog with an enumerable
//!   swap-delete index
//! - The `SignatureRecovery` seam and its secp256k1 implementation
//!
//! Core invariants:
//! - At most one record per identity; records are never edited or deleted
//! - Exactly one administrator per registry, fixed at construction
//! - The venue index holds exactly the keys of live venues, without duplicates
//! - Every call either applies completely or returns an error with state untouched
//!
//! The registries are plain in-memory state machines. The caller identity of
//! every call is supplied by whatever hosts them and is trusted as given.
//!
#![deny(missing_docs)]

/// Login message and nonce challenges.
pub mod challenge;
/// Error types for registry operations.
pub mod errors;
/// Record and argument types.
pub mod records;
/// Signature recovery.
pub mod signature;
/// User and promoter registry.
pub mod users;
/// Swap-delete key index.
pub mod venue_index;
/// Venue catalog.
pub mod venues;

pub use challenge::{login_challenge, static_login_digest, NoncePolicy, LOGIN_MESSAGE};
pub use errors::{ErrorKind, InvariantViolation, RegistryError};
pub use records::{NewPromoter, NewUser, NewVenue, Role, UserRecord, VenueRecord};
pub use signature::{
    identity_of, sign_message_digest, signing_key_from_bytes, signing_key_from_seed,
    RecoverableSignature, Secp256k1Recovery, SignatureError, SignatureRecovery,
};
pub use users::UserRegistry;
pub use venue_index::VenueIndex;
pub use venues::VenueRegistry;

/// Re-exported so callers can hold keys without depending on `k256` directly.
pub use k256::ecdsa::{SigningKey, VerifyingKey};
