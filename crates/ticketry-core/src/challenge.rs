use serde::{Deserialize, Serialize};
use ticketry_canonical::{keccak256, Hash32, Identity};

/// Literal login message, shared with wallet clients.
pub const LOGIN_MESSAGE: &str = "I am signing my one-time nonce";

/// How login messages are bound to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoncePolicy {
    /// Each login must sign [`login_challenge`] for the caller's current nonce,
    /// and a successful login consumes that nonce.
    #[default]
    PerAccount,
    /// Any digest is accepted and nothing is consumed, so a signed message can be
    /// replayed. Kept for clients that sign the bare [`LOGIN_MESSAGE`].
    Static,
}

/// Digest of the bare login message: `keccak256(LOGIN_MESSAGE)`.
pub fn static_login_digest() -> Hash32 {
    keccak256([LOGIN_MESSAGE.as_bytes()])
}

/// Digest an identity must sign to log in with `nonce`:
/// `keccak256(LOGIN_MESSAGE || identity || nonce_be64)`.
pub fn login_challenge(identity: &Identity, nonce: u64) -> Hash32 {
    keccak256([
        LOGIN_MESSAGE.as_bytes(),
        identity.as_bytes().as_slice(),
        nonce.to_be_bytes().as_slice(),
    ])
}
