//! Transaction ID computation with domain-separated hashing.
//!
//! Transaction IDs are computed as: `sha256(domain_separator || canonical_bytes(entry))`
//! where the `tx_id` field is excluded from the hash input.

use crate::{CanonicalizationError, Canonicalizer, Digest, DigestAlg, ValidationError};
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest as Sha2Digest, Sha256};

/// Domain separator for transaction ID computation: `b"ticketry:tx:v1\0"`.
const TX_DOMAIN_SEPARATOR: &[u8] = b"ticketry:tx:v1\0";

/// Computes the transaction ID for a ledger entry.
///
/// Formula: `sha256(domain_separator || canonical_bytes(entry))`
///
/// # Example
///
/// ```rust
/// use ticketry_canonical::{compute_tx_id, Canonicalizer, ProfileId};
/// use serde_json::json;
///
/// let canonicalizer = Canonicalizer::new(ProfileId::parse("ticketry-canonical-v1")?);
/// let entry = json!({"height": 0, "call": {"call": "genesis"}});
///
/// let tx_id = compute_tx_id(&entry, &canonicalizer)?;
/// assert_eq!(tx_id.b64.len(), 43);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Returns [`TxIdError`] if serialization or canonicalization fails.
pub fn compute_tx_id<T: Serialize>(
    entry: &T,
    canonicalizer: &Canonicalizer,
) -> Result<Digest, TxIdError> {
    let mut value: Value =
        serde_json::to_value(entry).map_err(|e| TxIdError::Serialization(e.to_string()))?;

    // Remove tx_id to avoid self-referential hashing
    if let Value::Object(map) = &mut value {
        map.remove("tx_id");
    }

    let bytes = canonicalizer.canonicalize(&value)?;

    let mut hasher = Sha256::new();
    hasher.update(TX_DOMAIN_SEPARATOR);
    hasher.update(&bytes);
    let hash_bytes = hasher.finalize();

    use base64::Engine;
    let b64 = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(hash_bytes);
    Ok(Digest::new(DigestAlg::Sha256, b64)?)
}

/// Error during transaction ID computation.
#[derive(thiserror::Error, Debug)]
pub enum TxIdError {
    /// Serialization failed.
    #[error("serialization failed: {0}")]
    Serialization(String),
    /// Canonicalization failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),
    /// Digest construction failed.
    #[error("digest construction failed: {0}")]
    Digest(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProfileId;
    use serde_json::json;

    fn canonicalizer() -> Canonicalizer {
        Canonicalizer::new(ProfileId::parse("ticketry-canonical-v1").unwrap())
    }

    #[test]
    fn tx_id_ignores_existing_tx_id_field() {
        let c = canonicalizer();
        let bare = json!({"height": 3, "caller": "0x00"});
        let mut stamped = bare.clone();
        stamped["tx_id"] = json!({"alg": "sha-256", "b64": "whatever"});
        assert_eq!(compute_tx_id(&bare, &c).unwrap(), compute_tx_id(&stamped, &c).unwrap());
    }

    #[test]
    fn tx_id_is_order_independent() {
        let c = canonicalizer();
        let a = json!({"a": 1, "b": 2});
        let b = json!({"b": 2, "a": 1});
        assert_eq!(compute_tx_id(&a, &c).unwrap(), compute_tx_id(&b, &c).unwrap());
    }

    #[test]
    fn tx_id_changes_with_content() {
        let c = canonicalizer();
        let a = compute_tx_id(&json!({"height": 1}), &c).unwrap();
        let b = compute_tx_id(&json!({"height": 2}), &c).unwrap();
        assert_ne!(a, b);
    }
}
