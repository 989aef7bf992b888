//! Signature recovery for login proofs.

use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ticketry_canonical::{keccak256, personal_message_hash, Hash32, Identity};

/// Recoverable ECDSA signature split into its `(v, r, s)` components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoverableSignature {
    /// Recovery id; `27`/`28` or `0`/`1`.
    pub v: u8,
    /// `r` scalar, big-endian.
    pub r: Hash32,
    /// `s` scalar, big-endian.
    pub s: Hash32,
}

/// Errors raised while recovering or producing a signature.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// `v` is not one of 0, 1, 27 or 28.
    #[error("invalid recovery id {0}")]
    InvalidRecoveryId(u8),
    /// `r` or `s` is zero or out of range.
    #[error("invalid signature scalars")]
    InvalidScalars,
    /// No public key matches the signature and digest.
    #[error("signature is not recoverable")]
    Unrecoverable,
    /// Key material is not a valid secret scalar.
    #[error("invalid signing key")]
    InvalidKey,
    /// Signing failed.
    #[error("signing failed")]
    Signing,
}

/// Recovers the identity that signed a message digest.
pub trait SignatureRecovery {
    /// Returns the identity whose key produced `signature` over `digest`.
    fn recover(
        &self,
        digest: &Hash32,
        signature: &RecoverableSignature,
    ) -> Result<Identity, SignatureError>;
}

/// secp256k1 recovery using the personal-message convention.
///
/// The signed hash is `keccak256("\x19Ethereum Signed Message:\n32" || digest)`
/// and identities are the last 20 bytes of the Keccak-256 of the public key.
#[derive(Debug, Default, Clone, Copy)]
pub struct Secp256k1Recovery;

impl SignatureRecovery for Secp256k1Recovery {
    fn recover(
        &self,
        digest: &Hash32,
        signature: &RecoverableSignature,
    ) -> Result<Identity, SignatureError> {
        let recovery_id = recovery_id(signature.v)?;

        let mut compact = [0u8; 64];
        compact[..32].copy_from_slice(signature.r.as_bytes());
        compact[32..].copy_from_slice(signature.s.as_bytes());
        let signature =
            Signature::from_slice(&compact).map_err(|_| SignatureError::InvalidScalars)?;

        let prehash = personal_message_hash(digest);
        let key = VerifyingKey::recover_from_prehash(prehash.as_bytes(), &signature, recovery_id)
            .map_err(|_| SignatureError::Unrecoverable)?;
        Ok(identity_of(&key))
    }
}

fn recovery_id(v: u8) -> Result<RecoveryId, SignatureError> {
    let byte = match v {
        0 | 1 => v,
        27 | 28 => v - 27,
        other => return Err(SignatureError::InvalidRecoveryId(other)),
    };
    RecoveryId::from_byte(byte).ok_or(SignatureError::InvalidRecoveryId(v))
}

/// Derives the identity of a public key.
pub fn identity_of(key: &VerifyingKey) -> Identity {
    let point = key.as_affine().to_encoded_point(false);
    let hash = keccak256([&point.as_bytes()[1..]]);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash.as_bytes()[12..]);
    Identity::from_bytes(bytes)
}

/// Signs `digest` as a personal message, the way a wallet client would.
pub fn sign_message_digest(
    key: &SigningKey,
    digest: &Hash32,
) -> Result<RecoverableSignature, SignatureError> {
    let prehash = personal_message_hash(digest);
    let (signature, recovery_id) = key
        .sign_prehash_recoverable(prehash.as_bytes())
        .map_err(|_| SignatureError::Signing)?;

    let compact = signature.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&compact[..32]);
    s.copy_from_slice(&compact[32..]);

    Ok(RecoverableSignature {
        v: 27 + recovery_id.to_byte(),
        r: Hash32::from_bytes(r),
        s: Hash32::from_bytes(s),
    })
}

/// Parses a 32-byte secret key.
pub fn signing_key_from_bytes(secret: &[u8]) -> Result<SigningKey, SignatureError> {
    SigningKey::from_slice(secret).map_err(|_| SignatureError::InvalidKey)
}

/// Derives a deterministic signing key from a seed: the secret is `keccak256(seed)`.
pub fn signing_key_from_seed(seed: &[u8]) -> Result<SigningKey, SignatureError> {
    signing_key_from_bytes(keccak256([seed]).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_one() -> SigningKey {
        let mut secret = [0u8; 32];
        secret[31] = 1;
        signing_key_from_bytes(&secret).unwrap()
    }

    #[test]
    fn identity_of_secret_one() {
        let id = identity_of(key_one().verifying_key());
        assert_eq!(id.to_string(), "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf");
    }

    #[test]
    fn sign_then_recover() {
        let key = key_one();
        let digest = keccak256([b"I am signing my one-time nonce".as_slice()]);
        let sig = sign_message_digest(&key, &digest).unwrap();
        assert!(sig.v == 27 || sig.v == 28);
        let recovered = Secp256k1Recovery.recover(&digest, &sig).unwrap();
        assert_eq!(recovered, identity_of(key.verifying_key()));
    }

    #[test]
    fn zero_based_recovery_id_is_accepted() {
        let key = key_one();
        let digest = keccak256([b"payload".as_slice()]);
        let mut sig = sign_message_digest(&key, &digest).unwrap();
        sig.v -= 27;
        let recovered = Secp256k1Recovery.recover(&digest, &sig).unwrap();
        assert_eq!(recovered, identity_of(key.verifying_key()));
    }

    #[test]
    fn different_digest_recovers_different_identity() {
        let key = key_one();
        let signed = keccak256([b"one".as_slice()]);
        let other = keccak256([b"two".as_slice()]);
        let sig = sign_message_digest(&key, &signed).unwrap();
        match Secp256k1Recovery.recover(&other, &sig) {
            Ok(id) => assert_ne!(id, identity_of(key.verifying_key())),
            Err(err) => assert_eq!(err, SignatureError::Unrecoverable),
        }
    }

    #[test]
    fn bad_recovery_id() {
        let sig = RecoverableSignature {
            v: 29,
            r: Hash32::from_bytes([1; 32]),
            s: Hash32::from_bytes([1; 32]),
        };
        assert_eq!(
            Secp256k1Recovery.recover(&Hash32::from_bytes([0; 32]), &sig),
            Err(SignatureError::InvalidRecoveryId(29))
        );
    }

    #[test]
    fn zero_scalars_are_rejected() {
        let sig = RecoverableSignature {
            v: 27,
            r: Hash32::from_bytes([0; 32]),
            s: Hash32::from_bytes([0; 32]),
        };
        assert_eq!(
            Secp256k1Recovery.recover(&Hash32::from_bytes([0; 32]), &sig),
            Err(SignatureError::InvalidScalars)
        );
    }

    #[test]
    fn seeded_keys_are_deterministic() {
        let a = signing_key_from_seed(b"promoter").unwrap();
        let b = signing_key_from_seed(b"promoter").unwrap();
        assert_eq!(
            identity_of(a.verifying_key()),
            identity_of(b.verifying_key())
        );
    }
}
