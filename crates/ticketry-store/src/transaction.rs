//! Typed transaction entries and calls.

use crate::TxJson;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ticketry_canonical::{Bytes32, Digest, Hash32, Identity, Timestamp};
use ticketry_core::{NewPromoter, NewUser, NewVenue, NoncePolicy, RecoverableSignature};

/// Every value [`Call::kind`] can return.
pub const CALL_KINDS: [&str; 6] = [
    "genesis",
    "add_user",
    "add_promoter",
    "login",
    "add_venue",
    "remove_venue",
];

/// A state-changing registry entry point, as submitted and as journaled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum Call {
    /// First transaction of every ledger; fixes the administrator and nonce policy.
    Genesis {
        /// Administrator of both registries.
        admin: Identity,
        /// Login nonce policy.
        nonce_policy: NoncePolicy,
    },
    /// Self-registration of the caller.
    AddUser(NewUser),
    /// Administrator registration of a promoter.
    AddPromoter(NewPromoter),
    /// Signature login of the caller.
    Login {
        /// Identity slot named by the client. Recorded, never consulted.
        claimed_slot: u64,
        /// Signature over `digest`.
        signature: RecoverableSignature,
        /// Message digest that was signed.
        digest: Hash32,
    },
    /// Administrator registration of a venue.
    AddVenue(NewVenue),
    /// Administrator removal of a venue.
    RemoveVenue {
        /// Venue key.
        name: Bytes32,
    },
}

impl Call {
    /// Snake-case name of the call, as stored in the `call` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Call::Genesis { .. } => "genesis",
            Call::AddUser(_) => "add_user",
            Call::AddPromoter(_) => "add_promoter",
            Call::Login { .. } => "login",
            Call::AddVenue(_) => "add_venue",
            Call::RemoveVenue { .. } => "remove_venue",
        }
    }

    /// Venue key this call touches, if any.
    pub fn venue_key(&self) -> Option<&Bytes32> {
        match self {
            Call::AddVenue(venue) => Some(&venue.name),
            Call::RemoveVenue { name } => Some(name),
            _ => None,
        }
    }

    /// Identity this call registers, if it is a registration issued by `caller`.
    pub fn registered_identity(&self, caller: &Identity) -> Option<Identity> {
        match self {
            Call::AddUser(_) => Some(*caller),
            Call::AddPromoter(promoter) => Some(promoter.identity),
            _ => None,
        }
    }
}

/// One journaled transaction.
///
/// `tx_id` covers every other field; `prev_tx_id` links to the transaction at
/// `height - 1` and is `None` only for genesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEntry {
    /// Content-derived transaction ID.
    pub tx_id: Digest,
    /// ID of the preceding transaction.
    pub prev_tx_id: Option<Digest>,
    /// Position in the ledger, starting at 0.
    pub height: u64,
    /// Authenticated caller.
    pub caller: Identity,
    /// Wall-clock time of acceptance (RFC 3339, UTC).
    pub recorded_at: Timestamp,
    /// The call that was applied.
    pub call: Call,
}

/// Error that can occur when parsing a transaction entry.
#[derive(Error, Debug)]
pub enum ParseError {
    /// JSON deserialization error.
    #[error("deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Parses a journaled JSON entry into a [`TransactionEntry`].
pub fn parse_entry(json: &TxJson) -> Result<TransactionEntry, ParseError> {
    Ok(TransactionEntry::deserialize(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn call_tag_is_snake_case() {
        let call = Call::RemoveVenue {
            name: Bytes32::parse("Foro Sol").unwrap(),
        };
        let value = serde_json::to_value(&call).unwrap();
        assert_eq!(value, json!({"call": "remove_venue", "name": "Foro Sol"}));
        assert_eq!(call.kind(), "remove_venue");
        assert!(CALL_KINDS.contains(&call.kind()));
    }

    #[test]
    fn genesis_round_trips() {
        let admin = Identity::from_bytes([3; 20]);
        let call = Call::Genesis {
            admin,
            nonce_policy: NoncePolicy::Static,
        };
        let value = serde_json::to_value(&call).unwrap();
        assert_eq!(value["nonce_policy"], "static");
        assert_eq!(serde_json::from_value::<Call>(value).unwrap(), call);
    }

    #[test]
    fn parse_rejects_unknown_call() {
        let entry = json!({
            "tx_id": {"alg": "sha-256", "b64": "A".repeat(43)},
            "prev_tx_id": null,
            "height": 0,
            "caller": "0x0303030303030303030303030303030303030303",
            "recorded_at": "2024-01-01T00:00:00Z",
            "call": {"call": "burn_tickets"}
        });
        assert!(parse_entry(&entry).is_err());
    }
}
