//! Verification helpers for journal entries.

use crate::entry::TxJson;
use crate::errors::JournalError;
use ticketry_canonical::{compute_tx_id, Canonicalizer, Digest};

/// Verifies an entry against its claimed `tx_id`.
///
/// The entry is canonicalized without its `tx_id` field and rehashed; the
/// result must equal the recorded ID.
pub fn verify_tx_id(entry: &TxJson, canonicalizer: &Canonicalizer) -> Result<bool, JournalError> {
    let claimed = entry
        .get("tx_id")
        .and_then(|v| serde_json::from_value::<Digest>(v.clone()).ok())
        .ok_or_else(|| JournalError::InvalidEntry("missing or invalid tx_id".to_string()))?;

    let computed = compute_tx_id(entry, canonicalizer)
        .map_err(|e| JournalError::InvalidEntry(format!("tx ID computation failed: {}", e)))?;

    Ok(claimed == computed)
}
