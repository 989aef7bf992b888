use serde_json::Value;

/// Transaction entry payload as stored in the journal.
///
/// Entries are kept as raw JSON here; typed parsing and replay happen in
/// `ticketry-store`.
pub type TxJson = Value;

/// Top-level fields every transaction entry carries.
pub const REQUIRED_FIELDS: [&str; 5] = ["tx_id", "height", "caller", "recorded_at", "call"];

/// Basic structural check: an object with every field in [`REQUIRED_FIELDS`].
pub fn is_valid_entry_structure(value: &TxJson) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    REQUIRED_FIELDS.iter().all(|field| obj.contains_key(*field))
}
