//! Views over the transaction history.
//!
//! Both views scan the reader sequentially; there is no secondary index.

use crate::error::StoreError;
use crate::traits::StoreReader;
use crate::transaction::{parse_entry, TransactionEntry};
use ticketry_canonical::{Bytes32, Identity};

/// Collects every transaction that added or removed the venue `name`, oldest first.
///
/// Only accepted calls are journaled, so the result alternates between
/// additions and removals.
pub fn venue_history<R: StoreReader>(
    reader: &mut R,
    name: &Bytes32,
) -> Result<Vec<TransactionEntry>, StoreError> {
    let mut history = Vec::new();
    while let Some(json) = reader.read_next()? {
        let entry = parse_entry(&json)?;
        if entry.call.venue_key() == Some(name) {
            history.push(entry);
        }
    }
    Ok(history)
}

/// Finds the transaction that registered `identity` as a user or promoter.
///
/// Returns `None` if the identity was never registered.
pub fn registration_of<R: StoreReader>(
    reader: &mut R,
    identity: &Identity,
) -> Result<Option<TransactionEntry>, StoreError> {
    while let Some(json) = reader.read_next()? {
        let entry = parse_entry(&json)?;
        if entry.call.registered_identity(&entry.caller).as_ref() == Some(identity) {
            return Ok(Some(entry));
        }
    }
    Ok(None)
}
