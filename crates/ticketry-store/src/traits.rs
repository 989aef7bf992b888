//! Storage backend traits.

use crate::error::StoreError;
use crate::TxJson;

/// Append-only sink for transaction entries.
pub trait StoreWriter {
    /// Appends one transaction entry.
    ///
    /// On error nothing is visible to later readers.
    fn append(&mut self, entry: &TxJson) -> Result<(), StoreError>;

    /// Flushes and closes the writer.
    fn finish(self) -> Result<(), StoreError>
    where
        Self: Sized;
}

/// Sequential source of transaction entries.
pub trait StoreReader {
    /// Reads the next entry, or `None` at the end of the store.
    fn read_next(&mut self) -> Result<Option<TxJson>, StoreError>;
}

impl<R: StoreReader + ?Sized> StoreReader for &mut R {
    fn read_next(&mut self) -> Result<Option<TxJson>, StoreError> {
        (**self).read_next()
    }
}

impl<R: StoreReader + ?Sized> StoreReader for Box<R> {
    fn read_next(&mut self) -> Result<Option<TxJson>, StoreError> {
        (**self).read_next()
    }
}
