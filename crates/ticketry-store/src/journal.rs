//! Journal-backed storage implementation.

use crate::error::StoreError;
use crate::traits::{StoreReader, StoreWriter};
use crate::TxJson;
use std::path::Path;
use ticketry_journal::{JournalReader, JournalWriter, ReadMode, WriteOptions};

/// [`StoreWriter`] over a journal file.
pub struct JournalBackendWriter {
    inner: JournalWriter,
}

impl JournalBackendWriter {
    /// Opens or creates the journal at `path`.
    pub fn open<P: AsRef<Path>>(path: P, options: WriteOptions) -> Result<Self, StoreError> {
        Ok(Self {
            inner: JournalWriter::open(path, options)?,
        })
    }

    /// True if the journal holds no frames.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl StoreWriter for JournalBackendWriter {
    fn append(&mut self, entry: &TxJson) -> Result<(), StoreError> {
        self.inner.append_entry(entry)?;
        Ok(())
    }

    fn finish(self) -> Result<(), StoreError> {
        self.inner.finish()?;
        Ok(())
    }
}

/// [`StoreReader`] over a journal file.
pub struct JournalBackendReader {
    inner: JournalReader,
}

impl JournalBackendReader {
    /// Opens the journal at `path` for reading.
    pub fn open<P: AsRef<Path>>(path: P, mode: ReadMode) -> Result<Self, StoreError> {
        Ok(Self {
            inner: JournalReader::open(path, mode)?,
        })
    }

    /// Byte offset just past the last frame read.
    pub fn position(&self) -> u64 {
        self.inner.position()
    }
}

impl StoreReader for JournalBackendReader {
    fn read_next(&mut self) -> Result<Option<TxJson>, StoreError> {
        Ok(self.inner.read_entry()?)
    }
}
