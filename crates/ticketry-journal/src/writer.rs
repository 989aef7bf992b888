//! Journal writer implementation.

use crate::entry::TxJson;
use crate::errors::JournalError;
use crate::frame::{FrameKind, JournalHeader, RecordFrame, FRAME_HEADER_SIZE, HEADER_SIZE};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, Write};
use std::path::Path;

/// Options for journal writing.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Whether to fsync after each append (default: false).
    pub sync: bool,
    /// Whether to create the file if it doesn't exist (default: true).
    pub create: bool,
    /// Whether to append to an existing file (default: true).
    pub append: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            sync: false,
            create: true,
            append: true,
        }
    }
}

/// Journal writer for append-only transaction storage.
///
/// Each append writes one frame header followed by the JSON payload. A frame
/// is only visible to readers once both parts are on disk; a crash mid-append
/// leaves a truncated tail that [`ReadMode::Permissive`](crate::ReadMode)
/// readers ignore.
///
/// # Example
///
/// ```rust,no_run
/// use ticketry_journal::{JournalWriter, WriteOptions};
/// use serde_json::json;
///
/// let mut writer = JournalWriter::open("registry.tkj", WriteOptions::default())?;
/// writer.append_entry(&json!({"height": 0}))?;
/// writer.finish()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct JournalWriter {
    file: File,
    sync: bool,
    len: u64,
}

impl JournalWriter {
    /// Opens or creates a journal file for writing.
    ///
    /// An empty file gets a fresh header. An existing file must carry a valid
    /// header; it is then appended to, or truncated back to the header when
    /// `options.append` is false.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError`](crate::JournalError) if:
    /// - File cannot be opened/created
    /// - Existing file is not a valid journal
    pub fn open<P: AsRef<Path>>(path: P, options: WriteOptions) -> Result<Self, JournalError> {
        let file = OpenOptions::new()
            .create(options.create)
            .write(true)
            .read(true)
            .open(path)?;

        let mut writer = Self {
            file,
            sync: options.sync,
            len: 0,
        };

        let existing = writer.file.metadata()?.len();
        if existing == 0 {
            writer.write_header()?;
        } else if existing < HEADER_SIZE as u64 {
            return Err(JournalError::FileNotEmpty);
        } else {
            let mut header_bytes = [0u8; HEADER_SIZE];
            writer.file.seek(io::SeekFrom::Start(0))?;
            writer.file.read_exact(&mut header_bytes)?;
            JournalHeader::from_bytes(&header_bytes)?;
            if options.append {
                writer.len = writer.file.seek(io::SeekFrom::End(0))?;
            } else {
                writer.file.set_len(HEADER_SIZE as u64)?;
                writer.len = writer.file.seek(io::SeekFrom::Start(HEADER_SIZE as u64))?;
            }
        }

        Ok(writer)
    }

    fn write_header(&mut self) -> Result<(), JournalError> {
        self.file.write_all(&JournalHeader::new().to_bytes())?;
        self.file.flush()?;
        if self.sync {
            self.file.sync_all()?;
        }
        self.len = HEADER_SIZE as u64;
        Ok(())
    }

    /// Current length of the journal in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// True if the journal holds no frames.
    pub fn is_empty(&self) -> bool {
        self.len <= HEADER_SIZE as u64
    }

    /// Appends a transaction entry.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError`](crate::JournalError) if serialization fails, the
    /// payload is too large, or an I/O error occurs.
    pub fn append_entry(&mut self, entry: &TxJson) -> Result<(), JournalError> {
        let json_bytes = serde_json::to_vec(entry)?;
        self.append_raw(FrameKind::Transaction, &json_bytes)
    }

    /// Appends a raw frame with the given kind and payload.
    ///
    /// If the write or the fsync fails, the file is cut back to its previous
    /// length so a later append does not land behind a torn frame.
    pub fn append_raw(&mut self, kind: FrameKind, payload: &[u8]) -> Result<(), JournalError> {
        let frame = RecordFrame::for_payload(kind, payload)?;

        if let Err(err) = self.write_frame(&frame, payload) {
            tracing::warn!(error = %err, len = self.len, "journal append failed; truncating torn frame");
            self.discard_tail();
            return Err(err.into());
        }

        self.len += (FRAME_HEADER_SIZE + payload.len()) as u64;
        Ok(())
    }

    fn write_frame(&mut self, frame: &RecordFrame, payload: &[u8]) -> io::Result<()> {
        self.file.write_all(&frame.to_bytes())?;
        self.file.write_all(payload)?;
        self.file.flush()?;
        if self.sync {
            self.file.sync_all()?;
        }
        Ok(())
    }

    /// Drops everything past the last committed frame.
    fn discard_tail(&mut self) {
        let _ = self.file.set_len(self.len);
        let _ = self.file.seek(io::SeekFrom::Start(self.len));
    }

    /// Flushes and closes the file.
    pub fn finish(mut self) -> Result<(), JournalError> {
        self.file.flush()?;
        if self.sync {
            self.file.sync_all()?;
        }
        Ok(())
    }
}

impl Drop for JournalWriter {
    fn drop(&mut self) {
        let _ = self.file.flush();
        if self.sync {
            let _ = self.file.sync_all();
        }
    }
}
