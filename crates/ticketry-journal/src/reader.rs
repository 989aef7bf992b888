//! Journal reader implementation.

use crate::entry::TxJson;
use crate::errors::JournalError;
use crate::frame::{FrameKind, JournalHeader, RecordFrame, FRAME_HEADER_SIZE, HEADER_SIZE};
use std::fs::File;
use std::io::{self, BufReader, Read, Seek};
use std::path::Path;

/// Read mode for handling truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// Strict mode: truncated frames are errors.
    #[default]
    Strict,
    /// Permissive mode: truncation is treated as end-of-file.
    Permissive,
}

/// Journal reader for transaction entries.
///
/// Frames are read sequentially; each payload is checked against its frame
/// checksum before it is returned.
///
/// # Example
///
/// ```rust,no_run
/// use ticketry_journal::{JournalReader, ReadMode};
///
/// let mut reader = JournalReader::open("registry.tkj", ReadMode::Strict)?;
/// while let Some(entry) = reader.read_entry()? {
///     println!("tx at height {}", entry["height"]);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct JournalReader {
    file: BufReader<File>,
    mode: ReadMode,
    position: u64,
    len: u64,
}

impl JournalReader {
    /// Opens a journal file and validates its header.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError`](crate::JournalError) if the file cannot be opened
    /// or its header is invalid.
    pub fn open<P: AsRef<Path>>(path: P, mode: ReadMode) -> Result<Self, JournalError> {
        let mut file = File::open(path)?;
        let len = file.metadata()?.len();
        file.seek(io::SeekFrom::Start(0))?;
        let mut header_bytes = [0u8; HEADER_SIZE];
        file.read_exact(&mut header_bytes)
            .map_err(|_| JournalError::InvalidHeader(format!("header too short: {} bytes", len)))?;
        JournalHeader::from_bytes(&header_bytes)?;

        Ok(Self {
            file: BufReader::new(file),
            mode,
            position: HEADER_SIZE as u64,
            len,
        })
    }

    /// Returns the current read position in the file.
    pub fn position(&self) -> u64 {
        self.position
    }

    fn truncated(&self, offset: u64) -> Result<Option<(FrameKind, Vec<u8>)>, JournalError> {
        match self.mode {
            ReadMode::Permissive => {
                tracing::warn!(offset, "journal ends in a truncated frame; ignoring tail");
                Ok(None)
            }
            ReadMode::Strict => Err(JournalError::TruncatedFrame { offset }),
        }
    }

    /// Reads the next frame from the journal.
    ///
    /// Returns `Ok(None)` when end-of-file is reached (or truncation in permissive mode).
    pub fn read_frame(&mut self) -> Result<Option<(FrameKind, Vec<u8>)>, JournalError> {
        if self.position >= self.len {
            return Ok(None);
        }
        let frame_offset = self.position;

        let mut header = [0u8; FRAME_HEADER_SIZE];
        match self.file.read_exact(&mut header) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return self.truncated(frame_offset)
            }
            Err(e) => return Err(e.into()),
        }
        let frame = RecordFrame::from_bytes(&header, frame_offset)?;

        let mut payload = vec![0u8; frame.len as usize];
        match self.file.read_exact(&mut payload) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return self.truncated(frame_offset)
            }
            Err(e) => return Err(e.into()),
        }
        frame.verify(&payload, frame_offset)?;

        self.position += (FRAME_HEADER_SIZE + payload.len()) as u64;
        Ok(Some((frame.kind, payload)))
    }

    /// Reads the next transaction entry, skipping unknown frame kinds.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError`](crate::JournalError) if a frame is invalid or
    /// corrupt, the payload is not JSON, or truncation is found in strict mode.
    pub fn read_entry(&mut self) -> Result<Option<TxJson>, JournalError> {
        loop {
            match self.read_frame()? {
                None => return Ok(None),
                Some((FrameKind::Transaction, payload)) => {
                    let text = std::str::from_utf8(&payload)?;
                    return Ok(Some(serde_json::from_str(text)?));
                }
                Some((FrameKind::Unknown(kind), _)) => {
                    tracing::debug!(kind, offset = self.position, "skipping unknown frame kind");
                    continue;
                }
            }
        }
    }
}

impl Iterator for JournalReader {
    type Item = Result<TxJson, JournalError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_entry().transpose()
    }
}
