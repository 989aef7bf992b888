use thiserror::Error;

/// Errors that can occur during journal operations.
#[derive(Error, Debug)]
pub enum JournalError {
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid file header (magic, version, or flags).
    #[error("invalid journal header: {0}")]
    InvalidHeader(String),
    /// Invalid frame structure (reserved bytes or length).
    #[error("invalid frame at offset {offset}: {reason}")]
    InvalidFrame {
        /// Byte offset where the frame starts.
        offset: u64,
        /// Reason for invalidity.
        reason: String,
    },
    /// Payload bytes do not match the checksum recorded in the frame header.
    #[error("checksum mismatch at offset {offset}: expected {expected:08x}, found {actual:08x}")]
    ChecksumMismatch {
        /// Byte offset where the frame starts.
        offset: u64,
        /// Checksum recorded in the frame header.
        expected: u32,
        /// Checksum of the payload as read.
        actual: u32,
    },
    /// Payload exceeds maximum size limit.
    #[error("payload size {size} exceeds maximum {max}")]
    PayloadTooLarge {
        /// Actual payload size.
        size: usize,
        /// Maximum allowed size.
        max: u32,
    },
    /// Invalid UTF-8 in a transaction payload.
    #[error("invalid UTF-8 in transaction payload: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    /// Invalid JSON in a transaction payload (from serde_json).
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
    /// Structurally invalid transaction entry.
    #[error("invalid transaction entry: {0}")]
    InvalidEntry(String),
    /// Existing file is too short to hold a header.
    #[error("file is not empty; cannot initialize header")]
    FileNotEmpty,
    /// Truncated frame detected in strict mode.
    #[error("truncated frame at offset {offset}")]
    TruncatedFrame {
        /// Byte offset where truncation occurred.
        offset: u64,
    },
}
