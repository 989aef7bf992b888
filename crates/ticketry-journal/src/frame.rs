use sha2::{Digest, Sha256};

use crate::errors::JournalError;

/// Journal file magic bytes: `b"TKJ1"`.
pub const MAGIC: &[u8; 4] = b"TKJ1";

/// Current journal format version: `0x0001`.
pub const VERSION: u16 = 0x0001;

/// Header size in bytes.
pub const HEADER_SIZE: usize = 16;

/// Frame header size in bytes.
pub const FRAME_HEADER_SIZE: usize = 12;

/// Maximum payload size: 1 MiB.
pub const MAX_PAYLOAD_SIZE: u32 = 1024 * 1024;

/// Record frame kind: transaction entry.
pub const FRAME_KIND_TRANSACTION: u8 = 0x01;

/// Journal file header (16 bytes).
///
/// Layout: magic (4) | version u16 LE (2) | flags u16 LE (2) | reserved (8).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalHeader {
    /// Format version.
    pub version: u16,
    /// Reserved flags (must be 0).
    pub flags: u16,
}

impl JournalHeader {
    /// Creates a header for the current version.
    pub fn new() -> Self {
        Self {
            version: VERSION,
            flags: 0,
        }
    }

    /// Serializes the header to bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(MAGIC);
        bytes[4..6].copy_from_slice(&self.version.to_le_bytes());
        bytes[6..8].copy_from_slice(&self.flags.to_le_bytes());
        bytes
    }

    /// Deserializes and validates a header.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, JournalError> {
        if bytes.len() < HEADER_SIZE {
            return Err(JournalError::InvalidHeader(format!(
                "header too short: {} bytes",
                bytes.len()
            )));
        }
        if &bytes[0..4] != MAGIC {
            return Err(JournalError::InvalidHeader(format!(
                "invalid magic: {:?}, expected {:?}",
                &bytes[0..4],
                MAGIC
            )));
        }

        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != VERSION {
            return Err(JournalError::InvalidHeader(format!(
                "unsupported version: 0x{:04x}, expected 0x{:04x}",
                version, VERSION
            )));
        }

        let flags = u16::from_le_bytes([bytes[6], bytes[7]]);
        if flags != 0 {
            return Err(JournalError::InvalidHeader(format!(
                "non-zero flags: 0x{:04x}",
                flags
            )));
        }
        if bytes[8..HEADER_SIZE].iter().any(|b| *b != 0) {
            return Err(JournalError::InvalidHeader(
                "non-zero reserved bytes".to_string(),
            ));
        }

        Ok(Self { version, flags })
    }
}

impl Default for JournalHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// Record frame kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// UTF-8 JSON transaction entry.
    Transaction,
    /// Unknown kind, skipped by readers.
    Unknown(u8),
}

impl FrameKind {
    /// Creates a FrameKind from a byte value.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            FRAME_KIND_TRANSACTION => FrameKind::Transaction,
            _ => FrameKind::Unknown(byte),
        }
    }

    /// Returns the byte value for this kind.
    pub fn to_byte(self) -> u8 {
        match self {
            FrameKind::Transaction => FRAME_KIND_TRANSACTION,
            FrameKind::Unknown(b) => b,
        }
    }
}

/// First four bytes of the SHA-256 of `payload`, read little-endian.
pub fn payload_checksum(payload: &[u8]) -> u32 {
    let hash = Sha256::digest(payload);
    u32::from_le_bytes([hash[0], hash[1], hash[2], hash[3]])
}

/// Record frame header (12 bytes).
///
/// Layout: kind (1) | reserved (3) | payload length u32 LE (4) | checksum u32 LE (4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFrame {
    /// Frame kind.
    pub kind: FrameKind,
    /// Payload length in bytes.
    pub len: u32,
    /// Payload checksum, see [`payload_checksum`].
    pub checksum: u32,
}

impl RecordFrame {
    /// Builds the frame header for `payload`.
    pub fn for_payload(kind: FrameKind, payload: &[u8]) -> Result<Self, JournalError> {
        if payload.len() > MAX_PAYLOAD_SIZE as usize {
            return Err(JournalError::PayloadTooLarge {
                size: payload.len(),
                max: MAX_PAYLOAD_SIZE,
            });
        }
        Ok(Self {
            kind,
            len: payload.len() as u32,
            checksum: payload_checksum(payload),
        })
    }

    /// Serializes the frame header to bytes.
    pub fn to_bytes(&self) -> [u8; FRAME_HEADER_SIZE] {
        let mut bytes = [0u8; FRAME_HEADER_SIZE];
        bytes[0] = self.kind.to_byte();
        bytes[4..8].copy_from_slice(&self.len.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.checksum.to_le_bytes());
        bytes
    }

    /// Deserializes a frame header found at `offset`.
    pub fn from_bytes(bytes: &[u8], offset: u64) -> Result<Self, JournalError> {
        if bytes.len() < FRAME_HEADER_SIZE {
            return Err(JournalError::InvalidFrame {
                offset,
                reason: format!("frame header too short: {} bytes", bytes.len()),
            });
        }
        if bytes[1..4] != [0u8; 3] {
            return Err(JournalError::InvalidFrame {
                offset,
                reason: "non-zero reserved bytes".to_string(),
            });
        }

        let len = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        if len > MAX_PAYLOAD_SIZE {
            return Err(JournalError::InvalidFrame {
                offset,
                reason: format!("payload size {} exceeds maximum {}", len, MAX_PAYLOAD_SIZE),
            });
        }
        let checksum = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);

        Ok(Self {
            kind: FrameKind::from_byte(bytes[0]),
            len,
            checksum,
        })
    }

    /// Checks `payload` against the recorded checksum.
    pub fn verify(&self, payload: &[u8], offset: u64) -> Result<(), JournalError> {
        let actual = payload_checksum(payload);
        if actual != self.checksum {
            return Err(JournalError::ChecksumMismatch {
                offset,
                expected: self.checksum,
                actual,
            });
        }
        Ok(())
    }
}
