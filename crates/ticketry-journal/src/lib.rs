//! Append-only journal format for Ticketry ledger transactions.
//!
//! This crate provides:
//! - Framed, checksummed, append-only storage for transaction entries
//! - Reader/writer APIs with strict and permissive truncation handling
//! - Transaction ID verification for stored entries
//!
//! ## Format
//!
//! A 16-byte header (`TKJ1`, version, flags, reserved) followed by frames.
//! Each frame is a 12-byte header (kind, reserved, payload length, payload
//! checksum) and a UTF-8 JSON payload of at most 1 MiB.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ticketry_journal::{JournalReader, JournalWriter, ReadMode, WriteOptions};
//! use serde_json::json;
//!
//! let mut writer = JournalWriter::open("registry.tkj", WriteOptions::default())?;
//! writer.append_entry(&json!({"height": 0}))?;
//! writer.finish()?;
//!
//! let mut reader = JournalReader::open("registry.tkj", ReadMode::Strict)?;
//! while let Some(entry) = reader.read_entry()? {
//!     println!("{}", entry);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]

/// Transaction entry payload type and helpers.
pub mod entry;
/// Error types for journal operations.
pub mod errors;
/// Frame structure and serialization.
pub mod frame;
/// Journal reader implementation.
pub mod reader;
/// Verification helpers for journal entries.
pub mod verification;
/// Journal writer implementation.
pub mod writer;

pub use entry::{is_valid_entry_structure, TxJson};
pub use errors::JournalError;
pub use frame::{FrameKind, JournalHeader, RecordFrame};
pub use reader::{JournalReader, ReadMode};
pub use verification::verify_tx_id;
pub use writer::{JournalWriter, WriteOptions};
