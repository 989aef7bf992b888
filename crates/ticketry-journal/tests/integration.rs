use serde_json::json;
use std::fs;
use tempfile::TempDir;
use ticketry_journal::{JournalError, JournalReader, JournalWriter, ReadMode, TxJson, WriteOptions};

fn make_entry(height: u64) -> TxJson {
    json!({
        "tx_id": { "alg": "sha-256", "b64": format!("tx{}", height) },
        "height": height,
        "caller": "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf",
        "recorded_at": "2024-01-01T00:00:00Z",
        "call": { "call": "remove_venue", "name": "Foro Sol" }
    })
}

#[test]
fn test_write_read_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.tkj");

    {
        let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
        writer.append_entry(&make_entry(0)).unwrap();
        writer.append_entry(&make_entry(1)).unwrap();
        writer.finish().unwrap();
    }

    let mut reader = JournalReader::open(&journal_path, ReadMode::Strict).unwrap();
    assert_eq!(reader.read_entry().unwrap().unwrap()["height"], 0);
    assert_eq!(reader.read_entry().unwrap().unwrap()["height"], 1);
    assert!(reader.read_entry().unwrap().is_none());
}

#[test]
fn test_append_to_existing() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.tkj");

    {
        let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
        writer.append_entry(&make_entry(0)).unwrap();
    }
    {
        let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
        assert!(!writer.is_empty());
        writer.append_entry(&make_entry(1)).unwrap();
    }

    let heights: Vec<u64> = JournalReader::open(&journal_path, ReadMode::Strict)
        .unwrap()
        .map(|entry| entry.unwrap()["height"].as_u64().unwrap())
        .collect();
    assert_eq!(heights, vec![0, 1]);
}

#[test]
fn test_truncate_on_open_without_append() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.tkj");

    {
        let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
        writer.append_entry(&make_entry(0)).unwrap();
    }
    {
        let options = WriteOptions {
            append: false,
            ..WriteOptions::default()
        };
        let mut writer = JournalWriter::open(&journal_path, options).unwrap();
        assert!(writer.is_empty());
        writer.append_entry(&make_entry(5)).unwrap();
    }

    let entries: Vec<TxJson> = JournalReader::open(&journal_path, ReadMode::Strict)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["height"], 5);
}

#[test]
fn test_sync_option() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.tkj");

    let options = WriteOptions {
        sync: true,
        ..WriteOptions::default()
    };
    let mut writer = JournalWriter::open(&journal_path, options).unwrap();
    writer.append_entry(&make_entry(0)).unwrap();
    writer.finish().unwrap();

    let mut reader = JournalReader::open(&journal_path, ReadMode::Strict).unwrap();
    assert_eq!(reader.read_entry().unwrap().unwrap()["height"], 0);
}

#[test]
fn test_writer_len_tracks_frames() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.tkj");

    let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
    assert_eq!(writer.len(), 16);
    writer.append_entry(&make_entry(0)).unwrap();
    let expected = 16 + 12 + serde_json::to_vec(&make_entry(0)).unwrap().len() as u64;
    assert_eq!(writer.len(), expected);
    writer.finish().unwrap();
    assert_eq!(fs::metadata(&journal_path).unwrap().len(), expected);
}

#[test]
fn test_empty_journal_reads_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.tkj");
    JournalWriter::open(&journal_path, WriteOptions::default())
        .unwrap()
        .finish()
        .unwrap();

    let mut reader = JournalReader::open(&journal_path, ReadMode::Strict).unwrap();
    assert!(reader.read_entry().unwrap().is_none());
    assert_eq!(reader.position(), 16);
}

#[test]
fn test_open_rejects_foreign_file() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.tkj");
    fs::write(&journal_path, b"NRJ1\x01\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00").unwrap();

    assert!(matches!(
        JournalReader::open(&journal_path, ReadMode::Strict),
        Err(JournalError::InvalidHeader(_))
    ));
    assert!(matches!(
        JournalWriter::open(&journal_path, WriteOptions::default()),
        Err(JournalError::InvalidHeader(_))
    ));
}

#[test]
fn test_writer_rejects_short_file() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.tkj");
    fs::write(&journal_path, b"TKJ1").unwrap();

    assert!(matches!(
        JournalWriter::open(&journal_path, WriteOptions::default()),
        Err(JournalError::FileNotEmpty)
    ));
}
