use crate::engine::errors::StoreError;
use crate::engine::store::native::ColumnData;
use crate::engine::store::record::{
    MAX_RECORD_LEN_BYTES, read_records_file, read_single, write_records_file, write_single,
};
use crate::shared::storage_header::FileKind;
use std::fs::OpenOptions;
use std::io::{Seek, SeekFrom, Write};
use tempfile::tempdir;

#[test]
fn records_file_keeps_order_and_leaves_no_temp_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("rows.bin");
    let rows = vec!["a".to_string(), "b".to_string(), "c".to_string()];

    write_records_file(&path, FileKind::SegmentRows, &rows).expect("write");
    let loaded: Vec<String> = read_records_file(&path, FileKind::SegmentRows).expect("read");

    assert_eq!(loaded, rows);
    assert!(!path.with_extension("tmp").exists());
}

#[test]
fn wrong_file_kind_is_corrupt() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("store.bin");
    write_single(&path, FileKind::StoreManifest, &42u64).expect("write");

    let result = read_single::<u64>(&path, FileKind::SegmentMeta);
    assert!(matches!(result, Err(StoreError::CorruptFile { .. })));
}

#[test]
fn flipped_payload_byte_fails_crc() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("segment.bin");
    write_single(&path, FileKind::SegmentMeta, &"payload".to_string()).expect("write");

    let len = std::fs::metadata(&path).unwrap().len();
    let mut file = OpenOptions::new().write(true).open(&path).unwrap();
    file.seek(SeekFrom::Start(len - 1)).unwrap();
    file.write_all(&[b'X']).unwrap();
    drop(file);

    match read_single::<String>(&path, FileKind::SegmentMeta) {
        Err(StoreError::CorruptFile { reason, .. }) => assert!(reason.contains("CRC")),
        other => panic!("expected CRC failure, got {:?}", other),
    }
}

#[test]
fn single_record_file_with_two_records_is_corrupt() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("segment.bin");
    write_records_file(&path, FileKind::SegmentMeta, &[1u32, 2u32]).expect("write");

    assert!(matches!(
        read_single::<u32>(&path, FileKind::SegmentMeta),
        Err(StoreError::CorruptFile { .. })
    ));
}

#[test]
fn oversized_column_is_refused_at_write_time() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("0.dv");
    let docs = 6_000_000u32;
    let column = ColumnData::Numeric {
        values: vec![7; docs as usize],
        present: (0..docs).collect(),
    };

    match write_single(&path, FileKind::NativeColumn, &column) {
        Err(StoreError::RecordTooLarge { len, max }) => {
            assert_eq!(max, MAX_RECORD_LEN_BYTES);
            assert!(len > max as usize);
        }
        other => panic!("expected RecordTooLarge, got {:?}", other),
    }
    assert!(!path.exists());
    assert!(!path.with_extension("tmp").exists());
}

#[test]
fn record_at_the_limit_reads_back() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("blob.bin");
    // bincode prefixes a Vec<u8> with its u64 length
    let blob = vec![3u8; MAX_RECORD_LEN_BYTES as usize - 8];

    write_single(&path, FileKind::NativeColumn, &blob).expect("write");
    let loaded: Vec<u8> = read_single(&path, FileKind::NativeColumn).expect("read");
    assert_eq!(loaded.len(), blob.len());
}
