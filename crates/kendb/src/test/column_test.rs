use bytes::Bytes;
use storage::{
    CHUNK_HEADER_SIZE, CHUNK_SIZE, ChunkHeader, DATA_START, GROWTH_STEP, INITIAL_FILE_SIZE,
    data_cursor,
};

use crate::{Database, DatabaseError, VariablePool};

#[test]
fn test_dimension_mismatch_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut db = Database::open_at(dir.path().join("t_dim.ken")).unwrap();
    let table = db.add_table("tbl", 1).unwrap();
    let column = table.add_column("c", 2).unwrap();

    let err = column.add_vector(0, vec![1.0, 2.0, 3.0]).unwrap_err();
    assert!(matches!(err, DatabaseError::DimensionMismatch { expected: 8, actual: 12 }));

    let err = column.add_vector(0, Bytes::copy_from_slice(&[0u8; 7])).unwrap_err();
    assert!(matches!(err, DatabaseError::DimensionMismatch { expected: 8, actual: 7 }));

    assert_eq!(column.len(), 0);
}

#[test]
fn test_byte_payload_matches_float_payload() {
    let dir = tempfile::tempdir().unwrap();
    let mut db = Database::open_at(dir.path().join("t_bytes.ken")).unwrap();
    let table = db.add_table("tbl", 1).unwrap();
    let column = table.add_column("c", 2).unwrap();

    // The raw-buffer path is what ingestion adapters use: little-endian
    // f32 pairs, 4 bytes per element.
    let raw: &[f32] = &[1.5, -2.0];
    column.add_vector(5, Bytes::copy_from_slice(bytemuck::cast_slice(raw))).unwrap();
    column.add_vector(6, vec![1.5f32, -2.0]).unwrap();

    let mut pool = VariablePool::new();
    column.select(5, 7, "both", &mut pool);
    let entries = column.fetch("both", &pool);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].features, entries[1].features);
    assert_eq!(entries[0].timestamp, 5);
}

#[test]
fn test_chunk_overflow_links_second_chunk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t_d.ken");
    let mut db = Database::open_at(&path).unwrap();
    let table = db.add_table("tbl", 1).unwrap();
    let column = table.add_column("c", 1408).unwrap();

    let entry_size = 8 + 1408 * 4;
    let capacity = (CHUNK_SIZE - CHUNK_HEADER_SIZE) / entry_size;
    let features = vec![0.25f32; 1408];
    for i in 0..capacity + 1 {
        column.add_vector(i, features.clone()).unwrap();
    }
    assert_eq!(column.len(), capacity + 1);

    {
        let store = column.store.read();
        let b = store.bytes();
        let first = ChunkHeader::read(b, DATA_START);
        assert_eq!(first.num_vectors, capacity);
        assert_eq!(first.next_chunk, DATA_START + CHUNK_SIZE);

        let second = ChunkHeader::read(b, DATA_START + CHUNK_SIZE);
        assert_eq!(second.num_vectors, 1);
        assert_eq!(second.next_chunk, 0);

        assert_eq!(data_cursor(b), DATA_START + 2 * CHUNK_SIZE);
    }

    // Reload walks the two-chunk chain and re-checks the entry count.
    db.close().unwrap();
    let db = Database::open_at(&path).unwrap();
    let column = db.get_table_by_name("tbl").unwrap().get_column_by_name("c").unwrap();
    assert_eq!(column.len(), capacity + 1);
}

#[test]
fn test_growth_under_append() {
    let dir = tempfile::tempdir().unwrap();
    let mut db = Database::open_at(dir.path().join("t_e.ken")).unwrap();
    let table = db.add_table("tbl", 5).unwrap();

    // Burn three chunk slots so the fourth column's first chunk is the
    // last chunk of the initial file.
    for idx in 0..3 {
        table.add_column(&format!("pad{idx}"), 4).unwrap();
    }
    let column = table.add_column("tail", 16382).unwrap();

    let entry_size = 8 + 16382 * 4;
    let capacity = (CHUNK_SIZE - CHUNK_HEADER_SIZE) / entry_size;
    for i in 0..capacity {
        column.add_vector(i, vec![1.0f32; 16382]).unwrap();
    }

    // Copied-out data has to stay valid across the remap below.
    let mut pool = VariablePool::new();
    column.select(0, 1, "head", &mut pool);
    let before = column.fetch("head", &pool);
    assert_eq!(before.len(), 1);

    {
        let store = column.store.read();
        assert_eq!(store.len(), INITIAL_FILE_SIZE);
        assert_eq!(data_cursor(store.bytes()), DATA_START + 4 * CHUNK_SIZE);
    }

    // This append overflows into a chunk slot past the end of the file.
    column.add_vector(capacity, vec![2.0f32; 16382]).unwrap();

    {
        let store = column.store.read();
        assert_eq!(store.len(), INITIAL_FILE_SIZE + GROWTH_STEP);
        let tail = ChunkHeader::read(store.bytes(), DATA_START + 4 * CHUNK_SIZE);
        assert_eq!(tail.num_vectors, 1);
        assert_eq!(tail.next_chunk, 0);
        assert_eq!(data_cursor(store.bytes()), DATA_START + 5 * CHUNK_SIZE);
    }

    assert_eq!(column.len(), capacity + 1);
    assert_eq!(column.fetch("head", &pool), before);
}
