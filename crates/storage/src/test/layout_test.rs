use crate::layout::{
    COLUMN_META_SIZE, DATA_START, Direction, FILE_HEADER_SIZE, INITIAL_FILE_SIZE, TABLE_META_SIZE,
    data_cursor, metadata_cursor, read_i64, read_u64, set_data_cursor, set_metadata_cursor,
    write_i64, write_u64,
};

#[test]
fn test_layout_constants() {
    assert_eq!(TABLE_META_SIZE, 80);
    assert_eq!(COLUMN_META_SIZE, 96);
    assert_eq!(FILE_HEADER_SIZE, 16);
    assert_eq!(DATA_START, 16 * 1024 * 1024);
    assert_eq!(INITIAL_FILE_SIZE, DATA_START + 4 * 64 * 1024 * 1024);
}

#[test]
fn test_int_codec() {
    let mut buf = [0u8; 32];
    write_i64(&mut buf, 8, -42);
    write_u64(&mut buf, 16, u64::MAX);
    assert_eq!(read_i64(&buf, 8), -42);
    assert_eq!(read_u64(&buf, 16), u64::MAX);
    assert_eq!(&buf[8..12], &[0xd6, 0xff, 0xff, 0xff]); // little-endian on disk
}

#[test]
fn test_cursor_direction_guard() {
    let mut buf = [0u8; 16];

    set_metadata_cursor(&mut buf, 40, Direction::Right);
    assert_eq!(metadata_cursor(&buf), 40);

    // A rightwards update may only advance.
    set_metadata_cursor(&mut buf, 20, Direction::Right);
    assert_eq!(metadata_cursor(&buf), 40);

    // A leftwards update may only rewind.
    set_metadata_cursor(&mut buf, 100, Direction::Left);
    assert_eq!(metadata_cursor(&buf), 40);
    set_metadata_cursor(&mut buf, 20, Direction::Left);
    assert_eq!(metadata_cursor(&buf), 20);
}

#[test]
fn test_cursor_setters_are_idempotent() {
    let mut buf = [0u8; 16];
    set_data_cursor(&mut buf, DATA_START, Direction::Right);
    set_data_cursor(&mut buf, DATA_START, Direction::Right);
    assert_eq!(data_cursor(&buf), DATA_START);
}

#[test]
fn test_cursors_occupy_the_file_header() {
    let mut buf = [0u8; 16];
    set_metadata_cursor(&mut buf, 16, Direction::Right);
    set_data_cursor(&mut buf, DATA_START, Direction::Right);
    assert_eq!(read_i64(&buf, 0), 16);
    assert_eq!(read_i64(&buf, 8), DATA_START);
}
