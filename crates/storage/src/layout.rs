//! Byte-exact layout of a store file.
//!
//! A store file is a fixed 16 byte header holding the two write cursors, a
//! metadata region of packed table and column records, and a data region of
//! 64 MiB chunks. All integers on disk are little-endian 64-bit.

use tracing::trace;

pub const NAME_SIZE: usize = 64;
/// Name (64) + numColumns (8) + offset (8).
pub const TABLE_META_SIZE: i64 = 80;
/// Name (64) + vectorLength (8) + numVectors (8) + firstChunkOffset (8) + offset (8).
pub const COLUMN_META_SIZE: i64 = 96;
/// nextChunk (8) + numVectors (8).
pub const CHUNK_HEADER_SIZE: i64 = 16;
pub const CHUNK_SIZE: i64 = 64 * 1024 * 1024;
/// Metadata cursor (8) + data cursor (8).
pub const FILE_HEADER_SIZE: i64 = 16;
/// The metadata region starts right after the file header.
pub const METADATA_START: i64 = FILE_HEADER_SIZE;
/// The data region starts 16 MiB in, whatever the metadata region holds.
pub const DATA_START: i64 = 16 * 1024 * 1024;
pub const INITIAL_FILE_SIZE: i64 = DATA_START + 4 * CHUNK_SIZE;
/// Files always grow by four chunks at a time.
pub const GROWTH_STEP: i64 = 4 * CHUNK_SIZE;

const METADATA_CURSOR_OFFSET: i64 = 0;
const DATA_CURSOR_OFFSET: i64 = 8;

/// Direction hint for a cursor update. `Right` advances towards the end of
/// the file, `Left` rewinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

pub fn read_i64(b: &[u8], offset: i64) -> i64 {
    let start = offset as usize;
    i64::from_le_bytes(b[start..start + 8].try_into().unwrap())
}

pub fn write_i64(b: &mut [u8], offset: i64, value: i64) {
    let start = offset as usize;
    b[start..start + 8].copy_from_slice(&value.to_le_bytes());
}

pub fn read_u64(b: &[u8], offset: i64) -> u64 {
    let start = offset as usize;
    u64::from_le_bytes(b[start..start + 8].try_into().unwrap())
}

pub fn write_u64(b: &mut [u8], offset: i64, value: u64) {
    let start = offset as usize;
    b[start..start + 8].copy_from_slice(&value.to_le_bytes());
}

/// Next free byte in the metadata region.
pub fn metadata_cursor(b: &[u8]) -> i64 {
    read_i64(b, METADATA_CURSOR_OFFSET)
}

/// Offset of the next free chunk in the data region.
pub fn data_cursor(b: &[u8]) -> i64 {
    read_i64(b, DATA_CURSOR_OFFSET)
}

pub fn set_metadata_cursor(b: &mut [u8], value: i64, direction: Direction) {
    set_cursor(b, METADATA_CURSOR_OFFSET, value, direction);
}

pub fn set_data_cursor(b: &mut [u8], value: i64, direction: Direction) {
    set_cursor(b, DATA_CURSOR_OFFSET, value, direction);
}

/// Apply a cursor update only when it moves in the requested direction.
/// A stale write from an append path can therefore never rewind a cursor
/// that another code path already pushed further along.
fn set_cursor(b: &mut [u8], offset: i64, value: i64, direction: Direction) {
    let current = read_i64(b, offset);
    let moves = match direction {
        Direction::Right => value > current,
        Direction::Left => value < current,
    };
    if !moves {
        trace!(current, value, ?direction, "ignoring cursor update against its direction");
        return;
    }
    write_i64(b, offset, value);
}
