use crate::layout::{COLUMN_META_SIZE, NAME_SIZE, TABLE_META_SIZE, read_i64, write_i64};
use crate::name::Name;

/// Table record in the metadata region. The record is immediately followed
/// by `num_columns` reserved column record slots.
#[derive(Clone, Copy, Debug)]
pub struct TableMeta {
    pub name: Name,
    pub num_columns: i64,
    /// Self-position in the metadata region.
    pub offset: i64,
}

impl TableMeta {
    pub const SIZE: i64 = TABLE_META_SIZE;

    const FIELD_NUM_COLUMNS_OFFSET: i64 = NAME_SIZE as i64;
    const FIELD_OFFSET_OFFSET: i64 = NAME_SIZE as i64 + 8;

    pub fn read(b: &[u8], offset: i64) -> Self {
        Self {
            name: Name::read(b, offset),
            num_columns: read_i64(b, offset + Self::FIELD_NUM_COLUMNS_OFFSET),
            offset,
        }
    }

    /// Persist the record at its own `offset`.
    pub fn write_to(&self, b: &mut [u8]) {
        self.name.write_to(b, self.offset);
        write_i64(b, self.offset + Self::FIELD_NUM_COLUMNS_OFFSET, self.num_columns);
        write_i64(b, self.offset + Self::FIELD_OFFSET_OFFSET, self.offset);
    }
}

/// Column record in the metadata region.
#[derive(Clone, Copy, Debug)]
pub struct ColumnMeta {
    pub name: Name,
    /// Element count of every vector in the column, not a byte size.
    pub vector_length: i64,
    /// Total entries across the whole chunk chain.
    pub num_vectors: i64,
    /// Absolute offset of the first chunk in the data region.
    pub first_chunk_offset: i64,
    /// Self-position in the metadata region.
    pub offset: i64,
}

impl ColumnMeta {
    pub const SIZE: i64 = COLUMN_META_SIZE;

    const FIELD_VECTOR_LENGTH_OFFSET: i64 = NAME_SIZE as i64;
    const FIELD_NUM_VECTORS_OFFSET: i64 = NAME_SIZE as i64 + 8;
    const FIELD_FIRST_CHUNK_OFFSET: i64 = NAME_SIZE as i64 + 16;
    const FIELD_OFFSET_OFFSET: i64 = NAME_SIZE as i64 + 24;

    pub fn read(b: &[u8], offset: i64) -> Self {
        Self {
            name: Name::read(b, offset),
            vector_length: read_i64(b, offset + Self::FIELD_VECTOR_LENGTH_OFFSET),
            num_vectors: read_i64(b, offset + Self::FIELD_NUM_VECTORS_OFFSET),
            first_chunk_offset: read_i64(b, offset + Self::FIELD_FIRST_CHUNK_OFFSET),
            offset,
        }
    }

    /// Persist the record at its own `offset`.
    pub fn write_to(&self, b: &mut [u8]) {
        self.name.write_to(b, self.offset);
        write_i64(b, self.offset + Self::FIELD_VECTOR_LENGTH_OFFSET, self.vector_length);
        write_i64(b, self.offset + Self::FIELD_NUM_VECTORS_OFFSET, self.num_vectors);
        write_i64(b, self.offset + Self::FIELD_FIRST_CHUNK_OFFSET, self.first_chunk_offset);
        write_i64(b, self.offset + Self::FIELD_OFFSET_OFFSET, self.offset);
    }
}
