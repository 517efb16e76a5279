mod chunk;
mod error;
mod file_store;
mod file_store_i12n;
mod layout;
mod meta;
mod name;
#[cfg(test)]
mod test;

pub use chunk::ChunkHeader;
pub use error::StorageError;
pub use file_store::{FileStore, SharedFileStore};
pub use layout::{
    CHUNK_HEADER_SIZE, CHUNK_SIZE, COLUMN_META_SIZE, DATA_START, Direction, FILE_HEADER_SIZE,
    GROWTH_STEP, INITIAL_FILE_SIZE, METADATA_START, NAME_SIZE, TABLE_META_SIZE, data_cursor,
    metadata_cursor, read_i64, read_u64, set_data_cursor, set_metadata_cursor, write_i64,
    write_u64,
};
pub use meta::{ColumnMeta, TableMeta};
pub use name::Name;
