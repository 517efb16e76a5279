use storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The append payload does not match the column's fixed entry size.
    #[error("vector payload of {actual} bytes does not fit a column of {expected} byte vectors")]
    DimensionMismatch { expected: i64, actual: i64 },
    /// Every column slot declared at table creation is already filled.
    #[error("table '{table}' already holds its maximum of {max_columns} columns")]
    CapacityExceeded { table: String, max_columns: i64 },
    /// The metadata region cannot hold another table record.
    #[error("the metadata region is full")]
    MetadataRegionFull,
    #[error(transparent)]
    Storage(#[from] StorageError),
}
