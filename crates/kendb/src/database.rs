use std::fs;
use std::path::Path;

use storage::{
    CHUNK_SIZE, ChunkHeader, ColumnMeta, DATA_START, Direction, FILE_HEADER_SIZE, FileStore,
    INITIAL_FILE_SIZE, METADATA_START, Name, SharedFileStore, StorageError, TableMeta, data_cursor,
    metadata_cursor, set_data_cursor, set_metadata_cursor,
};
use tracing::error;

use crate::column::Column;
use crate::error::DatabaseError;
use crate::table::Table;

/// Handle to one store file and the tables loaded from it. A database is
/// created or opened with [`Database::init`] and must be closed with
/// [`Database::close`] to flush the mapping.
#[derive(Debug)]
pub struct Database {
    pub(crate) store: SharedFileStore,
    pub(crate) tables: Vec<Table>,
}

impl Database {
    /// Open or create `resources/{name}.ken` relative to the working
    /// directory.
    pub fn init(name: &str) -> Result<Self, DatabaseError> {
        let dir = Path::new("resources");
        fs::create_dir_all(dir).map_err(StorageError::from)?;
        Self::open_at(dir.join(format!("{name}.ken")))
    }

    /// Open or create a store file at an explicit path.
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self, DatabaseError> {
        let path = path.as_ref();
        let store = match FileStore::open(path, INITIAL_FILE_SIZE) {
            Ok(store) => store,
            Err(err) => {
                error!(path = %path.display(), %err, "failed to open store file");
                return Err(err.into());
            }
        };
        if store.len() < FILE_HEADER_SIZE {
            return Err(corrupt(format!(
                "file is shorter than the {FILE_HEADER_SIZE} byte header"
            )));
        }

        let store = store.into_shared();
        let mut guard = store.write();

        if metadata_cursor(guard.bytes()) == 0 {
            // Brand new file: stake out the two regions and start empty.
            let b = guard.bytes_mut();
            set_metadata_cursor(b, METADATA_START, Direction::Right);
            set_data_cursor(b, DATA_START, Direction::Right);
            drop(guard);
            return Ok(Database { store, tables: Vec::new() });
        }

        let tables = load_tables(&store, guard.bytes())?;
        drop(guard);
        Ok(Database { store, tables })
    }

    /// Write a table record at the metadata cursor and reserve its column
    /// slots right behind it.
    pub fn add_table(&mut self, name: &str, num_columns: i64) -> Result<&mut Table, DatabaseError> {
        let mut store = self.store.write();
        let b = store.bytes_mut();

        let cursor = metadata_cursor(b);
        let record_size = TableMeta::SIZE + num_columns * ColumnMeta::SIZE;
        if cursor + record_size > DATA_START {
            return Err(DatabaseError::MetadataRegionFull);
        }

        let meta = TableMeta { name: Name::new(name), num_columns, offset: cursor };
        meta.write_to(b);
        set_metadata_cursor(b, cursor + record_size, Direction::Right);
        drop(store);

        self.tables.push(Table { meta, columns: Vec::new(), store: self.store.clone() });
        Ok(self.tables.last_mut().unwrap())
    }

    pub fn get_table_by_name(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name() == name)
    }

    pub fn get_table_by_name_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.iter_mut().find(|table| table.name() == name)
    }

    pub fn list_table_names(&self) -> Vec<String> {
        self.tables.iter().map(|table| table.name()).collect()
    }

    /// Flush the mapping to disk and drop the handle. The file is unmapped
    /// when the last clone of the shared store goes away.
    pub fn close(self) -> Result<(), DatabaseError> {
        self.store.read().flush()?;
        Ok(())
    }
}

/// Materialize every table and its created columns by walking the metadata
/// region from its start to the metadata cursor.
fn load_tables(store: &SharedFileStore, b: &[u8]) -> Result<Vec<Table>, DatabaseError> {
    let file_len = b.len() as i64;

    let cursor = metadata_cursor(b);
    if cursor < METADATA_START || cursor > DATA_START || cursor > file_len {
        return Err(corrupt(format!("metadata cursor {cursor} outside the metadata region")));
    }
    let chunk_cursor = data_cursor(b);
    if chunk_cursor < DATA_START
        || chunk_cursor > file_len
        || (chunk_cursor - DATA_START) % CHUNK_SIZE != 0
    {
        return Err(corrupt(format!(
            "data cursor {chunk_cursor} is not on a chunk boundary inside the file"
        )));
    }
    let allocated_chunks = (chunk_cursor - DATA_START) / CHUNK_SIZE;

    let mut tables = Vec::new();
    let mut offset = METADATA_START;
    while offset < cursor {
        if offset + TableMeta::SIZE > cursor {
            return Err(corrupt(format!("partial table record at offset {offset}")));
        }
        let table_meta = TableMeta::read(b, offset);
        if table_meta.num_columns < 0
            || offset + TableMeta::SIZE + table_meta.num_columns * ColumnMeta::SIZE > cursor
        {
            return Err(corrupt(format!(
                "table '{}' declares more column slots than the metadata region holds",
                table_meta.name
            )));
        }
        offset += TableMeta::SIZE;

        let mut columns = Vec::new();
        for _ in 0..table_meta.num_columns {
            let column_meta = ColumnMeta::read(b, offset);
            offset += ColumnMeta::SIZE;
            if column_meta.first_chunk_offset == 0 {
                // Reserved slot that was never filled.
                continue;
            }
            validate_chain(b, &column_meta, allocated_chunks)?;
            columns.push(Column::new(column_meta, store.clone()));
        }

        tables.push(Table { meta: table_meta, columns, store: store.clone() });
    }
    Ok(tables)
}

/// Check that a column's chunk chain stays inside the allocated data region
/// and accounts for every entry the column claims to hold.
fn validate_chain(
    b: &[u8],
    meta: &ColumnMeta,
    allocated_chunks: i64,
) -> Result<(), DatabaseError> {
    let file_len = b.len() as i64;
    let mut chunk_pos = meta.first_chunk_offset;
    let mut total = 0i64;
    let mut visited = 0i64;
    while chunk_pos != 0 {
        if chunk_pos < DATA_START
            || (chunk_pos - DATA_START) % CHUNK_SIZE != 0
            || chunk_pos + CHUNK_SIZE > file_len
        {
            return Err(corrupt(format!(
                "column '{}' chunk chain leaves the data region at {chunk_pos}",
                meta.name
            )));
        }
        visited += 1;
        if visited > allocated_chunks {
            return Err(corrupt(format!("column '{}' chunk chain does not terminate", meta.name)));
        }
        let header = ChunkHeader::read(b, chunk_pos);
        total += header.num_vectors;
        chunk_pos = header.next_chunk;
    }
    if total != meta.num_vectors {
        return Err(corrupt(format!(
            "column '{}' counts {} entries but its chunks hold {total}",
            meta.name, meta.num_vectors
        )));
    }
    Ok(())
}

fn corrupt(message: String) -> DatabaseError {
    StorageError::Corrupt(message).into()
}
