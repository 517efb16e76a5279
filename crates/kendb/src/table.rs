use storage::{
    CHUNK_SIZE, ColumnMeta, Direction, GROWTH_STEP, Name, SharedFileStore, TableMeta, data_cursor,
    set_data_cursor,
};
use tracing::error;

use crate::column::Column;
use crate::error::DatabaseError;

/// A named group of columns. The column slots are reserved in the metadata
/// region at table creation and filled in order by [`Table::add_column`].
#[derive(Debug)]
pub struct Table {
    pub(crate) meta: TableMeta,
    pub(crate) columns: Vec<Column>,
    pub(crate) store: SharedFileStore,
}

impl Table {
    pub fn name(&self) -> String {
        self.meta.name.to_string()
    }

    /// Column capacity declared at creation.
    pub fn num_columns(&self) -> i64 {
        self.meta.num_columns
    }

    /// Fill the next reserved column slot and stake out the column's first
    /// chunk at the data cursor.
    pub fn add_column(
        &mut self,
        name: &str,
        vector_length: i64,
    ) -> Result<&mut Column, DatabaseError> {
        let column_count = self.columns.len() as i64;
        if column_count >= self.meta.num_columns {
            error!(
                table = %self.meta.name,
                max_columns = self.meta.num_columns,
                "cannot add column to full table"
            );
            return Err(DatabaseError::CapacityExceeded {
                table: self.meta.name.to_string(),
                max_columns: self.meta.num_columns,
            });
        }

        let mut store = self.store.write();

        let first_chunk_offset = data_cursor(store.bytes());
        if first_chunk_offset + CHUNK_SIZE > store.len() {
            store.grow(GROWTH_STEP)?;
        }

        let meta = ColumnMeta {
            name: Name::new(name),
            vector_length,
            num_vectors: 0,
            first_chunk_offset,
            offset: self.meta.offset + TableMeta::SIZE + column_count * ColumnMeta::SIZE,
        };

        let b = store.bytes_mut();
        meta.write_to(b);
        set_data_cursor(b, first_chunk_offset + CHUNK_SIZE, Direction::Right);
        drop(store);

        self.columns.push(Column::new(meta, self.store.clone()));
        Ok(self.columns.last_mut().unwrap())
    }

    pub fn list_column_names(&self) -> Vec<String> {
        self.columns.iter().map(|column| column.name()).collect()
    }

    pub fn get_column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name() == name)
    }

    pub fn get_column_by_name_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|column| column.name() == name)
    }
}
