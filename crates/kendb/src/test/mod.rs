mod column_test;
mod scan_test;

use std::path::Path;

use crate::Database;

/// Four-entry fixture shared by the scan and math tests.
pub(crate) fn seeded(path: &Path) -> Database {
    let mut db = Database::open_at(path).unwrap();
    let table = db.add_table("tbl", 2).unwrap();
    let column = table.add_column("c", 2).unwrap();
    column.add_vector(0, vec![5.0, 7.0]).unwrap();
    column.add_vector(1, vec![6.0, 6.0]).unwrap();
    column.add_vector(2, vec![7.0, 5.0]).unwrap();
    column.add_vector(3, vec![8.0, 4.0]).unwrap();
    db
}
