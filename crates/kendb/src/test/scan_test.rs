use crate::test::seeded;
use crate::VariablePool;

#[test]
fn test_select_fetch_window() {
    let dir = tempfile::tempdir().unwrap();
    let db = seeded(&dir.path().join("t_b.ken"));
    let column = db.get_table_by_name("tbl").unwrap().get_column_by_name("c").unwrap();

    let mut pool = VariablePool::new();
    column.select(1, 3, "s", &mut pool);
    let entries = column.fetch("s", &pool);

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].timestamp, 1);
    assert_eq!(entries[0].features, vec![6.0, 6.0]);
    assert_eq!(entries[1].timestamp, 2);
    assert_eq!(entries[1].features, vec![7.0, 5.0]);
}

#[test]
fn test_select_bitmap_matches_column_order() {
    let dir = tempfile::tempdir().unwrap();
    let db = seeded(&dir.path().join("t_bitmap.ken"));
    let column = db.get_table_by_name("tbl").unwrap().get_column_by_name("c").unwrap();

    let mut pool = VariablePool::new();
    column.select(1, 3, "s", &mut pool);

    let bits: Vec<bool> = pool["s"].iter().map(|bit| *bit).collect();
    assert_eq!(bits, vec![false, true, true, false]);
}

#[test]
fn test_select_extends_an_existing_bitmap() {
    let dir = tempfile::tempdir().unwrap();
    let db = seeded(&dir.path().join("t_extend.ken"));
    let column = db.get_table_by_name("tbl").unwrap().get_column_by_name("c").unwrap();

    let mut pool = VariablePool::new();
    column.select(0, 2, "s", &mut pool);
    column.select(2, 4, "s", &mut pool);
    assert_eq!(pool["s"].len(), 8);
}

#[test]
fn test_half_open_interval_excludes_end() {
    let dir = tempfile::tempdir().unwrap();
    let db = seeded(&dir.path().join("t_halfopen.ken"));
    let column = db.get_table_by_name("tbl").unwrap().get_column_by_name("c").unwrap();

    let mut pool = VariablePool::new();
    column.select(0, 3, "s", &mut pool);
    let entries = column.fetch("s", &pool);
    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|entry| entry.timestamp < 3));
}

#[test]
fn test_fetch_unknown_variable_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let db = seeded(&dir.path().join("t_miss.ken"));
    let column = db.get_table_by_name("tbl").unwrap().get_column_by_name("c").unwrap();

    let pool = VariablePool::new();
    assert!(column.fetch("nope", &pool).is_empty());
}
