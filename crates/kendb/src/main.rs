use anyhow::Result;
use kendb::{Database, VariablePool};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let mut conn = Database::init("demo")?;
    if conn.get_table_by_name("clips").is_none() {
        conn.add_table("clips", 5)?;
    }
    println!("tables: {:?}", conn.list_table_names());

    let table = conn.get_table_by_name_mut("clips").unwrap();
    if table.get_column_by_name("intro").is_none() {
        let column = table.add_column("intro", 2)?;
        column.add_vector(0, vec![5.0, 7.0])?;
        column.add_vector(1, vec![6.0, 6.0])?;
        column.add_vector(2, vec![7.0, 5.0])?;
        column.add_vector(3, vec![8.0, 4.0])?;
    }
    println!("columns: {:?}", table.list_column_names());

    let column = table.get_column_by_name("intro").unwrap();
    column.print_column_entries();

    let mut pool = VariablePool::new();
    column.select(1, 3, "mid", &mut pool);
    for entry in column.fetch("mid", &pool) {
        println!("fetched ts={} features={:?}", entry.timestamp, entry.features);
    }

    column.select(0, 4, "all", &mut pool);
    println!("sum:  {:?}", column.sum("all", &pool));
    println!("prod: {:?}", column.prod("all", &pool));

    let mut query_pool = VariablePool::new();
    let winner = column.ikeji(&[6.0, 6.0], &mut query_pool);
    println!("ikeji window: {:?}", column.fetch(&winner, &query_pool));

    conn.close()?;
    Ok(())
}
