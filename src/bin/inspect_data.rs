use gudong::{inspect, table::DecodeStrategy};
use std::{env, process::exit};
use tracing::error;

/// Print the columns and the first data row of each CSV.
fn main() {
    gudong::init_tracing("warn");

    let strategy = DecodeStrategy::default();
    let mut failed = false;
    for path in inspect::expand_paths(env::args().skip(1), &["public/sales_dong.csv"]) {
        println!("--- {} ---", path.display());
        match inspect::first_row(&path, &strategy) {
            Ok(Some(row)) => {
                let cols: Vec<&str> = row.iter().map(|(c, _)| c.as_str()).collect();
                println!("Columns: {:?}", cols);
                println!("First Row:");
                for (col, value) in &row {
                    println!("  {:<30} {}", col, value);
                }
            }
            Ok(None) => {
                let cols = inspect::headers(&path, &strategy).unwrap_or_default();
                println!("Columns: {:?}", cols);
                println!("First Row: <none>");
            }
            Err(e) => {
                error!("{}", e);
                failed = true;
            }
        }
    }

    if failed {
        exit(1);
    }
}
