use gudong::{inspect, table::DecodeStrategy};
use std::{env, process::exit};
use tracing::error;

const DEFAULT_FILES: [&str; 2] = ["public/sales_dong.csv", "public/store_dong.csv"];

/// Print the header row of each CSV given on the command line (globs allowed).
fn main() {
    gudong::init_tracing("warn");

    let strategy = DecodeStrategy::default();
    let mut failed = false;
    for path in inspect::expand_paths(env::args().skip(1), &DEFAULT_FILES) {
        match inspect::headers(&path, &strategy) {
            Ok(cols) => {
                println!("Headers for {}:", path.display());
                for col in cols {
                    println!("- {}", col);
                }
                println!();
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
