use anyhow::{Context, Result};
use gudong::{
    config::DEFAULT_DISTRICT_CSV,
    inspect::stats::{self, Summary, MONTH_AMOUNT, WEEKEND_AMOUNT, WEEKEND_RATIO},
    table::DecodeStrategy,
};
use std::env;

fn print_summary(label: &str, summary: &Option<Summary>) {
    println!("{}:", label);
    match summary {
        Some(s) => println!("{}", s),
        None => println!("  <no numeric values>"),
    }
}

/// Summarise weekend sales for the latest quarter of the sales dataset.
fn main() -> Result<()> {
    gudong::init_tracing("info");

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DISTRICT_CSV.to_string());
    let report = stats::sales_report(&path, &DecodeStrategy::default())
        .with_context(|| format!("summarising {}", path))?;

    println!("Columns: {:?}", report.columns);
    match report.latest_period {
        Some(yq) => println!("Latest YQ: {} ({} rows)", yq, report.latest_rows),
        None => println!("Latest YQ: <none>"),
    }

    match &report.weekend_ratio {
        Some(summary) => {
            print_summary("Weekend Sales Ratio Stats", summary);
            println!("Sample values: {:?}", report.weekend_ratio_samples);
        }
        None => println!("'{}' column not found!", WEEKEND_RATIO),
    }

    match &report.computed_ratio {
        Some(summary) => {
            println!("Sample Weekend Amounts: {:?}", report.weekend_amount_samples);
            println!("Sample Total Amounts: {:?}", report.month_amount_samples);
            print_summary("Calculated Ratio Stats", summary);
        }
        None => println!(
            "cannot calculate ratio: need both '{}' and '{}'",
            WEEKEND_AMOUNT, MONTH_AMOUNT
        ),
    }
    Ok(())
}
