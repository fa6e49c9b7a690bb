use anyhow::{Context, Result};
use gudong::{
    config::DATASETS,
    inspect::{self, ReportStatus},
    table::DecodeStrategy,
};
use std::{env, fs::File, io::Write};
use tracing::info;

const REPORT_PATH: &str = "columns_report.yaml";

/// Write a YAML report of every dataset's columns, the 구/동 columns among
/// them, and its first row.
fn main() -> Result<()> {
    gudong::init_tracing("info");

    let strategy = DecodeStrategy::default();
    let reports: Vec<_> = inspect::expand_paths(env::args().skip(1), &DATASETS)
        .iter()
        .map(|path| inspect::column_report(path, &strategy))
        .collect();

    let yaml = serde_yaml::to_string(&reports).context("serializing column report")?;
    let mut out =
        File::create(REPORT_PATH).with_context(|| format!("creating {}", REPORT_PATH))?;
    out.write_all(yaml.as_bytes())?;

    let ok = reports
        .iter()
        .filter(|r| r.status == ReportStatus::Ok)
        .count();
    info!("wrote {} ({} of {} datasets readable)", REPORT_PATH, ok, reports.len());
    println!("→ Successfully wrote {} ({} datasets)", REPORT_PATH, reports.len());
    Ok(())
}
