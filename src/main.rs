use anyhow::Result;
use gudong::{mapping, Config};
use std::env;
use tracing::{info, warn};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    gudong::init_tracing("info");
    info!("startup");

    // ─── 2) configure paths ──────────────────────────────────────────
    let cfg = Config::from_env().with_args(env::args().skip(1));
    info!(
        districts = %cfg.district_csv.display(),
        neighborhoods = %cfg.neighborhood_csv.display(),
        output = %cfg.output.display(),
        "configured"
    );

    // ─── 3) build + write ────────────────────────────────────────────
    let report = mapping::generate(&cfg)?;
    if !report.unresolved.is_empty() {
        warn!(
            count = report.unresolved.len(),
            "neighborhoods left out: district code not in {}",
            cfg.district_csv.display()
        );
    }

    info!(
        "found {} districts, {} neighborhoods",
        report.mapping.len(),
        report.neighborhood_count()
    );
    Ok(())
}
