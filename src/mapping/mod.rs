// src/mapping/mod.rs
pub mod write;

use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    collections::{hash_map::Entry, BTreeMap, HashMap, HashSet},
    path::Path,
};
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::LoadError,
    schema::{DISTRICTS, NEIGHBORHOODS},
    table::{load_csv, DecodeStrategy},
};
pub use write::{render_mapping, write_mapping, EXPORT_NAME};

/// Number of leading characters of a neighborhood code that spell out its
/// parent district code.
pub const DISTRICT_CODE_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DistrictRecord {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NeighborhoodRecord {
    pub code: String,
    pub name: String,
}

/// One entry of a district's list in the output artifact.
#[derive(Debug, Serialize, PartialEq, Clone, Eq, Hash)]
pub struct Neighborhood {
    pub code: String,
    pub name: String,
}

/// District name → neighborhoods sorted by name. Keys iterate in
/// code-point order.
pub type Mapping = BTreeMap<String, Vec<Neighborhood>>;

/// A neighborhood whose code prefix matched no known district.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    pub district_code: String,
    pub neighborhood_code: String,
    pub neighborhood_name: String,
}

#[derive(Debug, Default, PartialEq)]
pub struct BuildReport {
    pub mapping: Mapping,
    pub unresolved: Vec<Unresolved>,
}

impl BuildReport {
    pub fn neighborhood_count(&self) -> usize {
        self.mapping.values().map(Vec::len).sum()
    }
}

/// First [`DISTRICT_CODE_LEN`] characters of `neighborhood_code`, or the
/// whole code if it is shorter.
pub fn district_code_of(neighborhood_code: &str) -> &str {
    match neighborhood_code.char_indices().nth(DISTRICT_CODE_LEN) {
        Some((end, _)) => &neighborhood_code[..end],
        None => neighborhood_code,
    }
}

/// code → name over the unique (code, name) pairs. When one code carries
/// several names the first one seen is kept.
pub fn district_table(districts: &[DistrictRecord]) -> HashMap<&str, &str> {
    let mut table: HashMap<&str, &str> = HashMap::with_capacity(districts.len());
    for d in districts {
        match table.entry(d.code.as_str()) {
            Entry::Vacant(slot) => {
                slot.insert(d.name.as_str());
            }
            Entry::Occupied(slot) => {
                if *slot.get() != d.name {
                    warn!(
                        code = %d.code,
                        kept = %slot.get(),
                        ignored = %d.name,
                        "district code has conflicting names, keeping the first"
                    );
                }
            }
        }
    }
    table
}

/// Group neighborhoods under their parent district by code prefix.
///
/// Neighborhoods are de-duplicated by (code, name) first, then by code within
/// each district. Unknown prefixes are logged and collected, never mapped.
pub fn build(districts: &[DistrictRecord], neighborhoods: &[NeighborhoodRecord]) -> BuildReport {
    let by_code = district_table(districts);
    info!(districts = by_code.len(), "district table ready");

    let mut mapping: Mapping = BTreeMap::new();
    let mut placed: HashSet<(&str, &str)> = HashSet::new();
    let mut seen_pairs: HashSet<&NeighborhoodRecord> = HashSet::new();
    let mut unresolved = Vec::new();

    for n in neighborhoods {
        if !seen_pairs.insert(n) {
            continue;
        }
        let gu_code = district_code_of(&n.code);

        let Some(&gu_name) = by_code.get(gu_code) else {
            warn!(
                district_code = gu_code,
                neighborhood_code = %n.code,
                neighborhood_name = %n.name,
                "no district for neighborhood, skipping"
            );
            unresolved.push(Unresolved {
                district_code: gu_code.to_string(),
                neighborhood_code: n.code.clone(),
                neighborhood_name: n.name.clone(),
            });
            continue;
        };

        if !placed.insert((gu_name, n.code.as_str())) {
            debug!(code = %n.code, name = %n.name, "neighborhood code already listed");
            continue;
        }
        mapping
            .entry(gu_name.to_string())
            .or_default()
            .push(Neighborhood {
                code: n.code.clone(),
                name: n.name.clone(),
            });
    }

    for list in mapping.values_mut() {
        list.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.code.cmp(&b.code)));
    }

    BuildReport {
        mapping,
        unresolved,
    }
}

/// Rows of the district file, skipping rows with an empty code.
pub fn load_districts<P: AsRef<Path>>(
    path: P,
    strategy: &DecodeStrategy,
) -> Result<Vec<DistrictRecord>, LoadError> {
    let path = path.as_ref();
    let table = load_csv(path, strategy)?;
    let rows = DISTRICTS.project(&table, path)?;
    Ok(rows
        .into_iter()
        .filter(|r| !r[0].is_empty())
        .map(|r| DistrictRecord {
            code: r[0].to_string(),
            name: r[1].to_string(),
        })
        .collect())
}

/// Rows of the neighborhood file, skipping rows with an empty code.
pub fn load_neighborhoods<P: AsRef<Path>>(
    path: P,
    strategy: &DecodeStrategy,
) -> Result<Vec<NeighborhoodRecord>, LoadError> {
    let path = path.as_ref();
    let table = load_csv(path, strategy)?;
    let rows = NEIGHBORHOODS.project(&table, path)?;
    Ok(rows
        .into_iter()
        .filter(|r| !r[0].is_empty())
        .map(|r| NeighborhoodRecord {
            code: r[0].to_string(),
            name: r[1].to_string(),
        })
        .collect())
}

/// Load both inputs named by `cfg`, build the mapping and overwrite
/// `cfg.output` with it.
pub fn generate(cfg: &Config) -> Result<BuildReport> {
    info!("loading districts from {}", cfg.district_csv.display());
    let districts = load_districts(&cfg.district_csv, &cfg.strategy)
        .context("loading district table")?;

    info!("loading neighborhoods from {}", cfg.neighborhood_csv.display());
    let neighborhoods = load_neighborhoods(&cfg.neighborhood_csv, &cfg.strategy)
        .context("loading neighborhood table")?;

    let report = build(&districts, &neighborhoods);
    info!(
        districts = report.mapping.len(),
        neighborhoods = report.neighborhood_count(),
        unresolved = report.unresolved.len(),
        "mapping built"
    );

    write_mapping(&cfg.output, &report.mapping)
        .with_context(|| format!("writing mapping to {}", cfg.output.display()))?;
    info!("mapping saved to {}", cfg.output.display());

    Ok(report)
}
