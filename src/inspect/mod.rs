// src/inspect/mod.rs
//! Read-only helpers behind the dataset inspection binaries.
pub mod stats;

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::{
    error::LoadError,
    table::{load_csv, load_csv_limited, DecodeStrategy},
};

/// Column names of a CSV file.
pub fn headers<P: AsRef<Path>>(path: P, strategy: &DecodeStrategy) -> Result<Vec<String>, LoadError> {
    Ok(load_csv_limited(path, strategy, Some(0))?.headers)
}

/// Column names plus the first data row as `(column, value)` pairs.
/// `None` when the file has a header but no data.
pub fn first_row<P: AsRef<Path>>(
    path: P,
    strategy: &DecodeStrategy,
) -> Result<Option<Vec<(String, String)>>, LoadError> {
    let table = load_csv_limited(path, strategy, Some(1))?;
    Ok(table.rows.first().map(|row| {
        table
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), row.get(i).cloned().unwrap_or_default()))
            .collect()
    }))
}

/// Turn CLI arguments into file paths, expanding glob patterns. With no
/// arguments the `defaults` are used verbatim.
pub fn expand_paths<I>(args: I, defaults: &[&str]) -> Vec<PathBuf>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    if args.is_empty() {
        return defaults.iter().map(PathBuf::from).collect();
    }

    let mut paths = Vec::new();
    for arg in args {
        if !arg.contains(['*', '?', '[']) {
            paths.push(PathBuf::from(arg));
            continue;
        }
        match glob::glob(&arg) {
            Ok(entries) => {
                let before = paths.len();
                paths.extend(entries.filter_map(Result::ok));
                if paths.len() == before {
                    warn!(pattern = %arg, "pattern matched no files");
                }
            }
            Err(e) => warn!(pattern = %arg, error = %e, "bad glob pattern"),
        }
    }
    paths
}

/// Column names containing `needle`.
pub fn columns_containing<'a>(columns: &'a [String], needle: &str) -> Vec<&'a str> {
    columns
        .iter()
        .filter(|c| c.contains(needle))
        .map(String::as_str)
        .collect()
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Ok,
    Missing,
    Error,
}

/// Per-dataset summary written by `inspect_columns`.
#[derive(Debug, Serialize)]
pub struct ColumnReport {
    pub path: PathBuf,
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<&'static str>,
    pub total_columns: usize,
    /// Columns mentioning 구 (district).
    pub gu_columns: Vec<String>,
    /// Columns mentioning 동 (neighborhood).
    pub dong_columns: Vec<String>,
    pub columns: Vec<String>,
    pub first_row: Vec<String>,
}

impl ColumnReport {
    fn failed(path: &Path, status: ReportStatus, error: Option<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            status,
            error,
            encoding: None,
            total_columns: 0,
            gu_columns: Vec::new(),
            dong_columns: Vec::new(),
            columns: Vec::new(),
            first_row: Vec::new(),
        }
    }
}

/// Build the report for one file. A missing or unreadable file becomes a
/// report entry instead of an error so one bad dataset doesn't hide the rest.
pub fn column_report<P: AsRef<Path>>(path: P, strategy: &DecodeStrategy) -> ColumnReport {
    let path = path.as_ref();
    let table = match load_csv(path, strategy) {
        Ok(t) => t,
        Err(LoadError::NotFound { .. }) => {
            warn!(path = %path.display(), "file not found");
            return ColumnReport::failed(path, ReportStatus::Missing, None);
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read");
            return ColumnReport::failed(path, ReportStatus::Error, Some(e.to_string()));
        }
    };

    let own = |cols: Vec<&str>| -> Vec<String> { cols.into_iter().map(str::to_string).collect() };
    ColumnReport {
        path: path.to_path_buf(),
        status: ReportStatus::Ok,
        error: None,
        encoding: Some(table.encoding.name()),
        total_columns: table.headers.len(),
        gu_columns: own(columns_containing(&table.headers, "구")),
        dong_columns: own(columns_containing(&table.headers, "동")),
        first_row: table.rows.first().cloned().unwrap_or_default(),
        columns: table.headers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    const STORE: &str = "기준_년분기_코드,행정동_코드,행정동_코드_명,서비스_업종_코드_명,점포_수\n\
                         20243,1168064000,역삼1동,한식음식점,120\n\
                         20243,1168064000,역삼1동,커피-음료,88\n";

    #[test]
    fn headers_and_first_row() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("store.csv");
        fs::write(&path, STORE)?;
        let strategy = DecodeStrategy::default();

        assert_eq!(headers(&path, &strategy)?.len(), 5);
        let row = first_row(&path, &strategy)?.expect("one data row");
        assert_eq!(row[2], ("행정동_코드_명".to_string(), "역삼1동".to_string()));
        Ok(())
    }

    #[test]
    fn header_only_file_has_no_first_row() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("empty.csv");
        fs::write(&path, "a,b\n")?;
        assert_eq!(first_row(&path, &DecodeStrategy::default())?, None);
        Ok(())
    }

    #[test]
    fn report_splits_gu_and_dong_columns() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("store.csv");
        fs::write(&path, STORE)?;

        let report = column_report(&path, &DecodeStrategy::default());
        assert_eq!(report.status, ReportStatus::Ok);
        assert_eq!(report.encoding, Some("UTF-8"));
        assert_eq!(report.total_columns, 5);
        assert_eq!(report.gu_columns, Vec::<String>::new());
        assert_eq!(report.dong_columns, vec!["행정동_코드", "행정동_코드_명"]);
        assert_eq!(report.first_row[4], "120");
        Ok(())
    }

    #[test]
    fn expands_globs_and_falls_back_to_defaults() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("a.csv"), "x\n")?;
        fs::write(dir.path().join("b.csv"), "x\n")?;
        fs::write(dir.path().join("c.txt"), "x\n")?;

        let pattern = format!("{}/*.csv", dir.path().display());
        let paths = expand_paths(vec![pattern, "plain.csv".to_string()], &["default.csv"]);
        assert_eq!(
            paths,
            vec![
                dir.path().join("a.csv"),
                dir.path().join("b.csv"),
                PathBuf::from("plain.csv"),
            ]
        );
        assert_eq!(
            expand_paths(Vec::new(), &["default.csv"]),
            vec![PathBuf::from("default.csv")]
        );
        Ok(())
    }

    #[test]
    fn missing_file_is_reported_not_raised() {
        let report = column_report("nowhere/store.csv", &DecodeStrategy::default());
        assert_eq!(report.status, ReportStatus::Missing);
        assert_eq!(report.total_columns, 0);
    }
}
