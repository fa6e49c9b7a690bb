//! Latest-quarter weekend-sales checks over the estimated-sales dataset.

use std::{fmt, path::Path};
use tracing::{debug, info};

use crate::{
    error::LoadError,
    schema::SALES_PERIOD,
    table::{load_csv, DecodeStrategy, RawTable},
};

pub const WEEKEND_RATIO: &str = "주말_매출_비율";
pub const WEEKEND_AMOUNT: &str = "주말_매출_금액";
pub const MONTH_AMOUNT: &str = "당월_매출_금액";

const SAMPLE_LEN: usize = 10;
const AMOUNT_SAMPLE_LEN: usize = 5;

/// count / mean / std / min / quartiles / max of a numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; undefined below two values.
    pub std: Option<f64>,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl Summary {
    /// `None` for an empty slice. NaNs are ignored.
    pub fn describe(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let std = (n > 1).then(|| {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        });

        Some(Self {
            count: n,
            mean,
            std,
            min: sorted[0],
            p25: quantile(&sorted, 0.25),
            p50: quantile(&sorted, 0.5),
            p75: quantile(&sorted, 0.75),
            max: sorted[n - 1],
        })
    }
}

/// Linear interpolation between the closest ranks of an ascending slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "count {:>14}", self.count)?;
        writeln!(f, "mean  {:>14.6}", self.mean)?;
        match self.std {
            Some(s) => writeln!(f, "std   {:>14.6}", s)?,
            None => writeln!(f, "std   {:>14}", "NaN")?,
        }
        writeln!(f, "min   {:>14.6}", self.min)?;
        writeln!(f, "25%   {:>14.6}", self.p25)?;
        writeln!(f, "50%   {:>14.6}", self.p50)?;
        writeln!(f, "75%   {:>14.6}", self.p75)?;
        write!(f, "max   {:>14.6}", self.max)
    }
}

/// Year code and quarter code glued together, e.g. `2024` + `3` → `20243`.
pub fn period_key(year: &str, quarter: &str) -> Option<u32> {
    format!("{}{}", year, quarter).parse().ok()
}

/// The latest period in `table` and the indices of its rows.
pub fn latest_period_rows(
    table: &RawTable,
    path: &Path,
) -> Result<Option<(u32, Vec<usize>)>, LoadError> {
    let periods = SALES_PERIOD.project(table, path)?;
    let keyed: Vec<(usize, u32)> = periods
        .iter()
        .enumerate()
        .filter_map(|(i, cols)| match period_key(cols[0], cols[1]) {
            Some(k) => Some((i, k)),
            None => {
                debug!(row = i, year = cols[0], quarter = cols[1], "unparseable period, skipping");
                None
            }
        })
        .collect();

    let Some(latest) = keyed.iter().map(|&(_, k)| k).max() else {
        return Ok(None);
    };
    let rows = keyed
        .into_iter()
        .filter(|&(_, k)| k == latest)
        .map(|(i, _)| i)
        .collect();
    Ok(Some((latest, rows)))
}

fn numeric(table: &RawTable, rows: &[usize], col: usize) -> Vec<f64> {
    rows.iter()
        .filter_map(|&r| table.cell(r, col).parse::<f64>().ok())
        .collect()
}

/// Weekend ratio = weekend amount / month amount * 100, for rows where both
/// parse and the month amount is non-zero.
fn computed_ratios(table: &RawTable, rows: &[usize], weekend: usize, month: usize) -> Vec<f64> {
    rows.iter()
        .filter_map(|&r| {
            let w = table.cell(r, weekend).parse::<f64>().ok()?;
            let t = table.cell(r, month).parse::<f64>().ok()?;
            (t != 0.0).then(|| w / t * 100.0)
        })
        .collect()
}

#[derive(Debug)]
pub struct SalesReport {
    pub columns: Vec<String>,
    pub latest_period: Option<u32>,
    pub latest_rows: usize,
    /// `None` when the dataset has no weekend-ratio column.
    pub weekend_ratio: Option<Option<Summary>>,
    pub weekend_ratio_samples: Vec<f64>,
    /// `None` when either amount column is absent.
    pub computed_ratio: Option<Option<Summary>>,
    /// Leading latest-quarter values of the two amount columns, empty when
    /// either column is absent.
    pub weekend_amount_samples: Vec<f64>,
    pub month_amount_samples: Vec<f64>,
}

/// Load the sales dataset at `path` and summarise weekend sales for its
/// latest quarter.
#[tracing::instrument(level = "info", skip(path, strategy), fields(path = %path.as_ref().display()))]
pub fn sales_report<P: AsRef<Path>>(path: P, strategy: &DecodeStrategy) -> Result<SalesReport, LoadError> {
    let path = path.as_ref();
    let table = load_csv(path, strategy)?;
    report_from_table(&table, path)
}

pub fn report_from_table(table: &RawTable, path: &Path) -> Result<SalesReport, LoadError> {
    let (latest_period, rows) = match latest_period_rows(table, path)? {
        Some((k, rows)) => (Some(k), rows),
        None => (None, Vec::new()),
    };
    info!(?latest_period, rows = rows.len(), "latest quarter selected");

    let (weekend_ratio, weekend_ratio_samples) = match table.column_index(WEEKEND_RATIO) {
        Some(col) => {
            let values = numeric(table, &rows, col);
            let samples = values.iter().take(SAMPLE_LEN).copied().collect();
            (Some(Summary::describe(&values)), samples)
        }
        None => (None, Vec::new()),
    };

    let (computed_ratio, weekend_amount_samples, month_amount_samples) = match (
        table.column_index(WEEKEND_AMOUNT),
        table.column_index(MONTH_AMOUNT),
    ) {
        (Some(w), Some(t)) => {
            let head = &rows[..rows.len().min(AMOUNT_SAMPLE_LEN)];
            (
                Some(Summary::describe(&computed_ratios(table, &rows, w, t))),
                numeric(table, head, w),
                numeric(table, head, t),
            )
        }
        _ => (None, Vec::new(), Vec::new()),
    };

    Ok(SalesReport {
        columns: table.headers.clone(),
        latest_period,
        latest_rows: rows.len(),
        weekend_ratio,
        weekend_ratio_samples,
        computed_ratio,
        weekend_amount_samples,
        month_amount_samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::parse_csv_text;
    use anyhow::Result;
    use encoding_rs::UTF_8;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn describe_matches_known_sample() {
        let s = Summary::describe(&[4.0, 1.0, 3.0, 2.0, 5.0]).expect("non-empty");
        assert_eq!(s.count, 5);
        assert!(close(s.mean, 3.0));
        assert!(close(s.std.unwrap(), 2.5f64.sqrt()));
        assert!(close(s.min, 1.0) && close(s.max, 5.0));
        assert!(close(s.p25, 2.0) && close(s.p50, 3.0) && close(s.p75, 4.0));
    }

    #[test]
    fn describe_interpolates_between_ranks() {
        let s = Summary::describe(&[10.0, 20.0, 30.0, 40.0]).unwrap();
        assert!(close(s.p25, 17.5));
        assert!(close(s.p50, 25.0));
        assert!(close(s.p75, 32.5));
    }

    #[test]
    fn describe_edge_cases() {
        assert_eq!(Summary::describe(&[]), None);
        assert_eq!(Summary::describe(&[7.0]).unwrap().std, None);
    }

    #[test]
    fn latest_quarter_weekend_ratios() -> Result<()> {
        let table = parse_csv_text(
            "기준_년_코드,기준_분기_코드,주말_매출_비율,주말_매출_금액,당월_매출_금액\n\
             2023,4,50,1,2\n\
             2024,1,20,25,100\n\
             2024,1,30,0,0\n\
             2024,1,x,30,100\n",
            UTF_8,
            None,
        )?;

        let report = report_from_table(&table, Path::new("sales.csv"))?;
        assert_eq!(report.latest_period, Some(20241));
        assert_eq!(report.latest_rows, 3);
        assert_eq!(report.weekend_ratio_samples, vec![20.0, 30.0]);

        let ratio = report.weekend_ratio.flatten().unwrap();
        assert!(close(ratio.mean, 25.0));

        let computed = report.computed_ratio.flatten().unwrap();
        assert_eq!(computed.count, 2);
        assert_eq!(report.weekend_amount_samples, vec![25.0, 0.0, 30.0]);
        assert_eq!(report.month_amount_samples, vec![100.0, 0.0, 100.0]);
        assert!(close(computed.min, 25.0) && close(computed.max, 30.0));
        Ok(())
    }

    #[test]
    fn absent_columns_are_not_summarised() -> Result<()> {
        let table = parse_csv_text("기준_년_코드,기준_분기_코드\n2024,2\n", UTF_8, None)?;
        let report = report_from_table(&table, Path::new("sales.csv"))?;
        assert_eq!(report.latest_period, Some(20242));
        assert!(report.weekend_ratio.is_none());
        assert!(report.computed_ratio.is_none());
        assert!(report.weekend_amount_samples.is_empty());
        Ok(())
    }

    #[test]
    fn missing_period_columns_fail() -> Result<()> {
        let table = parse_csv_text("주말_매출_비율\n1\n", UTF_8, None)?;
        assert!(matches!(
            report_from_table(&table, Path::new("sales.csv")),
            Err(LoadError::MissingColumn { .. })
        ));
        Ok(())
    }
}
