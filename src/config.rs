// src/config.rs
use std::{env, path::PathBuf};

use crate::table::DecodeStrategy;

pub const DEFAULT_DISTRICT_CSV: &str = "public/sales.csv";
pub const DEFAULT_NEIGHBORHOOD_CSV: &str = "public/서울시 상권분석서비스(점포-행정동).csv";
pub const DEFAULT_OUTPUT: &str = "src/data/seoul_gu_dong_mapping.js";

/// The five public datasets the inspection tools look at by default.
pub const DATASETS: [&str; 5] = [
    "public/서울시 상권분석서비스(추정매출-행정동).csv",
    "public/서울시 상권분석서비스(점포-행정동).csv",
    "public/서울시 상권분석서비스(길단위인구-행정동).csv",
    "public/서울시 상권분석서비스(상주인구-행정동).csv",
    "public/서울시 상권분석서비스(직장인구-행정동).csv",
];

/// Paths and decoding options for one mapping run.
#[derive(Debug, Clone)]
pub struct Config {
    pub district_csv: PathBuf,
    pub neighborhood_csv: PathBuf,
    pub output: PathBuf,
    pub strategy: DecodeStrategy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            district_csv: PathBuf::from(DEFAULT_DISTRICT_CSV),
            neighborhood_csv: PathBuf::from(DEFAULT_NEIGHBORHOOD_CSV),
            output: PathBuf::from(DEFAULT_OUTPUT),
            strategy: DecodeStrategy::default(),
        }
    }
}

impl Config {
    /// Defaults, overridden by `GUDONG_DISTRICT_CSV`, `GUDONG_NEIGHBORHOOD_CSV`,
    /// `GUDONG_OUTPUT` and `GUDONG_ENCODINGS` (comma-separated labels).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(p) = lookup("GUDONG_DISTRICT_CSV") {
            cfg.district_csv = p.into();
        }
        if let Some(p) = lookup("GUDONG_NEIGHBORHOOD_CSV") {
            cfg.neighborhood_csv = p.into();
        }
        if let Some(p) = lookup("GUDONG_OUTPUT") {
            cfg.output = p.into();
        }
        if let Some(labels) = lookup("GUDONG_ENCODINGS") {
            let strategy = DecodeStrategy::from_labels(labels.split(','));
            if strategy.candidates().is_empty() {
                tracing::warn!(%labels, "no usable encodings given, keeping defaults");
            } else {
                cfg.strategy = strategy;
            }
        }
        cfg
    }

    /// Positional overrides: `[district_csv] [neighborhood_csv] [output]`.
    pub fn with_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        if let Some(p) = args.next() {
            self.district_csv = p.into();
        }
        if let Some(p) = args.next() {
            self.neighborhood_csv = p.into();
        }
        if let Some(p) = args.next() {
            self.output = p.into();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::EUC_KR;
    use std::collections::HashMap;

    #[test]
    fn env_then_args_override_defaults() {
        let vars: HashMap<&str, &str> = [
            ("GUDONG_OUTPUT", "out/mapping.js"),
            ("GUDONG_ENCODINGS", "euc-kr"),
        ]
        .into_iter()
        .collect();

        let cfg = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string()))
            .with_args(vec!["gu.csv".to_string()]);

        assert_eq!(cfg.district_csv, PathBuf::from("gu.csv"));
        assert_eq!(cfg.neighborhood_csv, PathBuf::from(DEFAULT_NEIGHBORHOOD_CSV));
        assert_eq!(cfg.output, PathBuf::from("out/mapping.js"));
        assert_eq!(cfg.strategy.candidates(), &[EUC_KR]);
    }

    #[test]
    fn bad_encoding_list_keeps_defaults() {
        let cfg = Config::from_lookup(|k| (k == "GUDONG_ENCODINGS").then(|| "klingon".to_string()));
        assert_eq!(cfg.strategy.candidates().len(), 2);
    }
}
