use std::{io, path::PathBuf};
use thiserror::Error;

/// Fatal problems while turning a CSV file on disk into a table.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("input file not found: {path:?}")]
    NotFound { path: PathBuf },
    #[error("reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not decode {path:?} with any of [{}]", .tried.join(", "))]
    Decode {
        path: PathBuf,
        tried: Vec<&'static str>,
    },
    #[error("CSV parse error in {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("column `{column}` missing from {path:?}")]
    MissingColumn { path: PathBuf, column: String },
}

impl LoadError {
    /// The file the error is about.
    pub fn path(&self) -> &PathBuf {
        match self {
            LoadError::NotFound { path }
            | LoadError::Io { path, .. }
            | LoadError::Decode { path, .. }
            | LoadError::Csv { path, .. }
            | LoadError::MissingColumn { path, .. } => path,
        }
    }
}
