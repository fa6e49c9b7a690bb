// src/table/mod.rs
pub mod decode;

use csv::{ReaderBuilder, Trim};
use encoding_rs::Encoding;
use std::{
    fs,
    io::{self, Cursor},
    path::Path,
};
use tracing::{debug, info};

use crate::error::LoadError;
pub use decode::{DecodeOutcome, DecodeStrategy};

#[derive(Debug)]
pub struct RawTable {
    /// Column names, from the header row.
    pub headers: Vec<String>,
    /// Each data row, one trimmed String per field.
    pub rows: Vec<Vec<String>>,
    /// Which decoder produced the text.
    pub encoding: &'static Encoding,
}

impl RawTable {
    /// Position of `column` in the header row.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    /// `rows[row][col]`, or `""` when the row is short.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Read `path` fully, decode it with `strategy`, and parse it as a
/// header-first comma-separated table.
#[tracing::instrument(level = "info", skip(path, strategy), fields(path = %path.as_ref().display()))]
pub fn load_csv<P: AsRef<Path>>(path: P, strategy: &DecodeStrategy) -> Result<RawTable, LoadError> {
    load_csv_limited(path, strategy, None)
}

/// Like [`load_csv`] but stops after `max_rows` data rows.
pub fn load_csv_limited<P: AsRef<Path>>(
    path: P,
    strategy: &DecodeStrategy,
    max_rows: Option<usize>,
) -> Result<RawTable, LoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let (text, encoding) = match strategy.decode(&bytes) {
        DecodeOutcome::Decoded { text, encoding } => (text, encoding),
        DecodeOutcome::Exhausted { tried } => {
            return Err(LoadError::Decode {
                path: path.to_path_buf(),
                tried,
            })
        }
    };

    let table = parse_csv_text(&text, encoding, max_rows).map_err(|source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        encoding = encoding.name(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "loaded table"
    );
    Ok(table)
}

/// Parse already-decoded CSV text. An empty input gives an empty table.
pub fn parse_csv_text(
    text: &str,
    encoding: &'static Encoding,
    max_rows: Option<usize>,
) -> Result<RawTable, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // tolerate ragged trailing columns
        .trim(Trim::All)
        .from_reader(Cursor::new(text.as_bytes()));

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        if max_rows.is_some_and(|max| idx >= max) {
            break;
        }
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    debug!(rows = rows.len(), "parsed csv text");

    Ok(RawTable {
        headers,
        rows,
        encoding,
    })
}
