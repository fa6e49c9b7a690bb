//! Fixed column schemas for the Seoul commercial-district datasets.
//! Header names are matched verbatim, so they stay in the source language.

use std::path::Path;

use crate::{error::LoadError, table::RawTable};

/// A named set of columns a table must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

/// District code/name pairs, read from the estimated-sales dataset.
pub const DISTRICTS: TableSchema = TableSchema {
    name: "districts",
    columns: &["자치구_코드", "자치구_코드_명"],
};

/// Neighborhood code/name pairs, read from the store dataset.
pub const NEIGHBORHOODS: TableSchema = TableSchema {
    name: "neighborhoods",
    columns: &["행정동_코드", "행정동_코드_명"],
};

/// Year and quarter codes that make up the sales dataset's period key.
pub const SALES_PERIOD: TableSchema = TableSchema {
    name: "sales_period",
    columns: &["기준_년_코드", "기준_분기_코드"],
};

impl TableSchema {
    /// Header index of every schema column, in schema order. Fails on the
    /// first column the table lacks.
    pub fn resolve(&self, table: &RawTable, path: &Path) -> Result<Vec<usize>, LoadError> {
        self.columns
            .iter()
            .map(|&column| {
                table
                    .column_index(column)
                    .ok_or_else(|| LoadError::MissingColumn {
                        path: path.to_path_buf(),
                        column: column.to_string(),
                    })
            })
            .collect()
    }

    /// Every row cut down to the schema's columns, in schema order. A table
    /// with neither a header nor rows (a zero-byte file) has no records.
    pub fn project<'t>(
        &self,
        table: &'t RawTable,
        path: &Path,
    ) -> Result<Vec<Vec<&'t str>>, LoadError> {
        if table.headers.is_empty() && table.rows.is_empty() {
            return Ok(Vec::new());
        }
        let indices = self.resolve(table, path)?;
        Ok((0..table.rows.len())
            .map(|row| indices.iter().map(|&col| table.cell(row, col)).collect())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::parse_csv_text;
    use anyhow::Result;
    use encoding_rs::UTF_8;

    #[test]
    fn projects_in_schema_order() -> Result<()> {
        let table = parse_csv_text(
            "기준_년_코드,자치구_코드_명,자치구_코드\n2024,강남구,11680\n",
            UTF_8,
            None,
        )?;
        let rows = DISTRICTS.project(&table, Path::new("sales.csv"))?;
        assert_eq!(rows, vec![vec!["11680", "강남구"]]);
        Ok(())
    }

    #[test]
    fn blank_table_projects_to_nothing() -> Result<()> {
        let table = parse_csv_text("", UTF_8, None)?;
        assert!(DISTRICTS.project(&table, Path::new("sales.csv"))?.is_empty());
        Ok(())
    }

    #[test]
    fn missing_column_is_named() -> Result<()> {
        let table = parse_csv_text("행정동_코드\n1168064000\n", UTF_8, None)?;
        match NEIGHBORHOODS.resolve(&table, Path::new("store.csv")) {
            Err(LoadError::MissingColumn { path, column }) => {
                assert_eq!(path, Path::new("store.csv"));
                assert_eq!(column, "행정동_코드_명");
            }
            other => panic!("expected missing column, got {:?}", other),
        }
        Ok(())
    }
}
