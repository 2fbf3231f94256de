//! Dataset Module - Tabular input for drift and missing-value analysis
//!
//! Reference and production traffic arrive as CSV exports. A `Dataset` keeps
//! column order and row order exactly as loaded and is never mutated by the
//! analysis code.
//!
//! # Structure
//! - `column.rs`: `Column`, `ColumnKind` (numeric/categorical capability check)
//! - `reader.rs`: CSV parsing
//! - `writer.rs`: CSV output (scored production data)

pub mod column;
pub mod reader;
pub mod writer;


use std::path::Path;

use crate::error::{MonitorError, MonitorResult};

pub use column::{Column, ColumnKind};

/// Column-named table with equal-length columns
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: usize,
}

impl Dataset {
    /// Build a dataset, rejecting columns of unequal length
    pub fn new(columns: Vec<Column>) -> MonitorResult<Self> {
        let rows = columns.first().map(Column::len).unwrap_or(0);

        if let Some(bad) = columns.iter().find(|c| c.len() != rows) {
            return Err(MonitorError::ShapeMismatch {
                column: bad.name().to_string(),
                expected: rows,
                actual: bad.len(),
            });
        }

        Ok(Self { columns, rows })
    }

    /// Load from a CSV file. A missing file is an input error.
    pub fn from_csv_path(path: &Path) -> MonitorResult<Self> {
        if !path.exists() {
            return Err(MonitorError::MissingInput(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let dataset = reader::parse_csv(&content)?;
        log::info!(
            "Loaded dataset from {:?}: {} rows x {} columns",
            path,
            dataset.n_rows(),
            dataset.n_columns()
        );
        Ok(dataset)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn n_rows(&self) -> usize {
        self.rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Copy of this dataset with `column` appended, or replacing a column of the same name
    pub fn with_column(&self, column: Column) -> MonitorResult<Self> {
        if !self.columns.is_empty() && column.len() != self.rows {
            return Err(MonitorError::ShapeMismatch {
                column: column.name().to_string(),
                expected: self.rows,
                actual: column.len(),
            });
        }

        let mut columns = self.columns.clone();
        match columns.iter_mut().find(|c| c.name() == column.name()) {
            Some(existing) => *existing = column,
            None => columns.push(column),
        }

        Self::new(columns)
    }

    /// First `n` rows (all rows if fewer)
    pub fn head(&self, n: usize) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|c| Column::new(c.name(), c.cells().iter().take(n).cloned().collect()))
            .collect();

        Self {
            columns,
            rows: self.rows.min(n),
        }
    }

    /// Write as CSV (header + rows)
    pub fn write_csv(&self, path: &Path) -> MonitorResult<()> {
        writer::write_csv(self, path)
    }
}
