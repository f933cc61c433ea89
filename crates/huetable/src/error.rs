//! Error types for table construction, option parsing and rendering.
//!
//! Configuration problems that can be corrected (an unknown group column, say)
//! are not errors: they surface as [`Notice`](crate::Notice)s and the render
//! proceeds. The types here cover what cannot be corrected.

use std::path::PathBuf;

use thiserror::Error;

/// Structural problems found while building a [`Table`](crate::Table).
#[derive(Debug, Error)]
pub enum TableError {
    #[error("column '{column}' has {found} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("expected a JSON array of objects, found {0}")]
    NotRecords(&'static str),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Invalid [`RenderOptions`](crate::RenderOptions).
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("failed to parse options: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("page_size must be at least 1")]
    ZeroPageSize,

    #[error("width_scale must be a positive number, got {0}")]
    InvalidWidthScale(f64),
}

/// Error type for all render and export operations.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[cfg(feature = "xlsx")]
    #[error("workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    /// The table does not fit in a worksheet.
    #[error("{axis} index {index} exceeds the worksheet limit")]
    SheetBounds { axis: &'static str, index: usize },

    /// The requested output target was compiled out.
    #[error("output target '{0}' is not available in this build")]
    UnsupportedTarget(&'static str),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
