use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("cannot open input {path:?}: {source}")]
    Open { path: PathBuf, source: csv::Error },
    #[error("cannot create output {path:?}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("table has {found} columns, schema needs {expected}")]
    Width { expected: usize, found: usize },
    #[error("column {column:?} is not numeric: {source}")]
    Cast { column: String, source: PolarsError },
    #[error("column {column:?} holds a non-finite value")]
    NonFinite { column: String },
    #[error("output header {found:?} does not match the schema")]
    Header { found: Vec<String> },
    #[error("output holds {found} rows, expected {expected}")]
    RowCount { expected: usize, found: usize },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Polars(#[from] PolarsError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
