use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Failure to produce a dataset at all.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Data file not found: {0:?}")]
    NotFound(PathBuf),

    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{count} row(s) failed validation, first: {first}")]
    InvalidRows { count: usize, first: ParseError },
}

/// A row that failed structural validation and produced no record.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ParseError {
    #[error("row {row}: cannot parse date {raw:?} with format {format:?}")]
    InvalidDate { row: usize, raw: String, format: String },

    #[error("row {row}: malformed record: {message}")]
    Malformed { row: usize, message: String },
}

impl ParseError {
    pub fn row(&self) -> usize {
        match self {
            ParseError::InvalidDate { row, .. } | ParseError::Malformed { row, .. } => *row,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionReason {
    NotANumber,
    Negative,
    Fractional,
    OutOfRange,
}

impl fmt::Display for CoercionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoercionReason::NotANumber => write!(f, "not a number, using 0"),
            CoercionReason::Negative => write!(f, "negative, using 0"),
            CoercionReason::Fractional => write!(f, "fractional count, truncated"),
            CoercionReason::OutOfRange => write!(f, "out of range, saturated"),
        }
    }
}

/// A field that was kept but had to be coerced to a fallback value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldCoercionWarning {
    /// 1-based data row (the header is not counted)
    pub row: usize,
    pub column: &'static str,
    pub raw: String,
    pub reason: CoercionReason,
}

impl fmt::Display for FieldCoercionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {} = {:?}: {}", self.row, self.column, self.raw, self.reason)
    }
}
