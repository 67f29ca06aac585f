//! Error types for pow-analytics
//!
//! Structural problems in the input files are fatal and always surface to the
//! caller. Unparseable durations are not errors at all: they become the
//! not-available marker (see [`crate::normalize`]).

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// pow-analytics error types
#[derive(Error, Debug)]
pub enum Error {
    /// A line did not split into the number of fields the schema declares
    #[error("line {line}: expected {expected} field(s), found {found}")]
    FieldCount {
        /// 1-based physical line number
        line: usize,
        /// Number of fields declared by the schema
        expected: usize,
        /// Number of fields present on the line
        found: usize,
    },

    /// A structurally required field could not be coerced to its type
    #[error("line {line}: invalid value {value:?} for field `{field}`")]
    Parse {
        /// 1-based physical line number
        line: usize,
        /// Schema name of the offending field
        field: &'static str,
        /// Raw text found in the field
        value: String,
    },

    /// Invalid argument (e.g. merging two datasets with the same label)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Failed to open or read an input file
    #[error("Storage error: {0}")]
    StorageError(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// JSON (config or chart payload) error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error is a structural parse failure of an input line.
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(self, Self::FieldCount { .. } | Self::Parse { .. })
    }

    /// Line number for structural parse failures.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::FieldCount { line, .. } | Self::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }
}
