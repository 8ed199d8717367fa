//! Error handling for the NSFG reader.

pub mod util;

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;

/// Specialized error type for reading and validating survey files
#[derive(Debug, thiserror::Error)]
pub enum NsfgError {
    /// Error opening or reading a file
    #[error("IO error: {context} ({}): {source}", .path.display())]
    Io {
        context: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File is missing or is not the kind of path we expected
    #[error("File error: {message} ({})", .path.display())]
    File { message: String, path: PathBuf },

    /// Malformed Stata dictionary
    #[error("Dictionary error at line {line}: {message}")]
    Dictionary { line: usize, message: String },

    /// Malformed fixed-width record
    #[error("Parse error at line {line}, variable '{variable}': {message}")]
    Parse {
        line: usize,
        variable: String,
        message: String,
    },

    /// Column required by an operation is absent from the table
    #[error("Column not found: {column}")]
    ColumnNotFound { column: String },

    /// Column exists but holds a different Arrow type
    #[error("Column '{column}' is not of type {expected}")]
    InvalidDataType { column: String, expected: String },

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error converting a record batch into records
    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_arrow::Error),

    /// Error reading the configuration file
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl NsfgError {
    /// Build an IO error carrying the path and what we were doing with it
    pub fn io(context: impl Into<String>, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            path: path.into(),
            source,
        }
    }

    pub fn column_not_found(column: &str) -> Self {
        Self::ColumnNotFound {
            column: column.to_string(),
        }
    }
}

/// Result type for NSFG reader operations
pub type Result<T> = std::result::Result<T, NsfgError>;
