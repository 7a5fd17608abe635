//! Error types for swmanifest
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{FsError, StoreError};
use crate::domain::services::ValidationReport;

/// Result type alias for swmanifest operations
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Main error type for swmanifest operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File system port error
    #[error(transparent)]
    Fs(#[from] FsError),

    /// Manifest text could not be decoded
    #[error("failed to parse manifest{}: {message}", location(.line, .column))]
    Parse {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },

    /// Manifest decoded but breaks one or more structural rules
    #[error("manifest is invalid: {0}")]
    Invalid(ValidationReport),

    /// Stored manifest could not be read or written
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration file is malformed
    #[error("invalid config in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// A configuration value is out of range
    #[error("invalid setting '{key}': {message}")]
    InvalidSetting { key: String, message: String },
}

fn location(line: &Option<usize>, column: &Option<usize>) -> String {
    match (*line, *column) {
        (Some(line), Some(column)) => format!(" at line {line}, column {column}"),
        (Some(line), None) => format!(" at line {line}"),
        _ => String::new(),
    }
}

impl From<serde_json::Error> for ManifestError {
    fn from(err: serde_json::Error) -> Self {
        let (line, column) = if err.line() == 0 {
            (None, None)
        } else {
            (Some(err.line()), Some(err.column()))
        };
        let message = err.to_string();
        let message = match message.rsplit_once(" at line ") {
            Some((head, _)) if line.is_some() => head.to_string(),
            _ => message,
        };
        ManifestError::Parse {
            message,
            line,
            column,
        }
    }
}
