//! Error types for colormap parsing and import.

use std::path::PathBuf;
use thiserror::Error;

/// Malformed colormap text. Parsing never returns a partial colormap.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FormatError {
    #[error("missing '# units:' directive")]
    MissingUnits,

    #[error("line {line}: expected 4 or 5 comma-separated fields, found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("line {line}: invalid {field} '{text}'")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        text: String,
    },

    #[error("line {line}: {field} {value} outside {min}..={max}")]
    OutOfRange {
        line: usize,
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// Errors from loading colormap files.
#[derive(Debug, Error)]
pub enum ColormapError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
}

/// Errors converting a Windy color scale.
#[derive(Debug, Error)]
pub enum WindyImportError {
    #[error("invalid windy color scale JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("entry {index}: expected 4 color channels, found {found}")]
    ChannelCount { index: usize, found: usize },

    #[error("entry {index}: channel value {value} outside 0..=255")]
    ChannelRange { index: usize, value: i64 },

    #[error("entry {index}: value {value} is not finite")]
    NonFiniteValue { index: usize, value: f64 },

    #[error("units label must not be empty")]
    EmptyUnits,
}
