use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a single input line is rejected by the record parser
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Missing field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid timestamp '{value}': expected YYYY-MM-DD HH:MM:SS")]
    InvalidTimestamp { value: String },

    #[error("Invalid quantity '{value}': expected a non-negative integer")]
    InvalidQuantity { value: String },
}

/// Errors raised while loading order records from a source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Cannot read order source {path:?}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to detector configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid window: {window_ms}ms (must be >= 0)")]
    InvalidWindow { window_ms: i64 },

    #[error("Invalid cancel ratio threshold: {ratio} (must be between 0 and 1)")]
    InvalidRatio { ratio: Decimal },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("Cannot read config file {path:?}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config file {path:?}: {reason}")]
    Malformed { path: PathBuf, reason: String },
}
