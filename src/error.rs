use thiserror::Error;

/// Custom Result type for this crate.
pub type Result<T> = std::result::Result<T, DatasetError>;

/// The Error type for dataset loading operations.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Unknown configuration '{0}' (expected one of: source, bigbio)")]
    UnknownConfiguration(String),

    #[error("Resource '{locator}' unavailable: {reason}")]
    ResourceUnavailable { locator: String, reason: String },

    #[error("Malformed row {row}: expected {expected} columns, found {found}")]
    MalformedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Configuration validation error: {0}")]
    ConfigValidationError(String),

    #[error("CSV parsing error: {source}")]
    CsvError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Parquet writing error: {source}")]
    ParquetError {
        #[from]
        source: parquet::errors::ParquetError,
    },

    #[error("Arrow conversion error: {source}")]
    ArrowError {
        #[from]
        source: arrow::error::ArrowError,
    },

    #[error("Serialization/Deserialization error: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },
}

impl DatasetError {
    /// Wraps a fetch failure for `locator`, keeping the collaborator's message as-is.
    pub fn unavailable(locator: &str, err: impl std::fmt::Display) -> Self {
        DatasetError::ResourceUnavailable {
            locator: locator.to_string(),
            reason: err.to_string(),
        }
    }
}
