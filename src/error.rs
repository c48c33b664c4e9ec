//! Error taxonomy for the ingestion and analysis pipeline.

use thiserror::Error;

/// Failure of a whole source fetch. Stored verbatim as the cache's last error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// Timeout, connection failure or non-2xx response.
    #[error("Network error: {0}")]
    Network(String),

    /// The provider page no longer has the expected container, rows or cells.
    #[error("Source format error: {0}")]
    SourceFormat(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SourceError::Network(format!("request timed out: {}", e))
        } else if let Some(status) = e.status() {
            SourceError::Network(format!("unexpected status {}", status))
        } else {
            SourceError::Network(e.to_string())
        }
    }
}

/// A single cell did not match the expected numeric or date pattern.
///
/// Never fatal to a batch: adapters turn it into the "unavailable" sentinel
/// or drop the offending row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueParseError {
    #[error("Unparseable price token: '{0}'")]
    Price(String),

    #[error("Unparseable date token: '{0}'")]
    Date(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("Unknown quote source '{0}' (expected 'mfd' or 'cbr')")]
    UnknownSource(String),
}
