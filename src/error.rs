//! Error types for liuren

use thiserror::Error;

/// Result type alias using liuren Error
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{name} must be a positive integer, got {value}")]
    InvalidNumber { name: &'static str, value: i64 },

    #[error("Interpretation failed: {0}")]
    Interpretation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
