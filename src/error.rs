//! Error types for typhoon-track

use crate::source::FetchError;
use thiserror::Error;

/// Main error type for typhoon-track operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported source: {0}")]
    UnsupportedSource(String),

    #[error("Invalid time range: {start}h to {end}h")]
    InvalidRange { start: i64, end: i64 },

    #[error("Cannot compute movement speed: points share the same timestamp")]
    IndeterminateSpeed,

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for typhoon-track operations
pub type Result<T> = std::result::Result<T, Error>;
