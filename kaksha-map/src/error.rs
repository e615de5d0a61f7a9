//! Error types for kaksha-map.

use thiserror::Error;

/// Map error type.
///
/// `LocationNotFound` is an ordinary, expected outcome of name lookups in
/// a dynamic environment and is surfaced as a value, never a panic.
/// `InvalidFormat` indicates malformed persisted data and fails fast.
#[derive(Error, Debug)]
pub enum MapError {
    #[error("no location named {0:?}")]
    LocationNotFound(String),

    #[error("invalid location: {0}")]
    InvalidLocation(String),

    #[error("invalid map format: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MapError>;
