//! Error types for kaksha-nav.

use kaksha_map::MapError;
use thiserror::Error;

/// Navigation error type.
///
/// `LocationNotFound` and `NoPath` are routine outcomes in a dynamic
/// environment - callers branch on them, nothing panics.
#[derive(Error, Debug)]
pub enum NavError {
    #[error("no location named {0:?}")]
    LocationNotFound(String),

    #[error("no path from ({from_x}, {from_y}) to {target:?}")]
    NoPath {
        from_x: i32,
        from_y: i32,
        target: String,
    },

    #[error("map error: {0}")]
    Map(#[from] MapError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for NavError {
    fn from(e: toml::de::Error) -> Self {
        NavError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
