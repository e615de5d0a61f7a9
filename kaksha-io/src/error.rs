//! Error types for kaksha-io.

use thiserror::Error;

/// Hardware IO error type.
#[derive(Error, Debug)]
pub enum IoError {
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(String),
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::Protocol(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IoError>;
