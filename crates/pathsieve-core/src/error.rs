//! Error types for pathsieve.

use thiserror::Error;

/// pathsieve error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Scanner error: {0}")]
    Scanner(String),
}

/// Result type alias for pathsieve operations.
pub type Result<T> = std::result::Result<T, Error>;
