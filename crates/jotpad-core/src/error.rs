//! Error types for jotpad-core

use thiserror::Error;

/// Result type alias using jotpad-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in jotpad-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Key-value backend failed to read or write
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
