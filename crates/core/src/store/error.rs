//! Error types for event persistence.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to serialize or deserialize tags: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid timestamp '{value}' in column {column}")]
    InvalidTimestamp { column: &'static str, value: String },

    #[error("Failed to prepare database location: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store lock poisoned")]
    Poisoned,

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
