/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// A stored timestamp could not be converted back into a date
    #[error("Invalid timestamp in column {column}: {value}")]
    InvalidTimestamp { column: &'static str, value: i64 },

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StorageError> for roster_core::RosterError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Database(e) => roster_core::RosterError::Database(e.to_string()),
            other => roster_core::RosterError::storage(other.to_string()),
        }
    }
}
