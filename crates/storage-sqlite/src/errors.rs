//! Storage-specific errors and their conversion to core error types.

use thiserror::Error;

use quotevault_core::errors::{DatabaseError, Error};

/// Errors raised inside the SQLite adapter. Converted to the core's
/// database-agnostic [`DatabaseError`] at the trait boundary.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Payload serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        let db_err = match err {
            StorageError::Sqlite(rusqlite::Error::QueryReturnedNoRows) => {
                DatabaseError::NotFound("no rows returned".to_string())
            }
            StorageError::Sqlite(e) => DatabaseError::QueryFailed(e.to_string()),
            StorageError::Serde(e) => DatabaseError::Serialization(e.to_string()),
            StorageError::Io(e) => DatabaseError::ConnectionFailed(e.to_string()),
        };
        Error::Database(db_err)
    }
}
