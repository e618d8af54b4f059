//! Core error types for QuoteVault.
//!
//! This module defines storage-agnostic error types. Storage-specific
//! errors (from rusqlite, serde_json, etc.) are converted to these types
//! by the storage layer, and HTTP errors by the remote adapter.

use thiserror::Error;

use crate::remote::RemoteError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A local add collided with an existing quote text. The add is
    /// rejected rather than silently merged so the caller keeps its intent.
    #[error("A quote with the same text already exists: {0}")]
    DuplicateQuote(String),

    #[error("Remote source operation failed: {0}")]
    Remote(#[from] RemoteError),

    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage
/// layer to convert storage-specific errors into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open or connect to the backing store.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// A query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record or setting was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A transaction failed to commit.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Stored payload could not be serialized or deserialized.
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// Validation errors for user input and remote payloads.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A required field is absent or blank.
    #[error("Required field '{0}' is missing")]
    MissingField(String),

    /// The input is structurally wrong (not an object, wrong field types).
    /// Kept distinct from `MissingField` so callers can tell a malformed
    /// payload apart from an incomplete one.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
