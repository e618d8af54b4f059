//! Remote source contract.
//!
//! The synchronization engine only speaks this trait; the translation
//! between whatever shape the remote endpoint uses and the [`Quote`]
//! model is internal to the implementing adapter (see the `remote`
//! crate). Both operations are bounded in time and report failures as
//! values - nothing escapes this boundary as a panic.

use async_trait::async_trait;
use thiserror::Error;

use crate::quotes::model::Quote;

/// Errors from the remote source adapter.
///
/// String payloads keep this type HTTP-library-agnostic; the adapter
/// converts its transport errors into this format at the boundary.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Remote returned status {code}: {message}")]
    Status { code: u16, message: String },

    #[error("Invalid remote payload: {0}")]
    InvalidPayload(String),
}

impl RemoteError {
    /// Returns true if this error is transient and a later scheduled
    /// reconciliation may succeed without intervention.
    pub fn is_transient(&self) -> bool {
        matches!(self, RemoteError::Network(_) | RemoteError::Timeout(_))
    }
}

/// Trait for the remote authoritative source of quotes.
#[async_trait]
pub trait RemoteSourceTrait: Send + Sync {
    /// Fetch up to `limit` records, already translated into the quote
    /// model. Malformed remote records are filtered out record-by-record,
    /// not surfaced as a batch failure.
    async fn fetch_quotes(&self, limit: usize) -> Result<Vec<Quote>, RemoteError>;

    /// Best-effort publish of one locally-added quote. Only an
    /// acknowledgment is expected; the response body is not interpreted.
    async fn publish(&self, quote: &Quote) -> Result<(), RemoteError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors_are_network_and_timeout() {
        assert!(RemoteError::Network("connection refused".to_string()).is_transient());
        assert!(RemoteError::Timeout("10s elapsed".to_string()).is_transient());
    }

    #[test]
    fn test_status_and_payload_errors_are_not_transient() {
        let status = RemoteError::Status {
            code: 404,
            message: "Not Found".to_string(),
        };
        assert!(!status.is_transient());
        assert!(!RemoteError::InvalidPayload("not an array".to_string()).is_transient());
    }
}
