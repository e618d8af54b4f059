//! Remote endpoint configuration.

use std::time::Duration;

/// Default endpoint, the public mock API the original data set came from.
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";

/// Default bound on a single fetch or publish call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for [`crate::HttpRemoteSource`].
#[derive(Debug, Clone)]
pub struct RemoteSourceConfig {
    /// URL serving the JSON array (GET) and accepting publishes (POST).
    pub endpoint: String,
    /// Per-request timeout; a slower call resolves to a timeout error
    /// instead of hanging.
    pub timeout: Duration,
}

impl Default for RemoteSourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RemoteSourceConfig {
    /// Build from the environment, falling back to defaults:
    /// `QUOTEVAULT_REMOTE_URL` and `QUOTEVAULT_REMOTE_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let endpoint = std::env::var("QUOTEVAULT_REMOTE_URL")
            .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let timeout = std::env::var("QUOTEVAULT_REMOTE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        Self { endpoint, timeout }
    }
}
