//! Environment-driven configuration for the CLI.

use std::time::Duration;

use quotevault_core::constants::{DEFAULT_FETCH_LIMIT, DEFAULT_SYNC_INTERVAL_SECS};
use quotevault_remote::RemoteSourceConfig;

pub struct Config {
    /// Path of the SQLite database file.
    pub db_path: String,
    /// Remote endpoint settings.
    pub remote: RemoteSourceConfig,
    /// Upper bound on records per remote fetch.
    pub fetch_limit: usize,
    /// Interval between scheduled reconciliations in `watch` mode.
    pub sync_interval: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let db_path = std::env::var("QUOTEVAULT_DB_PATH")
            .unwrap_or_else(|_| "quotevault.db".to_string());
        let fetch_limit = std::env::var("QUOTEVAULT_FETCH_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_FETCH_LIMIT);
        let sync_interval = std::env::var("QUOTEVAULT_SYNC_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_SYNC_INTERVAL_SECS));

        Self {
            db_path,
            remote: RemoteSourceConfig::from_env(),
            fetch_limit,
            sync_interval,
        }
    }
}
