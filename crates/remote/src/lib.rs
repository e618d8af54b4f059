//! HTTP remote source adapter for QuoteVault.
//!
//! This crate is the only place that knows the remote endpoint's wire
//! shape. It implements `quotevault_core::remote::RemoteSourceTrait`
//! over plain HTTP(S): a GET returning a JSON array of records, and a
//! JSON POST for the best-effort publish. All transport failures are
//! converted to `RemoteError` values at this boundary.

mod config;
mod http;

pub use config::RemoteSourceConfig;
pub use http::HttpRemoteSource;
