//! QuoteVault Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for QuoteVault:
//! the quote model and validation rules, the synchronization engine,
//! the query/filter layer, and the settings service. It is database-
//! and HTTP-agnostic and defines traits that are implemented by the
//! `storage-sqlite` and `remote` crates.

pub mod constants;
pub mod errors;
pub mod quotes;
pub mod remote;
pub mod settings;

// Re-export the common quote types
pub use quotes::model::Quote;
pub use quotes::sync::{ReconcileReport, ReconcileStatus, SyncService};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
