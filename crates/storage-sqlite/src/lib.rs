//! SQLite persistence adapter for QuoteVault.
//!
//! This crate is the only place in the application with SQLite
//! dependencies. It implements the persistence traits defined in
//! `quotevault-core` over a small key-value layout: the collection is
//! one JSON payload, settings are one row per key.
//!
//! ```text
//! core (domain, traits)
//!         │
//!         ▼
//! storage-sqlite (this crate)
//!         │
//!         ▼
//!     SQLite DB
//! ```

pub mod collection;
pub mod db;
pub mod errors;
pub mod settings;

pub use collection::SqliteCollectionStore;
pub use db::Database;
pub use errors::StorageError;
pub use settings::SqliteSettingsRepository;
