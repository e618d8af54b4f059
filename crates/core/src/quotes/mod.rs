//! Quote domain: model, validation, synchronization, querying, import/export.

pub mod import;
pub mod model;
pub mod query;
pub mod store;
pub mod sync;

pub use import::{export_quotes, import_quotes, ImportSummary};
pub use model::{quote_key, seed_quotes, Quote, QuoteDraft};
pub use query::{by_category, categories, random_pick, CategoryFilter};
pub use store::CollectionStore;
pub use sync::{ReconcileReport, ReconcileStatus, SyncCheckpoint, SyncService};
