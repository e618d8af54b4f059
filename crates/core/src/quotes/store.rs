//! Persistence contract for the quote collection.
//!
//! Pure load/save - no merge logic lives here. The storage crate
//! implements this trait; the sync engine is the only writer.

use async_trait::async_trait;

use super::model::Quote;
use crate::errors::Result;

/// Durable store for the canonical collection.
///
/// `save_collection` must be atomic from the caller's point of view:
/// a concurrent `load_collection` never observes a half-written
/// collection. Save failures are surfaced, never swallowed - the sync
/// engine depends on that durability signal.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Persist the full collection, replacing whatever was stored.
    async fn save_collection(&self, quotes: &[Quote]) -> Result<()>;

    /// Load the stored collection. `Ok(None)` means nothing has been
    /// persisted yet (first run).
    fn load_collection(&self) -> Result<Option<Vec<Quote>>>;
}
