//! Quote synchronization engine.
//!
//! This module provides the `SyncService` which owns the in-memory
//! collection and orchestrates reconciliation between it, the durable
//! store, and the remote source.
//!
//! # Architecture
//!
//! ```text
//! SyncService
//!       │
//!       ├─► RemoteSourceTrait (fetch/publish via remote crate)
//!       ├─► CollectionStore   (persist the collection)
//!       └─► SyncCheckpoint    (observability only)
//! ```
//!
//! # Conflict policy
//!
//! Remote wins on overlap, local wins on novelty: a remote record whose
//! text matches a local one overwrites that record's attributes; a remote
//! record nobody has locally is appended; a local record the remote does
//! not know survives untouched. The rule is keyed purely by text identity,
//! so it is deterministic and order-independent.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::model::{self, quote_key, seed_quotes, Quote, QuoteDraft};
use super::store::CollectionStore;
use crate::errors::{Error, Result};
use crate::remote::RemoteSourceTrait;

// =============================================================================
// Reconcile guard
// =============================================================================

/// RAII guard for the single in-progress reconciliation slot.
///
/// The flag is released when the guard drops, so it is cleared on every
/// exit path of `reconcile()` - success, failure, or panic.
struct ReconcileGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ReconcileGuard<'a> {
    /// Try to claim the slot. Returns None if a reconciliation is
    /// already running.
    fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .is_ok()
            .then_some(Self { flag })
    }
}

impl Drop for ReconcileGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

// =============================================================================
// Checkpoint and report types
// =============================================================================

/// Marker of the last successful reconciliation. Observability only -
/// it plays no part in conflict resolution, since remote records carry
/// no version metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncCheckpoint {
    /// When the reconciliation completed.
    pub completed_at: DateTime<Utc>,
    /// Number of successful reconciliations since process start.
    pub runs: u64,
}

/// Outcome classification of one `reconcile()` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileStatus {
    /// Merge ran and the result was persisted.
    Completed,
    /// Another reconciliation was in flight; this call did nothing.
    AlreadyInProgress,
    /// The remote fetch failed; the collection was left untouched.
    RemoteUnavailable(String),
}

/// Report of a single reconciliation run.
#[derive(Debug, Clone)]
pub struct ReconcileReport {
    pub status: ReconcileStatus,
    /// Records received from the remote source (after adapter-side filtering).
    pub remote_seen: usize,
    /// Remote records appended because no local text matched.
    pub added: usize,
    /// Local records whose attributes were overwritten by the remote.
    pub updated: usize,
    /// Whether the best-effort publish step delivered a record.
    pub published: bool,
    /// Publish failure, if any. Never fatal to the run.
    pub publish_error: Option<String>,
}

impl ReconcileReport {
    fn already_in_progress() -> Self {
        Self {
            status: ReconcileStatus::AlreadyInProgress,
            remote_seen: 0,
            added: 0,
            updated: 0,
            published: false,
            publish_error: None,
        }
    }

    fn remote_unavailable(message: String) -> Self {
        Self {
            status: ReconcileStatus::RemoteUnavailable(message),
            remote_seen: 0,
            added: 0,
            updated: 0,
            published: false,
            publish_error: None,
        }
    }

    /// True if the merge ran to completion.
    pub fn is_success(&self) -> bool {
        self.status == ReconcileStatus::Completed
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        match &self.status {
            ReconcileStatus::Completed => format!(
                "Reconciled {} remote records: {} added, {} updated{}",
                self.remote_seen,
                self.added,
                self.updated,
                if self.published { ", 1 published" } else { "" }
            ),
            ReconcileStatus::AlreadyInProgress => {
                "Reconciliation already in progress".to_string()
            }
            ReconcileStatus::RemoteUnavailable(e) => {
                format!("Remote unavailable, collection untouched: {}", e)
            }
        }
    }
}

// =============================================================================
// Merge algorithm
// =============================================================================

struct MergeOutcome {
    added: usize,
    updated: usize,
    remote_keys: HashSet<String>,
}

/// Merge a remote snapshot into the local collection.
///
/// Remote additions are never dropped; on text overlap the remote
/// category (and author, when present) overwrites the local one. The
/// final dedup keeps the first occurrence per key, which after the merge
/// pass is always the attribute-correct record - this tie-break rule is
/// load-bearing for idempotence.
fn merge_remote(local: Vec<Quote>, remote: Vec<Quote>) -> (Vec<Quote>, MergeOutcome) {
    let mut merged = local;
    let mut index: HashMap<String, usize> = merged
        .iter()
        .enumerate()
        .map(|(i, q)| (q.key(), i))
        .collect();

    let mut outcome = MergeOutcome {
        added: 0,
        updated: 0,
        remote_keys: HashSet::new(),
    };

    for remote_quote in remote {
        let key = remote_quote.key();
        if let Some(&i) = index.get(&key) {
            let existing = &mut merged[i];
            let changed = existing.category != remote_quote.category
                || (remote_quote.author.is_some() && existing.author != remote_quote.author);
            if changed {
                existing.category = remote_quote.category;
                if remote_quote.author.is_some() {
                    existing.author = remote_quote.author;
                }
                outcome.updated += 1;
            }
        } else {
            index.insert(key.clone(), merged.len());
            merged.push(remote_quote);
            outcome.added += 1;
        }
        outcome.remote_keys.insert(key);
    }

    let mut seen = HashSet::new();
    merged.retain(|q| seen.insert(q.key()));

    (merged, outcome)
}

// =============================================================================
// Sync Service
// =============================================================================

/// The synchronization engine.
///
/// Sole owner of the canonical collection: all mutation (local add,
/// reconciliation merge) is serialized through this service, and every
/// other component receives read-only snapshots.
pub struct SyncService<S, R>
where
    S: CollectionStore,
    R: RemoteSourceTrait,
{
    store: Arc<S>,
    remote: Arc<R>,
    /// Upper bound on records requested per remote fetch.
    fetch_limit: usize,
    /// The canonical collection. Insertion order is display order only.
    collection: RwLock<Vec<Quote>>,
    /// Guard preventing overlapping reconciliation runs. Shared by the
    /// periodic timer and on-demand callers.
    in_progress: AtomicBool,
    checkpoint: RwLock<Option<SyncCheckpoint>>,
    /// Most recently added local-only quote, for the best-effort
    /// publish step of the next reconciliation.
    pending_publish: RwLock<Option<Quote>>,
}

impl<S, R> SyncService<S, R>
where
    S: CollectionStore + 'static,
    R: RemoteSourceTrait + 'static,
{
    pub fn new(store: Arc<S>, remote: Arc<R>, fetch_limit: usize) -> Self {
        Self {
            store,
            remote,
            fetch_limit,
            collection: RwLock::new(Vec::new()),
            in_progress: AtomicBool::new(false),
            checkpoint: RwLock::new(None),
            pending_publish: RwLock::new(None),
        }
    }

    /// Populate the collection from the store, falling back to the
    /// built-in seed set (which is then persisted). Returns the number
    /// of records loaded.
    ///
    /// Stored data is sanitized on the way in: entries failing
    /// validation are dropped and text duplicates collapse to the first
    /// occurrence, so legacy payloads cannot break the invariants.
    pub async fn load_or_seed(&self) -> Result<usize> {
        let quotes = match self.store.load_collection()? {
            Some(stored) if !stored.is_empty() => sanitize(stored),
            _ => {
                let seeds = seed_quotes();
                self.store.save_collection(&seeds).await?;
                debug!("No stored collection found, seeded {} quotes", seeds.len());
                seeds
            }
        };
        let len = quotes.len();
        *self.collection.write().await = quotes;
        Ok(len)
    }

    /// Validate and append a new quote.
    ///
    /// Rejects a case-insensitive text duplicate with
    /// [`Error::DuplicateQuote`] and writes through to the store on
    /// success, so the quote is durable and eligible for the next
    /// reconciliation pass.
    pub async fn add_quote(
        &self,
        text: &str,
        category: &str,
        author: Option<&str>,
    ) -> Result<Quote> {
        let mut draft = QuoteDraft::new(text, category);
        draft.author = author.map(str::to_string);
        self.add_draft(draft).await
    }

    /// Validate a draft and append it. See [`Self::add_quote`].
    pub async fn add_draft(&self, draft: QuoteDraft) -> Result<Quote> {
        let quote = model::validate(draft)?;
        self.insert(quote).await
    }

    pub(crate) async fn insert(&self, quote: Quote) -> Result<Quote> {
        let mut collection = self.collection.write().await;
        let key = quote.key();
        if collection.iter().any(|q| q.key() == key) {
            return Err(Error::DuplicateQuote(quote.text));
        }
        collection.push(quote.clone());
        if let Err(e) = self.store.save_collection(&collection).await {
            // Keep memory consistent with the durable state.
            collection.pop();
            return Err(e);
        }
        drop(collection);

        *self.pending_publish.write().await = Some(quote.clone());
        Ok(quote)
    }

    /// Run one reconciliation pass against the remote source.
    ///
    /// Idempotent for an unchanged remote. A concurrent call while one
    /// is running returns immediately with
    /// [`ReconcileStatus::AlreadyInProgress`] rather than queuing. A
    /// failed fetch aborts with the collection untouched; a failed
    /// persist leaves the in-memory collection unchanged and surfaces
    /// the error.
    pub async fn reconcile(&self) -> Result<ReconcileReport> {
        let _guard = match ReconcileGuard::try_acquire(&self.in_progress) {
            Some(guard) => guard,
            None => {
                debug!("Skipping reconcile - another run is in flight");
                return Ok(ReconcileReport::already_in_progress());
            }
        };

        let remote_quotes = match self.remote.fetch_quotes(self.fetch_limit).await {
            Ok(quotes) => quotes,
            // A transient failure clears on its own; a later scheduled
            // run retries it, so it is not worth a warning.
            Err(e) if e.is_transient() => {
                debug!("Remote fetch failed (transient), aborting reconcile: {}", e);
                return Ok(ReconcileReport::remote_unavailable(e.to_string()));
            }
            Err(e) => {
                warn!("Remote fetch failed, aborting reconcile: {}", e);
                return Ok(ReconcileReport::remote_unavailable(e.to_string()));
            }
        };
        let remote_seen = remote_quotes.len();

        // Merge and persist under the write lock so a local add can land
        // before or after this pass, never inside it.
        let outcome = {
            let mut collection = self.collection.write().await;
            let (merged, outcome) = merge_remote(collection.clone(), remote_quotes);
            self.store.save_collection(&merged).await?;
            *collection = merged;
            outcome
        };

        {
            let mut checkpoint = self.checkpoint.write().await;
            let runs = checkpoint.map(|c| c.runs).unwrap_or(0) + 1;
            *checkpoint = Some(SyncCheckpoint {
                completed_at: Utc::now(),
                runs,
            });
        }

        let (published, publish_error) = self.publish_pending(&outcome.remote_keys).await;

        let report = ReconcileReport {
            status: ReconcileStatus::Completed,
            remote_seen,
            added: outcome.added,
            updated: outcome.updated,
            published,
            publish_error,
        };
        debug!("{}", report.summary());
        Ok(report)
    }

    /// Best-effort publish of the most recently added local-only quote.
    /// Failure is reported, never propagated - the reconciliation that
    /// triggered it has already succeeded.
    async fn publish_pending(&self, remote_keys: &HashSet<String>) -> (bool, Option<String>) {
        let pending = {
            let guard = self.pending_publish.read().await;
            guard.clone()
        };
        let Some(quote) = pending else {
            return (false, None);
        };

        if remote_keys.contains(&quote.key()) {
            // The remote already knows this record; nothing to announce.
            self.clear_pending_if_matches(&quote).await;
            return (false, None);
        }

        match self.remote.publish(&quote).await {
            Ok(()) => {
                self.clear_pending_if_matches(&quote).await;
                (true, None)
            }
            Err(e) => {
                warn!("Best-effort publish failed (will retry next run): {}", e);
                (false, Some(e.to_string()))
            }
        }
    }

    /// Release the pending-publish slot only if it still holds the
    /// record that was just delivered. An add that landed meanwhile
    /// keeps its slot and is published on the next run.
    async fn clear_pending_if_matches(&self, delivered: &Quote) {
        let mut pending = self.pending_publish.write().await;
        if pending.as_ref().map(Quote::key) == Some(delivered.key()) {
            *pending = None;
        }
    }

    /// Arrange for `reconcile()` to run repeatedly. A tick that fires
    /// while a run is still in flight is skipped, not queued - the
    /// periodic timer shares the same in-progress guard as on-demand
    /// callers.
    pub fn spawn_periodic(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            debug!("Periodic reconcile scheduler started ({:?} interval)", every);
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately; skip it so the
            // caller decides when the initial reconcile happens.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                match service.reconcile().await {
                    Ok(report) => match report.status {
                        ReconcileStatus::Completed => debug!("{}", report.summary()),
                        ReconcileStatus::AlreadyInProgress => {
                            debug!("Scheduled reconcile skipped - previous run still in flight")
                        }
                        ReconcileStatus::RemoteUnavailable(ref e) => {
                            warn!("Scheduled reconcile aborted: {}", e)
                        }
                    },
                    Err(e) => warn!("Scheduled reconcile failed: {}", e),
                }
            }
        })
    }

    /// Read-only copy of the collection for the query layer and
    /// presentation.
    pub async fn snapshot(&self) -> Vec<Quote> {
        self.collection.read().await.clone()
    }

    /// Checkpoint of the last successful reconciliation, if any.
    pub async fn checkpoint(&self) -> Option<SyncCheckpoint> {
        *self.checkpoint.read().await
    }

    #[cfg(test)]
    fn lock_in_progress(&self) -> bool {
        self.in_progress
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .is_ok()
    }

    #[cfg(test)]
    fn unlock_in_progress(&self) {
        self.in_progress.store(false, Ordering::Release);
    }
}

/// Drop invalid entries and collapse text duplicates to the first
/// occurrence.
fn sanitize(quotes: Vec<Quote>) -> Vec<Quote> {
    let mut seen = HashSet::new();
    quotes
        .into_iter()
        .filter(|q| !quote_key(&q.text).is_empty() && !q.category.trim().is_empty())
        .filter(|q| seen.insert(q.key()))
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
