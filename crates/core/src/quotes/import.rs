//! Collection import and export.
//!
//! The import surface accepts a byte stream holding a JSON array of
//! objects; every element passes through record validation
//! independently, so a batch with some invalid entries still imports
//! the valid ones and reports the counts. Export produces the
//! pretty-printed JSON serialization of a collection snapshot.

use log::debug;
use serde_json::Value;

use super::model::Quote;
use super::store::CollectionStore;
use super::sync::SyncService;
use crate::errors::{Error, Result, ValidationError};
use crate::remote::RemoteSourceTrait;

/// Counts reported by one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Records validated and added to the collection.
    pub imported: usize,
    /// Records that failed validation.
    pub rejected: usize,
    /// Valid records skipped because their text already exists.
    pub duplicates: usize,
}

impl ImportSummary {
    pub fn summary(&self) -> String {
        format!(
            "Imported {} quotes ({} rejected, {} duplicates)",
            self.imported, self.rejected, self.duplicates
        )
    }
}

/// Import a JSON array of quote objects through the sync engine, so
/// every accepted record is validated, deduplicated, and persisted.
pub async fn import_quotes<S, R>(
    service: &SyncService<S, R>,
    bytes: &[u8],
) -> Result<ImportSummary>
where
    S: CollectionStore + 'static,
    R: RemoteSourceTrait + 'static,
{
    let parsed: Value = serde_json::from_slice(bytes)?;
    let Value::Array(entries) = parsed else {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "expected a JSON array of quote objects".to_string(),
        )));
    };

    let mut report = ImportSummary::default();
    for entry in &entries {
        match Quote::from_value(entry) {
            Ok(quote) => match service.insert(quote).await {
                Ok(_) => report.imported += 1,
                Err(Error::DuplicateQuote(text)) => {
                    debug!("Import skipped duplicate quote: {}", text);
                    report.duplicates += 1;
                }
                Err(e) => return Err(e),
            },
            Err(e) => {
                debug!("Import rejected entry: {}", e);
                report.rejected += 1;
            }
        }
    }
    Ok(report)
}

/// Serialize a collection snapshot as pretty-printed JSON bytes.
pub fn export_quotes(quotes: &[Quote]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(quotes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::store::CollectionStore;
    use crate::remote::{RemoteError, RemoteSourceTrait};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct MemoryStore {
        saved: Mutex<Option<Vec<Quote>>>,
    }

    #[async_trait]
    impl CollectionStore for MemoryStore {
        async fn save_collection(&self, quotes: &[Quote]) -> Result<()> {
            *self.saved.lock().unwrap() = Some(quotes.to_vec());
            Ok(())
        }

        fn load_collection(&self) -> Result<Option<Vec<Quote>>> {
            Ok(self.saved.lock().unwrap().clone())
        }
    }

    struct NoRemote;

    #[async_trait]
    impl RemoteSourceTrait for NoRemote {
        async fn fetch_quotes(&self, _limit: usize) -> std::result::Result<Vec<Quote>, RemoteError> {
            Ok(Vec::new())
        }

        async fn publish(&self, _quote: &Quote) -> std::result::Result<(), RemoteError> {
            Ok(())
        }
    }

    fn engine() -> SyncService<MemoryStore, NoRemote> {
        SyncService::new(Arc::new(MemoryStore::default()), Arc::new(NoRemote), 10)
    }

    #[tokio::test]
    async fn test_import_keeps_valid_entries_and_counts_invalid() {
        let service = engine();
        let bytes = br#"[{"text":"X","category":"Y"},{"category":"onlyCategory"}]"#;

        let report = import_quotes(&service, bytes).await.unwrap();
        assert_eq!(report.imported, 1);
        assert_eq!(report.rejected, 1);
        assert_eq!(report.duplicates, 0);

        let snapshot = service.snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].text, "X");
        assert_eq!(snapshot[0].category, "Y");
    }

    #[tokio::test]
    async fn test_import_counts_duplicates_separately() {
        let service = engine();
        service.add_quote("X", "Y", None).await.unwrap();

        let bytes = br#"[{"text":"x","category":"Z"},{"text":"New","category":"Z"}]"#;
        let report = import_quotes(&service, bytes).await.unwrap();
        assert_eq!(report.imported, 1);
        assert_eq!(report.duplicates, 1);
        assert_eq!(report.rejected, 0);
    }

    #[tokio::test]
    async fn test_import_rejects_non_array_payload() {
        let service = engine();
        let err = import_quotes(&service, br#"{"text":"X"}"#).await.unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::InvalidInput(_))));

        let err = import_quotes(&service, b"not json").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_import_tolerates_structurally_wrong_elements() {
        let service = engine();
        let bytes = br#"[42, "string", {"text":"Valid","category":"C"}, null]"#;

        let report = import_quotes(&service, bytes).await.unwrap();
        assert_eq!(report.imported, 1);
        assert_eq!(report.rejected, 3);
    }

    #[tokio::test]
    async fn test_export_round_trips_through_import() {
        let service = engine();
        service.add_quote("Keep going", "Persistence", Some("anon")).await.unwrap();
        service.add_quote("Another", "Life", None).await.unwrap();
        let exported = export_quotes(&service.snapshot().await).unwrap();

        let fresh = engine();
        let report = import_quotes(&fresh, &exported).await.unwrap();
        assert_eq!(report.imported, 2);
        assert_eq!(fresh.snapshot().await, service.snapshot().await);
    }

    #[test]
    fn test_export_is_pretty_printed() {
        let quotes = vec![Quote {
            text: "X".to_string(),
            category: "Y".to_string(),
            author: None,
        }];
        let bytes = export_quotes(&quotes).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains('\n'));
        assert!(text.contains("\"text\": \"X\""));
    }
}
