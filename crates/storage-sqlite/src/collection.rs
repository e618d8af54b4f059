//! Collection persistence over the key-value table.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use quotevault_core::errors::{DatabaseError, Error, Result};
use quotevault_core::quotes::model::Quote;
use quotevault_core::quotes::store::CollectionStore;

use crate::db::Database;
use crate::errors::StorageError;

/// Row key under which the serialized collection lives.
const COLLECTION_KEY: &str = "quotes";

/// [`CollectionStore`] backed by SQLite.
///
/// The whole collection is one JSON payload replaced in a single upsert
/// inside a transaction, so a reader never observes a half-written
/// collection.
pub struct SqliteCollectionStore {
    db: Database,
}

impl SqliteCollectionStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CollectionStore for SqliteCollectionStore {
    async fn save_collection(&self, quotes: &[Quote]) -> Result<()> {
        let payload = serde_json::to_string(quotes).map_err(StorageError::from)?;
        let mut conn = self.db.conn();
        let tx = conn.transaction().map_err(StorageError::from)?;
        tx.execute(
            "INSERT INTO collection (key, payload) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET payload = excluded.payload",
            params![COLLECTION_KEY, payload],
        )
        .map_err(StorageError::from)?;
        tx.commit()
            .map_err(|e| Error::Database(DatabaseError::TransactionFailed(e.to_string())))?;
        Ok(())
    }

    fn load_collection(&self) -> Result<Option<Vec<Quote>>> {
        let conn = self.db.conn();
        let payload: Option<String> = conn
            .query_row(
                "SELECT payload FROM collection WHERE key = ?1",
                params![COLLECTION_KEY],
                |row| row.get(0),
            )
            .optional()
            .map_err(StorageError::from)?;
        match payload {
            Some(json) => {
                let quotes = serde_json::from_str(&json).map_err(StorageError::from)?;
                Ok(Some(quotes))
            }
            None => Ok(None),
        }
    }
}
