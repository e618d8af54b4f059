//! Settings persistence, one row per key.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use quotevault_core::errors::{DatabaseError, Error, Result};
use quotevault_core::settings::SettingsRepositoryTrait;

use crate::db::Database;
use crate::errors::StorageError;

pub struct SqliteSettingsRepository {
    db: Database,
}

impl SqliteSettingsRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SettingsRepositoryTrait for SqliteSettingsRepository {
    fn get_setting(&self, setting_key: &str) -> Result<String> {
        let conn = self.db.conn();
        conn.query_row(
            "SELECT setting_value FROM app_settings WHERE setting_key = ?1",
            params![setting_key],
            |row| row.get(0),
        )
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| Error::Database(DatabaseError::NotFound(setting_key.to_string())))
    }

    async fn update_setting(&self, setting_key: &str, setting_value: &str) -> Result<()> {
        let conn = self.db.conn();
        conn.execute(
            "REPLACE INTO app_settings (setting_key, setting_value) VALUES (?1, ?2)",
            params![setting_key, setting_value],
        )
        .map_err(StorageError::from)?;
        Ok(())
    }
}
