use std::sync::Arc;

use async_trait::async_trait;

use super::SettingsRepositoryTrait;
use crate::constants::{SETTING_LAST_FILTER, SETTING_LAST_VIEWED};
use crate::errors::{DatabaseError, Error, Result};
use crate::quotes::query::CategoryFilter;

/// Typed accessors over the settings repository.
#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    /// The category filter the user last selected; `All` when none was
    /// ever stored.
    fn get_last_filter(&self) -> Result<CategoryFilter>;

    async fn set_last_filter(&self, filter: &CategoryFilter) -> Result<()>;

    /// Identity key of the quote last shown to the user, if any.
    fn get_last_viewed(&self) -> Result<Option<String>>;

    async fn set_last_viewed(&self, quote_key: &str) -> Result<()>;

    /// Get a single setting value by key. Returns None if not found.
    fn get_setting_value(&self, key: &str) -> Result<Option<String>>;

    /// Set a single setting value by key.
    async fn set_setting_value(&self, key: &str, value: &str) -> Result<()>;
}

pub struct SettingsService {
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
}

impl SettingsService {
    pub fn new(settings_repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        Self {
            settings_repository,
        }
    }
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    fn get_last_filter(&self) -> Result<CategoryFilter> {
        Ok(self
            .get_setting_value(SETTING_LAST_FILTER)?
            .map(|v| CategoryFilter::parse(&v))
            .unwrap_or_default())
    }

    async fn set_last_filter(&self, filter: &CategoryFilter) -> Result<()> {
        self.settings_repository
            .update_setting(SETTING_LAST_FILTER, &filter.to_string())
            .await
    }

    fn get_last_viewed(&self) -> Result<Option<String>> {
        self.get_setting_value(SETTING_LAST_VIEWED)
    }

    async fn set_last_viewed(&self, quote_key: &str) -> Result<()> {
        self.settings_repository
            .update_setting(SETTING_LAST_VIEWED, quote_key)
            .await
    }

    fn get_setting_value(&self, key: &str) -> Result<Option<String>> {
        match self.settings_repository.get_setting(key) {
            Ok(value) => Ok(Some(value)),
            Err(Error::Database(DatabaseError::NotFound(_))) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn set_setting_value(&self, key: &str, value: &str) -> Result<()> {
        self.settings_repository.update_setting(key, value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockSettingsRepository {
        values: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl SettingsRepositoryTrait for MockSettingsRepository {
        fn get_setting(&self, setting_key: &str) -> Result<String> {
            self.values
                .lock()
                .unwrap()
                .get(setting_key)
                .cloned()
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(setting_key.to_string()))
                })
        }

        async fn update_setting(&self, setting_key: &str, setting_value: &str) -> Result<()> {
            self.values
                .lock()
                .unwrap()
                .insert(setting_key.to_string(), setting_value.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_last_filter_defaults_to_all() {
        let service = SettingsService::new(Arc::new(MockSettingsRepository::default()));
        assert_eq!(service.get_last_filter().unwrap(), CategoryFilter::All);
    }

    #[tokio::test]
    async fn test_last_filter_round_trips() {
        let service = SettingsService::new(Arc::new(MockSettingsRepository::default()));
        let filter = CategoryFilter::parse("Motivation");
        service.set_last_filter(&filter).await.unwrap();
        assert_eq!(service.get_last_filter().unwrap(), filter);

        service.set_last_filter(&CategoryFilter::All).await.unwrap();
        assert_eq!(service.get_last_filter().unwrap(), CategoryFilter::All);
    }

    #[tokio::test]
    async fn test_last_viewed_round_trips() {
        let service = SettingsService::new(Arc::new(MockSettingsRepository::default()));
        assert_eq!(service.get_last_viewed().unwrap(), None);
        service.set_last_viewed("keep going").await.unwrap();
        assert_eq!(service.get_last_viewed().unwrap().as_deref(), Some("keep going"));
    }
}
