//! Repository trait for settings.

use async_trait::async_trait;

use crate::errors::Result;

/// Repository trait for small scalar settings, addressed by string key.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    /// Get a single setting value by key. Absent keys surface as
    /// `DatabaseError::NotFound`.
    fn get_setting(&self, setting_key: &str) -> Result<String>;

    /// Update (or create) a single setting.
    async fn update_setting(&self, setting_key: &str, setting_value: &str) -> Result<()>;
}
