//! Scalar application settings (selected filter, last viewed pointer).

mod settings_service;
mod settings_traits;

pub use settings_service::{SettingsService, SettingsServiceTrait};
pub use settings_traits::SettingsRepositoryTrait;
