use std::sync::Arc;

use scorecard_core::model::InterviewSettings;
use storage::codec;
use storage::keys;
use storage::repository::{KeyValueStore, StorageError};

#[derive(Clone)]
pub struct SettingsService {
    kv: Arc<dyn KeyValueStore>,
}

impl SettingsService {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Load persisted settings (or defaults if missing or malformed), clamped.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn load(&self) -> Result<InterviewSettings, StorageError> {
        let settings: InterviewSettings =
            codec::load_or_default(self.kv.as_ref(), keys::SETTINGS).await?;
        Ok(settings.normalized())
    }

    /// Clamp and persist new settings, returning what was stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    pub async fn save(
        &self,
        settings: InterviewSettings,
    ) -> Result<InterviewSettings, StorageError> {
        let settings = settings.normalized();
        codec::save(self.kv.as_ref(), keys::SETTINGS, &settings).await?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryStore;

    #[tokio::test]
    async fn missing_or_malformed_settings_use_defaults() {
        let kv = InMemoryStore::new();
        let service = SettingsService::new(Arc::new(kv.clone()));
        assert_eq!(service.load().await.unwrap(), InterviewSettings::default());

        kv.set(keys::SETTINGS, "nope").await.unwrap();
        assert_eq!(service.load().await.unwrap(), InterviewSettings::default());
    }

    #[tokio::test]
    async fn save_clamps_out_of_range_values() {
        let service = SettingsService::new(Arc::new(InMemoryStore::new()));
        let stored = service
            .save(InterviewSettings {
                max_questions_per_category: 99,
                max_total_questions: 0,
                selected_template: "senior".into(),
            })
            .await
            .unwrap();
        assert_eq!(stored.max_questions_per_category, 10);
        assert_eq!(stored.max_total_questions, 1);
        assert_eq!(service.load().await.unwrap(), stored);
    }
}
