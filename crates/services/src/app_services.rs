use std::sync::Arc;

use scorecard_core::model::{InterviewSettings, QuestionSet};
use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::history_service::HistoryService;
use crate::interview::InterviewWorkflow;
use crate::question_bank::QuestionBank;
use crate::question_service::QuestionService;
use crate::settings_service::SettingsService;

/// Assembles app-facing services over one storage gateway.
#[derive(Clone)]
pub struct AppServices {
    settings: Arc<SettingsService>,
    questions: Arc<QuestionService>,
    history: Arc<HistoryService>,
    interview: Arc<InterviewWorkflow>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock))
    }

    /// Build services over a fresh in-memory store.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::from_storage(&Storage::in_memory(), clock)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock) -> Self {
        let kv = &storage.kv;
        Self {
            settings: Arc::new(SettingsService::new(Arc::clone(kv))),
            questions: Arc::new(QuestionService::new(clock, Arc::clone(kv))),
            history: Arc::new(HistoryService::new(clock, Arc::clone(kv))),
            interview: Arc::new(InterviewWorkflow::new(clock, Arc::clone(kv))),
        }
    }

    /// Current settings and the question store they generate from.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Storage` if persisted state cannot be read or written.
    pub async fn load_question_store(
        &self,
        bank: &QuestionBank,
    ) -> Result<(InterviewSettings, QuestionSet), AppServicesError> {
        let settings = self.settings.load().await?;
        let questions = self.questions.load_store(bank, &settings).await?;
        Ok((settings, questions))
    }

    #[must_use]
    pub fn settings(&self) -> Arc<SettingsService> {
        Arc::clone(&self.settings)
    }

    #[must_use]
    pub fn questions(&self) -> Arc<QuestionService> {
        Arc::clone(&self.questions)
    }

    #[must_use]
    pub fn history(&self) -> Arc<HistoryService> {
        Arc::clone(&self.history)
    }

    #[must_use]
    pub fn interview(&self) -> Arc<InterviewWorkflow> {
        Arc::clone(&self.interview)
    }
}
