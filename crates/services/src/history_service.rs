use std::sync::Arc;

use scorecard_core::model::{HistoryEntry, HistoryId, RecommendationFilter};
use storage::codec;
use storage::keys;
use storage::repository::{KeyValueStore, StorageError};

use crate::Clock;
use crate::interview::InterviewSession;

/// Filter applied when browsing history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    /// Matched case-insensitively against candidate and interviewer names.
    pub search: String,
    pub recommendation: RecommendationFilter,
}

/// Serialized history ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryExport {
    pub file_name: String,
    pub json: String,
}

/// Append-only record of completed interviews, newest first.
#[derive(Clone)]
pub struct HistoryService {
    clock: Clock,
    kv: Arc<dyn KeyValueStore>,
}

impl HistoryService {
    #[must_use]
    pub fn new(clock: Clock, kv: Arc<dyn KeyValueStore>) -> Self {
        Self { clock, kv }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn list(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        codec::load_or_default(self.kv.as_ref(), keys::HISTORY).await
    }

    /// Prepend an entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read or written.
    pub async fn append(&self, entry: HistoryEntry) -> Result<(), StorageError> {
        let mut entries = self.list().await?;
        entries.insert(0, entry);
        codec::save(self.kv.as_ref(), keys::HISTORY, &entries).await
    }

    /// Summarize `session` and append it, returning the stored entry.
    ///
    /// Callers are expected to have validated the session first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read or written.
    pub async fn record(&self, session: &InterviewSession) -> Result<HistoryEntry, StorageError> {
        let now = self.clock.now();
        let mut entries = self.list().await?;
        let mut id = now.timestamp_millis();
        while entries.iter().any(|entry| entry.id.value() == id) {
            id = id.saturating_add(1);
        }
        let entry = session.to_history_entry(HistoryId::new(id), now);
        entries.insert(0, entry.clone());
        codec::save(self.kv.as_ref(), keys::HISTORY, &entries).await?;
        Ok(entry)
    }

    /// Remove one entry. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read or written.
    pub async fn delete(&self, id: HistoryId) -> Result<bool, StorageError> {
        let mut entries = self.list().await?;
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        if entries.len() == before {
            return Ok(false);
        }
        codec::save(self.kv.as_ref(), keys::HISTORY, &entries).await?;
        Ok(true)
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    pub async fn clear_all(&self) -> Result<(), StorageError> {
        self.kv.remove(keys::HISTORY).await
    }

    /// Entries matching both the name search and the recommendation bucket.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn filter(&self, query: &HistoryQuery) -> Result<Vec<HistoryEntry>, StorageError> {
        let needle = query.search.trim().to_lowercase();
        let mut entries = self.list().await?;
        entries.retain(|entry| {
            entry.matches_search(&needle) && query.recommendation.matches(entry.recommendation)
        });
        Ok(entries)
    }

    /// Render the full history as pretty JSON with a dated file name.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read or the list cannot be encoded.
    pub async fn export(&self) -> Result<HistoryExport, StorageError> {
        let entries = self.list().await?;
        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(HistoryExport {
            file_name: format!(
                "interview-history-{}.json",
                self.clock.today().format("%Y-%m-%d")
            ),
            json,
        })
    }
}
