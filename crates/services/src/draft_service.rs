use std::sync::Arc;

use scorecard_core::model::{Draft, DraftId};
use storage::codec;
use storage::keys;
use storage::repository::{KeyValueStore, StorageError};
use tracing::debug;

use crate::Clock;
use crate::interview::InterviewSession;

/// Persists resumable snapshots of interviews in progress.
///
/// The list is stored newest-first under a single key; a separate pointer
/// records which draft the active session writes to.
#[derive(Clone)]
pub struct DraftService {
    clock: Clock,
    kv: Arc<dyn KeyValueStore>,
}

impl DraftService {
    #[must_use]
    pub fn new(clock: Clock, kv: Arc<dyn KeyValueStore>) -> Self {
        Self { clock, kv }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// All drafts in storage order. Malformed data reads as an empty list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn list(&self) -> Result<Vec<Draft>, StorageError> {
        codec::load_or_default(self.kv.as_ref(), keys::DRAFTS).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn has_drafts(&self) -> Result<bool, StorageError> {
        Ok(!self.list().await?.is_empty())
    }

    /// Fetch a draft by id. Returns `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn get(&self, id: DraftId) -> Result<Option<Draft>, StorageError> {
        Ok(self.list().await?.into_iter().find(|draft| draft.id == id))
    }

    /// Id of the draft the active session writes to, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn current_id(&self) -> Result<Option<DraftId>, StorageError> {
        match codec::load::<DraftId>(self.kv.as_ref(), keys::CURRENT_DRAFT_ID).await? {
            Some(Ok(id)) => Ok(Some(id)),
            Some(Err(err)) => {
                debug!(error = %err, "ignoring malformed current draft pointer");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Snapshot `session` into the draft list.
    ///
    /// Sessions with neither a candidate name nor questions are not saved.
    /// A session without a draft id gets one from the clock and keeps it, so
    /// repeated saves update the same entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read or written.
    pub async fn save(
        &self,
        session: &mut InterviewSession,
    ) -> Result<Option<DraftId>, StorageError> {
        if !session.is_saveable() {
            return Ok(None);
        }

        let mut drafts = self.list().await?;
        let id = match session.draft_id() {
            Some(id) => id,
            None => fresh_id(&drafts, self.clock.now_millis()),
        };
        let draft = session.to_draft(id, self.clock.now());
        upsert_into(&mut drafts, draft);

        codec::save(self.kv.as_ref(), keys::DRAFTS, &drafts).await?;
        self.set_current(id).await?;
        session.set_draft_id(id);
        debug!(draft_id = %id, "draft saved");
        Ok(Some(id))
    }

    /// Replace the draft with the same id, or prepend it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read or written.
    pub async fn upsert(&self, draft: Draft) -> Result<(), StorageError> {
        let mut drafts = self.list().await?;
        upsert_into(&mut drafts, draft);
        codec::save(self.kv.as_ref(), keys::DRAFTS, &drafts).await
    }

    /// Remove one draft. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read or written.
    pub async fn delete(&self, id: DraftId) -> Result<bool, StorageError> {
        let mut drafts = self.list().await?;
        let before = drafts.len();
        drafts.retain(|draft| draft.id != id);
        if drafts.len() == before {
            return Ok(false);
        }
        codec::save(self.kv.as_ref(), keys::DRAFTS, &drafts).await?;
        Ok(true)
    }

    /// Drop every draft and the current-draft pointer.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    pub async fn clear_all(&self) -> Result<(), StorageError> {
        self.kv.remove(keys::DRAFTS).await?;
        self.kv.remove(keys::CURRENT_DRAFT_ID).await
    }

    /// Point the active session at `id`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    pub async fn set_current(&self, id: DraftId) -> Result<(), StorageError> {
        codec::save(self.kv.as_ref(), keys::CURRENT_DRAFT_ID, &id).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    pub async fn clear_current(&self) -> Result<(), StorageError> {
        self.kv.remove(keys::CURRENT_DRAFT_ID).await
    }
}

fn upsert_into(drafts: &mut Vec<Draft>, draft: Draft) {
    match drafts.iter_mut().find(|existing| existing.id == draft.id) {
        Some(slot) => *slot = draft,
        None => drafts.insert(0, draft),
    }
}

// Timestamp ids can collide when two sessions save within the same millisecond.
fn fresh_id(drafts: &[Draft], now_millis: i64) -> DraftId {
    let mut candidate = now_millis;
    while drafts.iter().any(|draft| draft.id.value() == candidate) {
        candidate = candidate.saturating_add(1);
    }
    DraftId::new(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorecard_core::model::{InterviewSettings, QuestionRecord, QuestionSet, Verdict};
    use scorecard_core::time::{fixed_clock, fixed_now};
    use storage::repository::InMemoryStore;

    fn service() -> (DraftService, InMemoryStore) {
        let kv = InMemoryStore::new();
        (DraftService::new(fixed_clock(), Arc::new(kv.clone())), kv)
    }

    fn questions() -> QuestionSet {
        let mut set = QuestionSet::new();
        set.insert(
            "kotlin",
            vec![
                QuestionRecord::new("val vs var?", "", ""),
                QuestionRecord::new("data class?", "", ""),
            ],
        );
        set
    }

    #[tokio::test]
    async fn empty_session_is_not_saved() {
        let (drafts, kv) = service();
        let mut session = InterviewSession::new("junior", fixed_now().date_naive());
        assert_eq!(drafts.save(&mut session).await.unwrap(), None);
        assert!(kv.is_empty().unwrap());
    }

    #[tokio::test]
    async fn saving_twice_keeps_one_draft() {
        let (drafts, _) = service();
        let mut session = InterviewSession::new("junior", fixed_now().date_naive());
        session.set_candidate_name("Ada");

        let first = drafts.save(&mut session).await.unwrap().unwrap();
        session.generate(&questions(), &InterviewSettings::default());
        session.score(0, Verdict::Good).unwrap();
        let second = drafts.save(&mut session).await.unwrap().unwrap();

        assert_eq!(first, second);
        let list = drafts.list().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].scored_count(), 1);
        assert_eq!(drafts.current_id().await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn new_drafts_are_prepended_with_unique_ids() {
        let (drafts, _) = service();
        let mut first = InterviewSession::new("junior", fixed_now().date_naive());
        first.set_candidate_name("Ada");
        let mut second = InterviewSession::new("junior", fixed_now().date_naive());
        second.set_candidate_name("Grace");

        let a = drafts.save(&mut first).await.unwrap().unwrap();
        let b = drafts.save(&mut second).await.unwrap().unwrap();
        assert_ne!(a, b);

        let list = drafts.list().await.unwrap();
        assert_eq!(list[0].candidate_name, "Grace");
        assert_eq!(list[1].candidate_name, "Ada");
    }

    #[tokio::test]
    async fn malformed_list_reads_as_empty() {
        let (drafts, kv) = service();
        kv.set(keys::DRAFTS, "{not json").await.unwrap();
        kv.set(keys::CURRENT_DRAFT_ID, "\"abc\"").await.unwrap();
        assert!(drafts.list().await.unwrap().is_empty());
        assert_eq!(drafts.current_id().await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_and_clear_all() {
        let (drafts, kv) = service();
        let mut session = InterviewSession::new("junior", fixed_now().date_naive());
        session.set_candidate_name("Ada");
        let id = drafts.save(&mut session).await.unwrap().unwrap();

        assert!(!drafts.delete(DraftId::new(id.value() + 1)).await.unwrap());
        assert!(drafts.delete(id).await.unwrap());
        assert!(drafts.get(id).await.unwrap().is_none());

        drafts.save(&mut session).await.unwrap();
        drafts.clear_all().await.unwrap();
        assert!(!drafts.has_drafts().await.unwrap());
        assert!(kv.get(keys::CURRENT_DRAFT_ID).await.unwrap().is_none());
    }
}
