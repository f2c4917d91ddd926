use std::sync::Arc;

use tracing::info;

use scorecard_core::model::{Draft, DraftId, HistoryEntry};
use storage::repository::KeyValueStore;

use super::autosave::AutosaveTimer;
use super::session::InterviewSession;
use crate::Clock;
use crate::draft_service::DraftService;
use crate::error::SessionError;
use crate::history_service::HistoryService;

/// Ties an `InterviewSession` to draft and history persistence.
#[derive(Clone)]
pub struct InterviewWorkflow {
    clock: Clock,
    drafts: DraftService,
    history: HistoryService,
}

impl InterviewWorkflow {
    #[must_use]
    pub fn new(clock: Clock, kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            clock,
            drafts: DraftService::new(clock, Arc::clone(&kv)),
            history: HistoryService::new(clock, kv),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Replace the clock used for dates, draft ids and autosave polling.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self.drafts = self.drafts.with_clock(clock);
        self.history = self.history.with_clock(clock);
        self
    }

    #[must_use]
    pub fn drafts(&self) -> &DraftService {
        &self.drafts
    }

    #[must_use]
    pub fn history(&self) -> &HistoryService {
        &self.history
    }

    // ─── Startup ───────────────────────────────────────────────────────────────

    /// Drafts to offer for resuming at startup; empty when there is nothing to resume.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if drafts cannot be read.
    pub async fn resumable_drafts(&self) -> Result<Vec<Draft>, SessionError> {
        Ok(self.drafts.list().await?)
    }

    /// A blank session dated today.
    #[must_use]
    pub fn new_session(&self, role: &str) -> InterviewSession {
        InterviewSession::new(role, self.clock.today())
    }

    /// Load a draft and make it the active one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::DraftNotFound` if no draft has `id`.
    pub async fn resume(
        &self,
        id: DraftId,
        default_role: &str,
    ) -> Result<InterviewSession, SessionError> {
        let draft = self
            .drafts
            .get(id)
            .await?
            .ok_or(SessionError::DraftNotFound(id))?;
        self.drafts.set_current(id).await?;
        info!(draft_id = %id, candidate = %draft.candidate_name, "draft resumed");
        Ok(InterviewSession::from_draft(draft, default_role))
    }

    // ─── Saving ────────────────────────────────────────────────────────────────

    /// Save a draft now. Returns `None` when the session has nothing worth keeping.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the draft cannot be written.
    pub async fn save_draft(
        &self,
        session: &mut InterviewSession,
    ) -> Result<Option<DraftId>, SessionError> {
        Ok(self.drafts.save(session).await?)
    }

    /// Poll `timer` and save when it fires and the session has progress.
    ///
    /// Returns whether a draft was written.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the draft cannot be written.
    pub async fn autosave(
        &self,
        session: &mut InterviewSession,
        timer: &mut AutosaveTimer,
    ) -> Result<bool, SessionError> {
        if !timer.poll(self.clock.now()) || !session.has_progress() {
            return Ok(false);
        }
        Ok(self.drafts.save(session).await?.is_some())
    }

    // ─── Finishing ─────────────────────────────────────────────────────────────

    /// Record the session in history, drop its draft and reset it.
    ///
    /// On a validation failure nothing is written and the session is untouched.
    /// Once the history entry is written the session is reset, so a failure
    /// removing the draft leaves it resumable but cannot record the interview twice.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::MissingCandidateName`, `SessionError::NoQuestions`
    /// or `SessionError::Storage`.
    pub async fn complete(
        &self,
        session: &mut InterviewSession,
    ) -> Result<HistoryEntry, SessionError> {
        session.validate_completion()?;

        let entry = self.history.record(session).await?;
        let draft_id = session.draft_id();
        session.reset(self.clock.today());
        info!(
            history_id = %entry.id,
            candidate = %entry.candidate_name,
            percentage = entry.scores.percentage,
            recommendation = %entry.recommendation,
            "interview completed"
        );
        self.discard_active(draft_id).await?;
        Ok(entry)
    }

    /// Throw away the session and its draft.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the draft cannot be removed.
    pub async fn reset(&self, session: &mut InterviewSession) -> Result<(), SessionError> {
        self.discard_active(session.draft_id()).await?;
        session.reset(self.clock.today());
        Ok(())
    }

    async fn discard_active(&self, draft_id: Option<DraftId>) -> Result<(), SessionError> {
        if let Some(id) = draft_id {
            self.drafts.delete(id).await?;
        }
        self.drafts.clear_current().await?;
        Ok(())
    }

    /// Delete one draft, clearing the pointer if it was the active one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` on backend failures.
    pub async fn discard_draft(&self, id: DraftId) -> Result<bool, SessionError> {
        let removed = self.drafts.delete(id).await?;
        if self.drafts.current_id().await? == Some(id) {
            self.drafts.clear_current().await?;
        }
        Ok(removed)
    }

    /// # Errors
    ///
    /// Returns `SessionError::Storage` on backend failures.
    pub async fn clear_drafts(&self) -> Result<(), SessionError> {
        Ok(self.drafts.clear_all().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorecard_core::model::{InterviewSettings, QuestionRecord, QuestionSet, Verdict};
    use scorecard_core::time::fixed_clock;
    use storage::repository::InMemoryStore;

    fn workflow() -> InterviewWorkflow {
        InterviewWorkflow::new(fixed_clock(), Arc::new(InMemoryStore::new()))
    }

    fn questions() -> QuestionSet {
        let mut set = QuestionSet::new();
        set.insert(
            "android",
            vec![
                QuestionRecord::new("What is an Activity?", "", ""),
                QuestionRecord::new("What is a Service?", "", ""),
            ],
        );
        set
    }

    #[tokio::test]
    async fn resume_restores_draft_and_pointer() {
        let workflow = workflow();
        let mut session = workflow.new_session("junior");
        session.set_candidate_name("Ada");
        session.generate(&questions(), &InterviewSettings::default());
        session.score(1, Verdict::Okay).unwrap();
        let id = workflow.save_draft(&mut session).await.unwrap().unwrap();
        workflow.drafts().clear_current().await.unwrap();

        let resumed = workflow.resume(id, "junior").await.unwrap();
        assert_eq!(resumed.scores(), session.scores());
        assert_eq!(workflow.drafts().current_id().await.unwrap(), Some(id));

        let missing = DraftId::new(id.value() + 100);
        assert!(matches!(
            workflow.resume(missing, "junior").await,
            Err(SessionError::DraftNotFound(_))
        ));
    }

    #[tokio::test]
    async fn reset_drops_active_draft() {
        let workflow = workflow();
        let mut session = workflow.new_session("junior");
        session.set_candidate_name("Ada");
        workflow.save_draft(&mut session).await.unwrap();

        workflow.reset(&mut session).await.unwrap();
        assert!(workflow.resumable_drafts().await.unwrap().is_empty());
        assert_eq!(workflow.drafts().current_id().await.unwrap(), None);
        assert_eq!(session.candidate_name(), "");
    }

    #[tokio::test]
    async fn discard_draft_clears_matching_pointer() {
        let workflow = workflow();
        let mut session = workflow.new_session("junior");
        session.set_candidate_name("Ada");
        let id = workflow.save_draft(&mut session).await.unwrap().unwrap();

        assert!(workflow.discard_draft(id).await.unwrap());
        assert!(!workflow.discard_draft(id).await.unwrap());
        assert_eq!(workflow.drafts().current_id().await.unwrap(), None);
    }
}
