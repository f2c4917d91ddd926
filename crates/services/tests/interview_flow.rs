use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use rand::SeedableRng;
use rand::rngs::StdRng;

use scorecard_core::model::{
    DEFAULT_CATEGORIES, Decision, InterviewSettings, QuestionRecord, QuestionSet, Recommendation,
    Verdict,
};
use scorecard_core::time::{fixed_clock, fixed_now};
use services::{AppServices, AutosaveTimer, Clock, InterviewWorkflow, SessionError, SessionPhase};
use storage::keys;
use storage::repository::{InMemoryStore, KeyValueStore, StorageError};

fn nine_categories() -> QuestionSet {
    let mut set = QuestionSet::new();
    for (id, _) in DEFAULT_CATEGORIES {
        let questions = (0..5)
            .map(|i| QuestionRecord::new(format!("{id} question {i}"), "short", "look for"))
            .collect();
        set.insert(id, questions);
    }
    set
}

fn workflow_over(kv: &InMemoryStore, clock: Clock) -> InterviewWorkflow {
    InterviewWorkflow::new(clock, Arc::new(kv.clone()))
}

#[tokio::test]
async fn completion_moves_draft_into_history() {
    let kv = InMemoryStore::new();
    let workflow = workflow_over(&kv, fixed_clock());

    let mut session = workflow.new_session("junior");
    session.set_candidate_name("  Ada Lovelace ");
    session.set_interviewer_name("Grace");
    let mut rng = StdRng::seed_from_u64(42);
    session.generate_with(&nine_categories(), &InterviewSettings::default(), &mut rng);
    assert_eq!(session.selected_questions().len(), 18);

    for i in 0..13 {
        session.score(i, Verdict::Good).unwrap();
    }
    session.set_decision(Some(Decision::Yes));
    let draft_id = workflow.save_draft(&mut session).await.unwrap().unwrap();
    assert_eq!(workflow.resumable_drafts().await.unwrap().len(), 1);

    let entry = workflow.complete(&mut session).await.unwrap();
    assert_eq!(entry.candidate_name, "Ada Lovelace");
    // 13 of 18 = 72.2%
    assert_eq!(entry.scores.percentage, 72);
    assert_eq!(entry.recommendation, Recommendation::StrongYes);
    assert_eq!(entry.decision, Some(Decision::Yes));

    let history = workflow.history().list().await.unwrap();
    assert_eq!(history.len(), 1);
    assert!(workflow.drafts().get(draft_id).await.unwrap().is_none());
    assert!(kv.get(keys::CURRENT_DRAFT_ID).await.unwrap().is_none());
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert_eq!(session.candidate_name(), "");
}

#[tokio::test]
async fn rejected_completion_changes_nothing() {
    let kv = InMemoryStore::new();
    let workflow = workflow_over(&kv, fixed_clock());

    let mut session = workflow.new_session("junior");
    session.set_candidate_name("   ");
    session.generate(&nine_categories(), &InterviewSettings::default());
    session.score(0, Verdict::Okay).unwrap();
    let before = session.clone();

    let err = workflow.complete(&mut session).await.unwrap_err();
    assert!(matches!(err, SessionError::MissingCandidateName));
    assert_eq!(
        err.to_string(),
        "Please enter a candidate name before saving."
    );
    assert_eq!(session, before);
    assert!(workflow.history().list().await.unwrap().is_empty());

    let mut no_questions = workflow.new_session("junior");
    no_questions.set_candidate_name("Ada");
    let err = workflow.complete(&mut no_questions).await.unwrap_err();
    assert_eq!(err.to_string(), "Please generate questions before saving.");
    assert!(workflow.history().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn autosave_fires_every_thirty_seconds_with_progress() {
    let kv = InMemoryStore::new();
    let mut clock = fixed_clock();
    let mut timer = AutosaveTimer::default();
    let mut session = workflow_over(&kv, clock).new_session("junior");
    timer.arm(clock.now());

    // Nothing to save yet.
    clock.advance(Duration::seconds(30));
    let workflow = workflow_over(&kv, clock);
    assert!(!workflow.autosave(&mut session, &mut timer).await.unwrap());
    assert!(workflow.resumable_drafts().await.unwrap().is_empty());

    session.set_candidate_name("Ada");
    clock.advance(Duration::seconds(10));
    let workflow = workflow.with_clock(clock);
    assert!(!workflow.autosave(&mut session, &mut timer).await.unwrap());

    clock.advance(Duration::seconds(20));
    let workflow = workflow.with_clock(clock);
    assert!(workflow.autosave(&mut session, &mut timer).await.unwrap());

    clock.advance(Duration::seconds(30));
    let workflow = workflow.with_clock(clock);
    assert!(workflow.autosave(&mut session, &mut timer).await.unwrap());

    let drafts = workflow.resumable_drafts().await.unwrap();
    assert_eq!(drafts.len(), 1, "autosave updates the same draft");
    assert_eq!(drafts[0].saved_at, fixed_now() + Duration::seconds(90));
}

#[tokio::test]
async fn malformed_persisted_lists_read_as_empty() {
    let kv = InMemoryStore::new();
    kv.set(keys::DRAFTS, "[{\"id\": ").await.unwrap();
    kv.set(keys::HISTORY, "\"not a list\"").await.unwrap();
    let workflow = workflow_over(&kv, fixed_clock());

    assert!(workflow.resumable_drafts().await.unwrap().is_empty());
    assert!(workflow.history().list().await.unwrap().is_empty());

    let mut session = workflow.new_session("junior");
    session.set_candidate_name("Ada");
    workflow.save_draft(&mut session).await.unwrap();
    assert_eq!(workflow.resumable_drafts().await.unwrap().len(), 1);
}

#[tokio::test]
async fn app_services_over_sqlite() {
    let services = AppServices::new_sqlite(
        "sqlite:file:memdb_services_flow?mode=memory&cache=shared",
        fixed_clock(),
    )
    .await
    .unwrap();

    let workflow = services.interview();
    let mut session = workflow.new_session("junior");
    session.set_candidate_name("Ada");
    session.generate(&nine_categories(), &InterviewSettings::default());
    workflow.save_draft(&mut session).await.unwrap();
    workflow.complete(&mut session).await.unwrap();

    assert_eq!(services.history().list().await.unwrap().len(), 1);
    assert!(workflow.resumable_drafts().await.unwrap().is_empty());
}

struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("disk full".into()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

#[tokio::test]
async fn storage_failures_surface_as_errors() {
    let workflow = InterviewWorkflow::new(fixed_clock(), Arc::new(FailingStore));
    let mut session = workflow.new_session("junior");
    session.set_candidate_name("Ada");
    session.generate(&nine_categories(), &InterviewSettings::default());

    assert!(matches!(
        workflow.save_draft(&mut session).await,
        Err(SessionError::Storage(_))
    ));
    assert_eq!(session.draft_id(), None);

    assert!(matches!(
        workflow.complete(&mut session).await,
        Err(SessionError::Storage(_))
    ));
    assert_eq!(session.candidate_name(), "Ada");
}

/// Accepts every write except updates to the draft list.
struct LockedDrafts(InMemoryStore);

#[async_trait]
impl KeyValueStore for LockedDrafts {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == keys::DRAFTS {
            return Err(StorageError::Connection("drafts locked".into()));
        }
        self.0.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.0.remove(key).await
    }
}

#[tokio::test]
async fn completion_is_recorded_once_when_draft_removal_fails() {
    let kv = InMemoryStore::new();
    let mut session = workflow_over(&kv, fixed_clock()).new_session("junior");
    session.set_candidate_name("Ada");
    session.generate(&nine_categories(), &InterviewSettings::default());
    workflow_over(&kv, fixed_clock())
        .save_draft(&mut session)
        .await
        .unwrap();

    let workflow = InterviewWorkflow::new(fixed_clock(), Arc::new(LockedDrafts(kv.clone())));
    assert!(matches!(
        workflow.complete(&mut session).await,
        Err(SessionError::Storage(_))
    ));
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert_eq!(session.draft_id(), None);

    assert!(matches!(
        workflow.complete(&mut session).await,
        Err(SessionError::MissingCandidateName)
    ));
    assert_eq!(workflow.history().list().await.unwrap().len(), 1);
    assert_eq!(workflow.resumable_drafts().await.unwrap().len(), 1);
}
