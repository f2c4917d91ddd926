use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use std::collections::BTreeMap;
use std::fmt;

use scorecard_core::model::{
    Decision, Draft, DraftId, HistoryEntry, HistoryId, InterviewSettings, QuestionSet,
    Recommendation, ScoreMap, ScoreSummary, SelectedQuestion, Verdict,
};

use super::sampler::QuestionSampler;
use crate::error::SessionError;

/// Where the session is in its lifecycle.
///
/// Completion is not a resting state: it records history and drops straight
/// back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    InProgress,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory state of one interview being scored.
///
/// Persistence is handled by `InterviewWorkflow`; this type only enforces the
/// local rules (score indices, completion preconditions).
#[derive(Clone, PartialEq, Eq)]
pub struct InterviewSession {
    candidate_name: String,
    interview_date: NaiveDate,
    interviewer_name: String,
    role: String,
    default_role: String,
    selected_questions: Vec<SelectedQuestion>,
    scores: ScoreMap,
    overall_notes: String,
    decision: Option<Decision>,
    show_answers: BTreeMap<usize, bool>,
    draft_id: Option<DraftId>,
}

impl InterviewSession {
    /// Start an empty session for `role`, dated `today`.
    #[must_use]
    pub fn new(role: impl Into<String>, today: NaiveDate) -> Self {
        let role = role.into();
        Self {
            candidate_name: String::new(),
            interview_date: today,
            interviewer_name: String::new(),
            role: role.clone(),
            default_role: role,
            selected_questions: Vec::new(),
            scores: ScoreMap::new(),
            overall_notes: String::new(),
            decision: None,
            show_answers: BTreeMap::new(),
            draft_id: None,
        }
    }

    /// Rebuild a session from a persisted draft, keeping its id.
    #[must_use]
    pub fn from_draft(draft: Draft, default_role: impl Into<String>) -> Self {
        let default_role = default_role.into();
        let role = if draft.role.trim().is_empty() {
            default_role.clone()
        } else {
            draft.role
        };
        Self {
            candidate_name: draft.candidate_name,
            interview_date: draft.interview_date,
            interviewer_name: draft.interviewer_name,
            role,
            default_role,
            selected_questions: draft.selected_questions,
            scores: draft.scores,
            overall_notes: draft.overall_notes,
            decision: draft.decision,
            show_answers: draft.show_answers,
            draft_id: Some(draft.id),
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.selected_questions.is_empty() {
            SessionPhase::Idle
        } else {
            SessionPhase::InProgress
        }
    }

    // ─── Accessors ─────────────────────────────────────────────────────────────

    #[must_use]
    pub fn candidate_name(&self) -> &str {
        &self.candidate_name
    }

    #[must_use]
    pub fn interview_date(&self) -> NaiveDate {
        self.interview_date
    }

    #[must_use]
    pub fn interviewer_name(&self) -> &str {
        &self.interviewer_name
    }

    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    #[must_use]
    pub fn selected_questions(&self) -> &[SelectedQuestion] {
        &self.selected_questions
    }

    #[must_use]
    pub fn scores(&self) -> &ScoreMap {
        &self.scores
    }

    #[must_use]
    pub fn overall_notes(&self) -> &str {
        &self.overall_notes
    }

    #[must_use]
    pub fn decision(&self) -> Option<Decision> {
        self.decision
    }

    #[must_use]
    pub fn draft_id(&self) -> Option<DraftId> {
        self.draft_id
    }

    #[must_use]
    pub fn is_answer_shown(&self, index: usize) -> bool {
        self.show_answers.get(&index).copied().unwrap_or(false)
    }

    // ─── Field edits ───────────────────────────────────────────────────────────

    pub fn set_candidate_name(&mut self, name: impl Into<String>) {
        self.candidate_name = name.into();
    }

    pub fn set_interview_date(&mut self, date: NaiveDate) {
        self.interview_date = date;
    }

    pub fn set_interviewer_name(&mut self, name: impl Into<String>) {
        self.interviewer_name = name.into();
    }

    pub fn set_role(&mut self, role: impl Into<String>) {
        self.role = role.into();
    }

    pub fn set_overall_notes(&mut self, notes: impl Into<String>) {
        self.overall_notes = notes.into();
    }

    pub fn set_decision(&mut self, decision: Option<Decision>) {
        self.decision = decision;
    }

    pub(crate) fn set_draft_id(&mut self, id: DraftId) {
        self.draft_id = Some(id);
    }

    // ─── Transitions ───────────────────────────────────────────────────────────

    /// Draw a fresh set of questions, discarding prior scores and revealed answers.
    pub fn generate(&mut self, questions: &QuestionSet, settings: &InterviewSettings) {
        let selected = QuestionSampler::new(questions, settings).sample();
        self.replace_questions(selected);
    }

    /// Like `generate`, with an explicit random source.
    pub fn generate_with<R: Rng + ?Sized>(
        &mut self,
        questions: &QuestionSet,
        settings: &InterviewSettings,
        rng: &mut R,
    ) {
        let selected = QuestionSampler::new(questions, settings).sample_with(rng);
        self.replace_questions(selected);
    }

    fn replace_questions(&mut self, selected: Vec<SelectedQuestion>) {
        self.selected_questions = selected;
        self.scores.clear();
        self.show_answers.clear();
    }

    /// Record a verdict for the question at `index`, replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::QuestionOutOfRange` if `index` does not address a selected question.
    pub fn score(&mut self, index: usize, verdict: Verdict) -> Result<(), SessionError> {
        self.check_index(index)?;
        self.scores.insert(index, verdict);
        Ok(())
    }

    /// Flip answer visibility for the question at `index` and return the new state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::QuestionOutOfRange` if `index` does not address a selected question.
    pub fn toggle_answer(&mut self, index: usize) -> Result<bool, SessionError> {
        self.check_index(index)?;
        let shown = !self.is_answer_shown(index);
        self.show_answers.insert(index, shown);
        Ok(shown)
    }

    fn check_index(&self, index: usize) -> Result<(), SessionError> {
        if index < self.selected_questions.len() {
            Ok(())
        } else {
            Err(SessionError::QuestionOutOfRange {
                index,
                len: self.selected_questions.len(),
            })
        }
    }

    /// Return every field to its initial value and forget the draft id.
    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(self.default_role.clone(), today);
    }

    // ─── Derived state ─────────────────────────────────────────────────────────

    #[must_use]
    pub fn results(&self) -> ScoreSummary {
        ScoreSummary::compute(&self.scores, self.selected_questions.len())
    }

    #[must_use]
    pub fn recommendation(&self) -> Recommendation {
        self.results().recommendation()
    }

    /// Whether the periodic autosave should write a draft.
    #[must_use]
    pub fn has_progress(&self) -> bool {
        !self.candidate_name.trim().is_empty()
            || !self.selected_questions.is_empty()
            || !self.scores.is_empty()
    }

    /// Whether an explicit draft save has anything worth keeping.
    #[must_use]
    pub fn is_saveable(&self) -> bool {
        !self.candidate_name.trim().is_empty() || !self.selected_questions.is_empty()
    }

    /// Check the preconditions for recording the interview in history.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::MissingCandidateName` or `SessionError::NoQuestions`.
    pub fn validate_completion(&self) -> Result<(), SessionError> {
        if self.candidate_name.trim().is_empty() {
            return Err(SessionError::MissingCandidateName);
        }
        if self.selected_questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }
        Ok(())
    }

    #[must_use]
    pub fn to_draft(&self, id: DraftId, saved_at: DateTime<Utc>) -> Draft {
        Draft {
            id,
            candidate_name: self.candidate_name.clone(),
            interview_date: self.interview_date,
            interviewer_name: self.interviewer_name.clone(),
            role: self.role.clone(),
            selected_questions: self.selected_questions.clone(),
            scores: self.scores.clone(),
            overall_notes: self.overall_notes.clone(),
            decision: self.decision,
            show_answers: self.show_answers.clone(),
            saved_at,
        }
    }

    /// Summarize the session for history. Names are trimmed.
    #[must_use]
    pub fn to_history_entry(&self, id: HistoryId, saved_at: DateTime<Utc>) -> HistoryEntry {
        let scores = self.results();
        HistoryEntry {
            id,
            candidate_name: self.candidate_name.trim().to_owned(),
            interview_date: self.interview_date,
            interviewer_name: self.interviewer_name.trim().to_owned(),
            role: self.role.clone(),
            scores,
            recommendation: scores.recommendation(),
            decision: self.decision,
            overall_notes: self.overall_notes.clone(),
            saved_at,
        }
    }
}

impl fmt::Debug for InterviewSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterviewSession")
            .field("candidate_name", &self.candidate_name)
            .field("role", &self.role)
            .field("questions_len", &self.selected_questions.len())
            .field("scores_len", &self.scores.len())
            .field("draft_id", &self.draft_id)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
