use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{Decision, DraftId, ScoreMap, SelectedQuestion, optional_decision};

/// Resumable snapshot of an in-progress interview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: DraftId,
    #[serde(default)]
    pub candidate_name: String,
    pub interview_date: NaiveDate,
    #[serde(default)]
    pub interviewer_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub selected_questions: Vec<SelectedQuestion>,
    #[serde(default)]
    pub scores: ScoreMap,
    #[serde(default)]
    pub overall_notes: String,
    #[serde(default, with = "optional_decision")]
    pub decision: Option<Decision>,
    #[serde(default)]
    pub show_answers: BTreeMap<usize, bool>,
    pub saved_at: DateTime<Utc>,
}

impl Draft {
    /// Number of questions that already carry a verdict.
    #[must_use]
    pub fn scored_count(&self) -> usize {
        self.scores.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionRecord, Verdict};
    use crate::time::fixed_now;

    #[test]
    fn draft_uses_camel_case_and_string_index_keys() {
        let draft = Draft {
            id: DraftId::new(1),
            candidate_name: "Ada".into(),
            interview_date: fixed_now().date_naive(),
            interviewer_name: String::new(),
            role: "junior".into(),
            selected_questions: vec![SelectedQuestion::new(
                "kotlin",
                QuestionRecord::new("val vs var?", "", ""),
            )],
            scores: [(0, Verdict::Good)].into_iter().collect(),
            overall_notes: String::new(),
            decision: None,
            show_answers: [(0, true)].into_iter().collect(),
            saved_at: fixed_now(),
        };

        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["candidateName"], "Ada");
        assert_eq!(value["interviewDate"], "2023-11-14");
        assert_eq!(value["scores"]["0"], "good");
        assert_eq!(value["decision"], "");

        let back: Draft = serde_json::from_value(value).unwrap();
        assert_eq!(back, draft);
        assert_eq!(back.scored_count(), 1);
    }

    #[test]
    fn draft_tolerates_missing_optional_fields() {
        let draft: Draft = serde_json::from_str(
            r#"{"id":5,"interviewDate":"2024-01-02","savedAt":"2024-01-02T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(draft.id, DraftId::new(5));
        assert!(draft.selected_questions.is_empty());
        assert_eq!(draft.decision, None);
    }
}
