use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::model::{Decision, HistoryId, Recommendation, ScoreSummary, optional_decision};

/// Immutable record of a completed interview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: HistoryId,
    pub candidate_name: String,
    pub interview_date: NaiveDate,
    #[serde(default)]
    pub interviewer_name: String,
    #[serde(default)]
    pub role: String,
    pub scores: ScoreSummary,
    pub recommendation: Recommendation,
    #[serde(default, with = "optional_decision")]
    pub decision: Option<Decision>,
    #[serde(default)]
    pub overall_notes: String,
    pub saved_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Case-insensitive match against candidate or interviewer name.
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.candidate_name.to_lowercase().contains(needle)
            || self.interviewer_name.to_lowercase().contains(needle)
    }
}

/// Coarse recommendation buckets offered when browsing history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecommendationFilter {
    #[default]
    All,
    Hire,
    Consider,
    NotReady,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown recommendation filter: {0} (expected all, hire, consider, not-ready)")]
pub struct RecommendationFilterParseError(pub String);

impl RecommendationFilter {
    #[must_use]
    pub fn matches(self, recommendation: Recommendation) -> bool {
        match self {
            RecommendationFilter::All => true,
            RecommendationFilter::Hire => matches!(
                recommendation,
                Recommendation::StrongYes | Recommendation::Yes
            ),
            RecommendationFilter::Consider => recommendation == Recommendation::Maybe,
            RecommendationFilter::NotReady => recommendation == Recommendation::No,
        }
    }
}

impl FromStr for RecommendationFilter {
    type Err = RecommendationFilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(Self::All),
            "hire" => Ok(Self::Hire),
            "consider" => Ok(Self::Consider),
            "not-ready" => Ok(Self::NotReady),
            other => Err(RecommendationFilterParseError(other.to_owned())),
        }
    }
}
