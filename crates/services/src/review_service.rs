use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::{Rng, rng};
use thiserror::Error;
use tracing::info;

use scorecard_core::model::{ReviewQuestion, RoleLevel};
use storage::codec;

use crate::error::QuestionBankError;
use crate::question_bank::BankSource;

pub const DEFAULT_REVIEW_LIMIT: usize = 10;

/// How matching review questions are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewMode {
    /// A shuffled sample of at most `limit` questions.
    #[default]
    Random,
    /// Every match, in bank order.
    Full,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown review mode: {0} (expected random or full)")]
pub struct ReviewModeParseError(pub String);

impl FromStr for ReviewMode {
    type Err = ReviewModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "random" => Ok(Self::Random),
            "full" => Ok(Self::Full),
            other => Err(ReviewModeParseError(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewQuery {
    pub level: RoleLevel,
    pub search: String,
    pub mode: ReviewMode,
    pub limit: usize,
}

impl Default for ReviewQuery {
    fn default() -> Self {
        Self {
            level: RoleLevel::All,
            search: String::new(),
            mode: ReviewMode::Random,
            limit: DEFAULT_REVIEW_LIMIT,
        }
    }
}

/// Self-study browser over a flat list of leveled questions.
#[derive(Debug, Clone, Default)]
pub struct ReviewService {
    questions: Vec<ReviewQuestion>,
}

impl ReviewService {
    #[must_use]
    pub fn new(questions: Vec<ReviewQuestion>) -> Self {
        Self { questions }
    }

    /// # Errors
    ///
    /// Returns `QuestionBankError::Parse` if `raw` is not a list of review questions.
    pub fn from_json(raw: &str) -> Result<Self, QuestionBankError> {
        Ok(Self::new(codec::parse(raw)?))
    }

    /// # Errors
    ///
    /// Returns `QuestionBankError` if the source cannot be read or parsed.
    pub async fn load(source: &BankSource) -> Result<Self, QuestionBankError> {
        let service = Self::from_json(&source.fetch_text().await?)?;
        info!(source = %source, questions = service.questions.len(), "review bank loaded");
        Ok(service)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions passing the level and search filters, in bank order.
    #[must_use]
    pub fn matching(&self, query: &ReviewQuery) -> Vec<&ReviewQuestion> {
        let needle = query.search.trim().to_lowercase();
        self.questions
            .iter()
            .filter(|q| query.level.admits(&q.level))
            .filter(|q| needle.is_empty() || q.matches_search(&needle))
            .collect()
    }

    #[must_use]
    pub fn matching_count(&self, query: &ReviewQuery) -> usize {
        self.matching(query).len()
    }

    /// Questions to display for `query`, using the thread-local generator.
    #[must_use]
    pub fn select(&self, query: &ReviewQuery) -> Vec<&ReviewQuestion> {
        let mut rng = rng();
        self.select_with(query, &mut rng)
    }

    /// A search always shows every match; only an unfiltered random view is sampled.
    pub fn select_with<R: Rng + ?Sized>(
        &self,
        query: &ReviewQuery,
        rng: &mut R,
    ) -> Vec<&ReviewQuestion> {
        let mut matches = self.matching(query);
        if query.mode == ReviewMode::Random && query.search.trim().is_empty() {
            matches.as_mut_slice().shuffle(rng);
            matches.truncate(query.limit.max(1));
        }
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn service() -> ReviewService {
        let mut questions = Vec::new();
        for (i, level) in ["junior", "mid", "senior"].iter().cycle().take(30).enumerate() {
            questions.push(ReviewQuestion {
                id: i as u64,
                level: (*level).to_owned(),
                question: format!("Question {i}"),
                short_answer: String::new(),
                answer: (i == 7).then(|| "Uses a Coroutine scope".to_owned()),
                look_for: None,
            });
        }
        ReviewService::new(questions)
    }

    #[test]
    fn random_mode_samples_limit() {
        let service = service();
        let mut rng = StdRng::seed_from_u64(3);
        let query = ReviewQuery {
            level: RoleLevel::Junior,
            limit: 4,
            ..ReviewQuery::default()
        };
        let picked = service.select_with(&query, &mut rng);
        assert_eq!(picked.len(), 4);
        assert!(picked.iter().all(|q| q.level == "junior"));
        assert_eq!(service.matching_count(&query), 10);
    }

    #[test]
    fn full_mode_keeps_bank_order() {
        let service = service();
        let query = ReviewQuery {
            mode: ReviewMode::Full,
            limit: 2,
            ..ReviewQuery::default()
        };
        let picked = service.select(&query);
        assert_eq!(picked.len(), 30);
        assert_eq!(picked[0].id, 0);
        assert_eq!(picked[29].id, 29);
    }

    #[test]
    fn search_ignores_limit_and_checks_answer_text() {
        let service = service();
        let query = ReviewQuery {
            search: "COROUTINE".into(),
            limit: 1,
            ..ReviewQuery::default()
        };
        let picked = service.select(&query);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].id, 7);

        let many = ReviewQuery {
            search: "question 1".into(),
            limit: 1,
            ..ReviewQuery::default()
        };
        assert_eq!(service.select(&many).len(), 11);
    }

    #[test]
    fn parses_bank_and_modes() {
        let service = ReviewService::from_json(
            r#"[{"id":1,"level":"mid","question":"Q","short_answer":"A","look_for":"L"}]"#,
        )
        .unwrap();
        assert_eq!(service.len(), 1);
        assert!(ReviewService::from_json("{}").is_err());
        assert_eq!("full".parse::<ReviewMode>().unwrap(), ReviewMode::Full);
        assert!("all".parse::<ReviewMode>().is_err());
    }
}
