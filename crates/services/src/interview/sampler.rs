use rand::seq::SliceRandom;
use rand::{Rng, rng};

use scorecard_core::model::{InterviewSettings, QuestionSet, SelectedQuestion};

/// Draws a randomized interview from the question store.
///
/// Each category contributes at most `per_category_cap` questions chosen
/// uniformly at random; the combined list is shuffled again and cut to
/// `total_cap`. Identical questions in different categories are kept as-is.
pub struct QuestionSampler<'a> {
    questions: &'a QuestionSet,
    per_category_cap: usize,
    total_cap: usize,
}

impl<'a> QuestionSampler<'a> {
    #[must_use]
    pub fn new(questions: &'a QuestionSet, settings: &InterviewSettings) -> Self {
        Self {
            questions,
            per_category_cap: settings.per_category_cap(),
            total_cap: settings.total_cap(),
        }
    }

    /// Override the caps taken from settings.
    #[must_use]
    pub fn with_caps(mut self, per_category_cap: usize, total_cap: usize) -> Self {
        self.per_category_cap = per_category_cap;
        self.total_cap = total_cap;
        self
    }

    /// Sample using the thread-local generator.
    #[must_use]
    pub fn sample(self) -> Vec<SelectedQuestion> {
        let mut rng = rng();
        self.sample_with(&mut rng)
    }

    /// Sample using the provided random source.
    pub fn sample_with<R: Rng + ?Sized>(self, rng: &mut R) -> Vec<SelectedQuestion> {
        let mut selected = Vec::new();

        for (category, questions) in self.questions.iter() {
            let mut picks: Vec<_> = questions.iter().collect();
            picks.as_mut_slice().shuffle(rng);
            picks.truncate(self.per_category_cap);
            selected.extend(
                picks
                    .into_iter()
                    .map(|record| SelectedQuestion::new(category, record.clone())),
            );
        }

        selected.as_mut_slice().shuffle(rng);
        selected.truncate(self.total_cap);
        selected
    }

    /// Number of questions a sample will contain with the current caps.
    #[must_use]
    pub fn expected_len(&self) -> usize {
        let available: usize = self
            .questions
            .iter()
            .map(|(_, questions)| questions.len().min(self.per_category_cap))
            .sum();
        available.min(self.total_cap)
    }
}
