use thiserror::Error;

use crate::model::{CategoryError, DecisionParseError, QuestionError, VerdictParseError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error(transparent)]
    Verdict(#[from] VerdictParseError),
    #[error(transparent)]
    Decision(#[from] DecisionParseError),
}
