//! Shared error types for the services crate.

use thiserror::Error;

use scorecard_core::model::{CategoryError, QuestionError};
use storage::codec::ParseError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted while loading a question bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionBankError {
    #[error("failed to read question bank: {0}")]
    Io(#[from] std::io::Error),
    #[error("question bank request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("unexpected question bank layout: {0}")]
    Layout(String),
}

/// Errors emitted by the interview session lifecycle.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("Please enter a candidate name before saving.")]
    MissingCandidateName,
    #[error("Please generate questions before saving.")]
    NoQuestions,
    #[error("question {index} is out of range (session has {len} questions)")]
    QuestionOutOfRange { index: usize, len: usize },
    #[error("draft not found: {0}")]
    DraftNotFound(scorecard_core::model::DraftId),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Questions(#[from] QuestionServiceError),
}

/// Errors emitted by `QuestionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionServiceError {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error("no question {index} in category {category}")]
    QuestionNotFound { category: String, index: usize },
    #[error("template not found in question bank: {0}")]
    TemplateNotFound(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Questions(#[from] QuestionServiceError),
}
