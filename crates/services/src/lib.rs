#![forbid(unsafe_code)]

pub mod app_services;
pub mod draft_service;
pub mod error;
pub mod history_service;
pub mod interview;
pub mod question_bank;
pub mod question_service;
pub mod review_service;
pub mod settings_service;

pub use scorecard_core::Clock;

pub use app_services::AppServices;
pub use draft_service::DraftService;
pub use error::{AppServicesError, QuestionBankError, QuestionServiceError, SessionError};
pub use history_service::{HistoryExport, HistoryQuery, HistoryService};
pub use interview::{
    AUTOSAVE_INTERVAL_SECS, AutosaveTimer, InterviewSession, InterviewWorkflow, QuestionSampler,
    SessionPhase,
};
pub use question_bank::{BankSource, QuestionBank};
pub use question_service::QuestionService;
pub use review_service::{
    DEFAULT_REVIEW_LIMIT, ReviewMode, ReviewModeParseError, ReviewQuery, ReviewService,
};
pub use settings_service::SettingsService;
