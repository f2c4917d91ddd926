mod category;
mod draft;
mod history;
mod ids;
mod question;
mod review;
mod score;
mod settings;

pub use category::{
    CategoryError, CustomCategory, DEFAULT_CATEGORIES, category_label, category_slug,
    is_default_category,
};
pub use draft::Draft;
pub use history::{HistoryEntry, RecommendationFilter, RecommendationFilterParseError};
pub use ids::{DraftId, HistoryId};
pub use question::{QuestionError, QuestionRecord, QuestionSet, SelectedQuestion, StoredQuestion};
pub use review::{ReviewQuestion, RoleLevel, RoleLevelParseError};
pub use score::{
    Decision, DecisionParseError, Recommendation, ScoreMap, ScoreSummary, Verdict,
    VerdictParseError, decision_text, optional_decision,
};
pub use settings::{
    DEFAULT_MAX_PER_CATEGORY, DEFAULT_MAX_TOTAL, DEFAULT_TEMPLATE, InterviewSettings,
    MAX_PER_CATEGORY_RANGE, MAX_TOTAL_RANGE, TemplateMeta, TemplateSettings,
};
