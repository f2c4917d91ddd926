//! Storage keys used by the scorecard. Values are JSON documents.

/// Question overrides (category -> questions).
pub const QUESTIONS: &str = "scorecard.questions";
/// Question-generation settings.
pub const SETTINGS: &str = "scorecard.settings";
/// User-defined categories (id -> category).
pub const CUSTOM_CATEGORIES: &str = "scorecard.customCategories";
/// Id of the draft the active session writes to.
pub const CURRENT_DRAFT_ID: &str = "scorecard.currentDraftId";
/// Draft list, most recently created first.
pub const DRAFTS: &str = "scorecard.drafts";
/// Completed interviews, newest first.
pub const HISTORY: &str = "scorecard.history";
