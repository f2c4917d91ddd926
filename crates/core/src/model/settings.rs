use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const DEFAULT_TEMPLATE: &str = "junior";
pub const DEFAULT_MAX_PER_CATEGORY: u32 = 2;
pub const DEFAULT_MAX_TOTAL: u32 = 18;
pub const MAX_PER_CATEGORY_RANGE: RangeInclusive<u32> = 1..=10;
pub const MAX_TOTAL_RANGE: RangeInclusive<u32> = 1..=50;

/// Question-generation settings persisted between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewSettings {
    #[serde(default = "default_per_category")]
    pub max_questions_per_category: u32,
    #[serde(default = "default_total")]
    pub max_total_questions: u32,
    #[serde(default = "default_template")]
    pub selected_template: String,
}

fn default_per_category() -> u32 {
    DEFAULT_MAX_PER_CATEGORY
}

fn default_total() -> u32 {
    DEFAULT_MAX_TOTAL
}

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_owned()
}

impl Default for InterviewSettings {
    fn default() -> Self {
        Self {
            max_questions_per_category: DEFAULT_MAX_PER_CATEGORY,
            max_total_questions: DEFAULT_MAX_TOTAL,
            selected_template: DEFAULT_TEMPLATE.to_owned(),
        }
    }
}

impl InterviewSettings {
    /// Clamp limits into their allowed ranges and default a blank template.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.max_questions_per_category = self
            .max_questions_per_category
            .clamp(*MAX_PER_CATEGORY_RANGE.start(), *MAX_PER_CATEGORY_RANGE.end());
        self.max_total_questions = self
            .max_total_questions
            .clamp(*MAX_TOTAL_RANGE.start(), *MAX_TOTAL_RANGE.end());
        if self.selected_template.trim().is_empty() {
            self.selected_template = DEFAULT_TEMPLATE.to_owned();
        }
        self
    }

    /// Settings produced by applying a role template.
    #[must_use]
    pub fn from_template(template_id: &str, meta: &TemplateMeta) -> Self {
        let defaults = Self::default();
        Self {
            max_questions_per_category: meta
                .settings
                .max_questions_per_category
                .unwrap_or(defaults.max_questions_per_category),
            max_total_questions: meta
                .settings
                .max_total_questions
                .unwrap_or(defaults.max_total_questions),
            selected_template: template_id.to_owned(),
        }
        .normalized()
    }

    #[must_use]
    pub fn per_category_cap(&self) -> usize {
        usize::try_from(self.max_questions_per_category).unwrap_or(usize::MAX)
    }

    #[must_use]
    pub fn total_cap(&self) -> usize {
        usize::try_from(self.max_total_questions).unwrap_or(usize::MAX)
    }
}

/// Role-template descriptor carried in the bank's `_metadata` section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TemplateMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub settings: TemplateSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_questions_per_category: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_total_questions: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_clamps_limits() {
        let settings = InterviewSettings {
            max_questions_per_category: 0,
            max_total_questions: 500,
            selected_template: "  ".into(),
        }
        .normalized();
        assert_eq!(settings.max_questions_per_category, 1);
        assert_eq!(settings.max_total_questions, 50);
        assert_eq!(settings.selected_template, DEFAULT_TEMPLATE);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let settings: InterviewSettings =
            serde_json::from_str(r#"{"selectedTemplate":"senior"}"#).unwrap();
        assert_eq!(settings.max_questions_per_category, 2);
        assert_eq!(settings.max_total_questions, 18);
        assert_eq!(settings.selected_template, "senior");
    }

    #[test]
    fn template_settings_override_defaults() {
        let meta: TemplateMeta = serde_json::from_str(
            r#"{"name":"Mid","description":"Mid level","settings":{"maxQuestionsPerCategory":3}}"#,
        )
        .unwrap();
        let settings = InterviewSettings::from_template("mid", &meta);
        assert_eq!(settings.max_questions_per_category, 3);
        assert_eq!(settings.max_total_questions, DEFAULT_MAX_TOTAL);
        assert_eq!(settings.selected_template, "mid");
    }
}
