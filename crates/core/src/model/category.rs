use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Built-in categories with their display labels, in display order.
pub const DEFAULT_CATEGORIES: [(&str, &str); 9] = [
    ("compose", "Compose"),
    ("android", "Android"),
    ("kotlin", "Kotlin"),
    ("coroutines", "Coroutines"),
    ("network", "Network"),
    ("architecture", "Architecture"),
    ("firebase", "Firebase"),
    ("tools", "Tools"),
    ("project", "Project"),
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CategoryError {
    #[error("category name cannot be empty")]
    EmptyName,
    #[error("category already exists: {0}")]
    AlreadyExists(String),
    #[error("default categories cannot be changed: {0}")]
    DefaultCategory(String),
    #[error("category not found: {0}")]
    NotFound(String),
}

/// A user-defined category added on top of the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomCategory {
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[must_use]
pub fn is_default_category(id: &str) -> bool {
    DEFAULT_CATEGORIES.iter().any(|(default, _)| *default == id)
}

#[must_use]
pub fn category_label(id: &str) -> Option<&'static str> {
    DEFAULT_CATEGORIES
        .iter()
        .find(|(default, _)| *default == id)
        .map(|(_, label)| *label)
}

/// Derive a category id from a display name: lowercase ASCII letters and digits only.
///
/// # Errors
///
/// Returns `CategoryError::EmptyName` if nothing usable remains.
pub fn category_slug(name: &str) -> Result<String, CategoryError> {
    let slug: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();
    if slug.is_empty() {
        return Err(CategoryError::EmptyName);
    }
    Ok(slug)
}
