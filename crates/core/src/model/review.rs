use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Seniority filter for the self-study bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleLevel {
    #[default]
    All,
    Junior,
    Mid,
    Senior,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role level: {0} (expected all, junior, mid, senior)")]
pub struct RoleLevelParseError(pub String);

impl RoleLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RoleLevel::All => "all",
            RoleLevel::Junior => "junior",
            RoleLevel::Mid => "mid",
            RoleLevel::Senior => "senior",
        }
    }

    /// Whether a question tagged with `level` belongs to this filter.
    #[must_use]
    pub fn admits(self, level: &str) -> bool {
        self == RoleLevel::All || self.as_str() == level
    }
}

impl FromStr for RoleLevel {
    type Err = RoleLevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(Self::All),
            "junior" => Ok(Self::Junior),
            "mid" => Ok(Self::Mid),
            "senior" => Ok(Self::Senior),
            other => Err(RoleLevelParseError(other.to_owned())),
        }
    }
}

impl fmt::Display for RoleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry of the self-study bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewQuestion {
    pub id: u64,
    pub level: String,
    pub question: String,
    #[serde(default)]
    pub short_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub look_for: Option<String>,
}

impl ReviewQuestion {
    /// Case-insensitive substring search across every text field.
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        let hit = |text: &str| text.to_lowercase().contains(needle);
        hit(&self.question)
            || hit(&self.short_answer)
            || self.answer.as_deref().is_some_and(hit)
            || self.look_for.as_deref().is_some_and(hit)
    }
}
