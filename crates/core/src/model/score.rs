use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── VERDICT ───────────────────────────────────────────────────────────────────
//

/// Interviewer's assessment of a single answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Good,
    Okay,
    Weak,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown verdict: {0}")]
pub struct VerdictParseError(pub String);

impl Verdict {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Good => "good",
            Verdict::Okay => "okay",
            Verdict::Weak => "weak",
        }
    }
}

impl FromStr for Verdict {
    type Err = VerdictParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "good" | "g" => Ok(Verdict::Good),
            "okay" | "ok" | "o" => Ok(Verdict::Okay),
            "weak" | "w" => Ok(Verdict::Weak),
            _ => Err(VerdictParseError(s.to_owned())),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdicts keyed by the position of the question in the session.
pub type ScoreMap = BTreeMap<usize, Verdict>;

//
// ─── RECOMMENDATION ────────────────────────────────────────────────────────────
//

/// Hire recommendation derived from the weighted percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Strong Yes - Hire")]
    StrongYes,
    #[serde(rename = "Yes - Good candidate")]
    Yes,
    #[serde(rename = "Maybe - Consider")]
    Maybe,
    #[serde(rename = "No - Not ready")]
    No,
}

impl Recommendation {
    pub const STRONG_YES_MIN: u32 = 70;
    pub const YES_MIN: u32 = 60;
    pub const MAYBE_MIN: u32 = 50;

    /// Map a percentage onto the fixed tiers (inclusive lower bounds).
    #[must_use]
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage >= Self::STRONG_YES_MIN {
            Recommendation::StrongYes
        } else if percentage >= Self::YES_MIN {
            Recommendation::Yes
        } else if percentage >= Self::MAYBE_MIN {
            Recommendation::Maybe
        } else {
            Recommendation::No
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Recommendation::StrongYes => "Strong Yes - Hire",
            Recommendation::Yes => "Yes - Good candidate",
            Recommendation::Maybe => "Maybe - Consider",
            Recommendation::No => "No - Not ready",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//
// ─── SCORE SUMMARY ─────────────────────────────────────────────────────────────
//

/// Aggregate counts for a scored session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub total: u32,
    pub good: u32,
    pub okay: u32,
    pub weak: u32,
    pub percentage: u32,
}

impl ScoreSummary {
    /// Tally verdicts against the number of selected questions.
    ///
    /// Unscored questions count towards `total` but earn nothing.
    #[must_use]
    pub fn compute(scores: &ScoreMap, total: usize) -> Self {
        let mut good = 0_u32;
        let mut okay = 0_u32;
        let mut weak = 0_u32;
        for verdict in scores.values() {
            match verdict {
                Verdict::Good => good = good.saturating_add(1),
                Verdict::Okay => okay = okay.saturating_add(1),
                Verdict::Weak => weak = weak.saturating_add(1),
            }
        }
        let total = u32::try_from(total).unwrap_or(u32::MAX);
        Self {
            total,
            good,
            okay,
            weak,
            percentage: Self::percentage(good, okay, total),
        }
    }

    /// `round((good + okay / 2) / total * 100)`, or 0 when `total` is 0.
    ///
    /// Computed in integers: `(100 * (2g + o) + t) / 2t` rounds half up.
    #[must_use]
    pub fn percentage(good: u32, okay: u32, total: u32) -> u32 {
        if total == 0 {
            return 0;
        }
        let total = u64::from(total);
        let points = 2 * u64::from(good) + u64::from(okay);
        let rounded = (100 * points + total) / (2 * total);
        u32::try_from(rounded).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn recommendation(&self) -> Recommendation {
        Recommendation::from_percentage(self.percentage)
    }

    /// Questions that have not been given a verdict yet.
    #[must_use]
    pub fn unscored(&self) -> u32 {
        self.total
            .saturating_sub(self.good.saturating_add(self.okay).saturating_add(self.weak))
    }
}

//
// ─── DECISION ──────────────────────────────────────────────────────────────────
//

/// Interviewer's own hiring call, recorded independently from the computed tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    StrongYes,
    Yes,
    Maybe,
    No,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown decision: {0}")]
pub struct DecisionParseError(pub String);

impl Decision {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::StrongYes => "strong-yes",
            Decision::Yes => "yes",
            Decision::Maybe => "maybe",
            Decision::No => "no",
        }
    }

    #[must_use]
    pub fn display_text(self) -> &'static str {
        match self {
            Decision::StrongYes => Recommendation::StrongYes.label(),
            Decision::Yes => Recommendation::Yes.label(),
            Decision::Maybe => Recommendation::Maybe.label(),
            Decision::No => Recommendation::No.label(),
        }
    }
}

impl FromStr for Decision {
    type Err = DecisionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "strong-yes" => Ok(Decision::StrongYes),
            "yes" => Ok(Decision::Yes),
            "maybe" => Ok(Decision::Maybe),
            "no" => Ok(Decision::No),
            other => Err(DecisionParseError(other.to_owned())),
        }
    }
}

/// Display text for an optional decision.
#[must_use]
pub fn decision_text(decision: Option<Decision>) -> &'static str {
    decision.map_or("Not specified", Decision::display_text)
}

/// Serde adapter: an unset decision is persisted as the empty string.
pub mod optional_decision {
    use super::Decision;
    use serde::{Deserialize, Deserializer, Serializer};

    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(value: &Option<Decision>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.map_or("", Decision::as_str))
    }

    /// # Errors
    ///
    /// Fails on a non-empty string that is not a known decision.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Decision>, D::Error> {
        let raw = Option::<String>::deserialize(d)?.unwrap_or_default();
        if raw.trim().is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some).map_err(serde::de::Error::custom)
    }
}
