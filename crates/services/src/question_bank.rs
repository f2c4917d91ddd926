//! Read-only question banks loaded from a file or an `http(s)` URL.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde_json::{Map, Value};
use tracing::{error, info};

use scorecard_core::model::{DEFAULT_TEMPLATE, QuestionRecord, QuestionSet, TemplateMeta};
use storage::codec::{self, ParseError};

use crate::error::QuestionBankError;

const METADATA_KEY: &str = "_metadata";

/// Where a bank document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankSource {
    File(PathBuf),
    Url(String),
}

impl BankSource {
    /// Treat `http://` and `https://` strings as URLs, anything else as a path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_owned())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }

    /// Read the whole document as text.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError::Io` for unreadable files, and
    /// `QuestionBankError::Http`/`HttpStatus` for failed requests.
    pub async fn fetch_text(&self) -> Result<String, QuestionBankError> {
        match self {
            Self::File(path) => Ok(tokio::fs::read_to_string(path).await?),
            Self::Url(url) => {
                let response = reqwest::get(url).await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(QuestionBankError::HttpStatus(status));
                }
                Ok(response.text().await?)
            }
        }
    }
}

impl fmt::Display for BankSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

//
// ─── QUESTION BANK ─────────────────────────────────────────────────────────────
//

/// Interview questions grouped by role template, plus template descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    templates: BTreeMap<String, QuestionSet>,
    metadata: BTreeMap<String, TemplateMeta>,
}

impl QuestionBank {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a bank document.
    ///
    /// The usual layout maps template id to a category map. A document whose
    /// top-level values are all lists is read as a single `junior` template.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError::Parse` for invalid JSON and
    /// `QuestionBankError::Layout` when the document has neither shape.
    pub fn from_json(raw: &str) -> Result<Self, QuestionBankError> {
        let value: Value = codec::parse(raw)?;
        let Value::Object(mut root) = value else {
            return Err(QuestionBankError::Layout(
                "top level must be an object".into(),
            ));
        };

        let metadata = match root.remove(METADATA_KEY) {
            Some(meta) => serde_json::from_value(meta).map_err(ParseError::from)?,
            None => BTreeMap::new(),
        };

        let templates = if !root.is_empty() && root.values().all(Value::is_array) {
            let mut templates = BTreeMap::new();
            templates.insert(DEFAULT_TEMPLATE.to_owned(), category_set(root)?);
            templates
        } else {
            let mut templates = BTreeMap::new();
            for (id, categories) in root {
                let Value::Object(categories) = categories else {
                    return Err(QuestionBankError::Layout(format!(
                        "template {id} must map categories to question lists"
                    )));
                };
                templates.insert(id, category_set(categories)?);
            }
            templates
        };

        Ok(Self {
            templates,
            metadata,
        })
    }

    /// Fetch and parse a bank.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError` if the source cannot be read or parsed.
    pub async fn load(source: &BankSource) -> Result<Self, QuestionBankError> {
        let raw = source.fetch_text().await?;
        let bank = Self::from_json(&raw)?;
        info!(
            source = %source,
            templates = bank.templates.len(),
            "question bank loaded"
        );
        Ok(bank)
    }

    /// Like `load`, but a failure is logged and yields an empty bank.
    pub async fn load_or_empty(source: &BankSource) -> Self {
        match Self::load(source).await {
            Ok(bank) => bank,
            Err(err) => {
                error!(source = %source, error = %err, "failed to load question bank");
                Self::empty()
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    #[must_use]
    pub fn template(&self, id: &str) -> Option<&QuestionSet> {
        self.templates.get(id)
    }

    #[must_use]
    pub fn template_meta(&self, id: &str) -> Option<&TemplateMeta> {
        self.metadata.get(id)
    }

    /// Template descriptors in id order.
    pub fn templates(&self) -> impl Iterator<Item = (&str, &TemplateMeta)> {
        self.metadata.iter().map(|(id, meta)| (id.as_str(), meta))
    }

    /// Questions of `template` (or `junior` if it is absent) for each of
    /// `categories`. Categories the template lacks get an empty list.
    #[must_use]
    pub fn questions_for<'c>(
        &self,
        template: &str,
        categories: impl IntoIterator<Item = &'c str>,
    ) -> QuestionSet {
        let source = self
            .templates
            .get(template)
            .or_else(|| self.templates.get(DEFAULT_TEMPLATE));
        let mut set = QuestionSet::new();
        for category in categories {
            let questions = source
                .and_then(|set| set.get(category))
                .map(<[QuestionRecord]>::to_vec)
                .unwrap_or_default();
            set.insert(category, questions);
        }
        set
    }
}

fn category_set(categories: Map<String, Value>) -> Result<QuestionSet, QuestionBankError> {
    let set: QuestionSet =
        serde_json::from_value(Value::Object(categories)).map_err(ParseError::from)?;
    Ok(set)
}
