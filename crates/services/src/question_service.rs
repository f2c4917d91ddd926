use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use scorecard_core::model::{
    CategoryError, CustomCategory, DEFAULT_CATEGORIES, DEFAULT_TEMPLATE, InterviewSettings,
    QuestionRecord, QuestionSet, category_label, category_slug, is_default_category,
};
use storage::codec;
use storage::keys;
use storage::repository::KeyValueStore;

use crate::Clock;
use crate::error::QuestionServiceError;
use crate::question_bank::QuestionBank;
use crate::settings_service::SettingsService;

type CustomCategories = BTreeMap<String, CustomCategory>;

/// Maintains the editable question store and user-defined categories.
///
/// Every mutation reads the persisted store, applies the change and writes it
/// back, so callers never hold stale copies.
#[derive(Clone)]
pub struct QuestionService {
    clock: Clock,
    kv: Arc<dyn KeyValueStore>,
    settings: SettingsService,
}

impl QuestionService {
    #[must_use]
    pub fn new(clock: Clock, kv: Arc<dyn KeyValueStore>) -> Self {
        let settings = SettingsService::new(Arc::clone(&kv));
        Self {
            clock,
            kv,
            settings,
        }
    }

    // ─── Store ─────────────────────────────────────────────────────────────────

    /// The persisted store, or an empty one when nothing usable is stored.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if the backend cannot be read.
    pub async fn questions(&self) -> Result<QuestionSet, QuestionServiceError> {
        Ok(codec::load_or_default(self.kv.as_ref(), keys::QUESTIONS).await?)
    }

    /// Questions used for generating interviews.
    ///
    /// Persisted edits win. Otherwise the store is seeded from the bank's
    /// `settings.selected_template` for every known category and persisted,
    /// unless the bank is empty.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if the backend fails.
    pub async fn load_store(
        &self,
        bank: &QuestionBank,
        settings: &InterviewSettings,
    ) -> Result<QuestionSet, QuestionServiceError> {
        let stored = self.questions().await?;
        if !stored.is_empty() {
            return Ok(stored);
        }

        let categories = self.known_categories().await?;
        let seeded = bank.questions_for(
            &settings.selected_template,
            categories.iter().map(String::as_str),
        );
        if bank.is_empty() {
            debug!("question bank empty; store left unseeded");
        } else {
            self.save_questions(&seeded).await?;
            info!(
                template = %settings.selected_template,
                questions = seeded.question_count(),
                "question store seeded from bank"
            );
        }
        Ok(seeded)
    }

    async fn save_questions(&self, questions: &QuestionSet) -> Result<(), QuestionServiceError> {
        codec::save(self.kv.as_ref(), keys::QUESTIONS, questions).await?;
        Ok(())
    }

    /// Append a question to `category`, returning the stored (trimmed) record.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Question` for a blank question,
    /// `QuestionServiceError::Category` for an unknown category.
    pub async fn add_question(
        &self,
        category: &str,
        question: &str,
        short_answer: &str,
        look_for: &str,
    ) -> Result<QuestionRecord, QuestionServiceError> {
        let record = QuestionRecord::validated(question, short_answer, look_for)?;
        self.ensure_known(category).await?;

        let mut questions = self.questions().await?;
        match questions.get_mut(category) {
            Some(list) => list.push(record.clone()),
            None => questions.insert(category, vec![record.clone()]),
        }
        self.save_questions(&questions).await?;
        Ok(record)
    }

    /// Replace the question at `index` in `category`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Question` for a blank question and
    /// `QuestionServiceError::QuestionNotFound` for a bad position.
    pub async fn edit_question(
        &self,
        category: &str,
        index: usize,
        record: QuestionRecord,
    ) -> Result<QuestionRecord, QuestionServiceError> {
        let mut updated =
            QuestionRecord::validated(&record.question, &record.short_answer, &record.look_for)?;
        updated.answer = record.answer;

        let mut questions = self.questions().await?;
        let slot = questions
            .get_mut(category)
            .and_then(|list| list.get_mut(index))
            .ok_or_else(|| not_found(category, index))?;
        *slot = updated.clone();
        self.save_questions(&questions).await?;
        Ok(updated)
    }

    /// Remove and return the question at `index` in `category`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::QuestionNotFound` for a bad position.
    pub async fn delete_question(
        &self,
        category: &str,
        index: usize,
    ) -> Result<QuestionRecord, QuestionServiceError> {
        let mut questions = self.questions().await?;
        let list = questions
            .get_mut(category)
            .filter(|list| index < list.len())
            .ok_or_else(|| not_found(category, index))?;
        let removed = list.remove(index);
        self.save_questions(&questions).await?;
        Ok(removed)
    }

    /// Empty `category` while keeping it in the store.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Category` for an unknown category.
    pub async fn clear_category(&self, category: &str) -> Result<(), QuestionServiceError> {
        self.ensure_known(category).await?;
        let mut questions = self.questions().await?;
        questions.insert(category, Vec::new());
        self.save_questions(&questions).await
    }

    /// Replace every category's questions with the `junior` template.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if the backend fails.
    pub async fn reset_to_defaults(
        &self,
        bank: &QuestionBank,
    ) -> Result<QuestionSet, QuestionServiceError> {
        let categories = self.known_categories().await?;
        let questions = template_questions(bank, DEFAULT_TEMPLATE, &categories);
        self.save_questions(&questions).await?;
        info!("questions reset to junior template");
        Ok(questions)
    }

    /// Switch to a role template: its settings and its questions replace the current ones.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::TemplateNotFound` if the bank has no
    /// descriptor for `template_id`.
    pub async fn apply_template(
        &self,
        bank: &QuestionBank,
        template_id: &str,
    ) -> Result<InterviewSettings, QuestionServiceError> {
        let meta = bank
            .template_meta(template_id)
            .ok_or_else(|| QuestionServiceError::TemplateNotFound(template_id.to_owned()))?;

        let categories = self.known_categories().await?;
        let questions = template_questions(bank, template_id, &categories);
        let settings = self
            .settings
            .save(InterviewSettings::from_template(template_id, meta))
            .await?;
        self.save_questions(&questions).await?;
        info!(template = template_id, name = %meta.name, "template applied");
        Ok(settings)
    }

    // ─── Categories ────────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if the backend cannot be read.
    pub async fn custom_categories(&self) -> Result<CustomCategories, QuestionServiceError> {
        Ok(codec::load_or_default(self.kv.as_ref(), keys::CUSTOM_CATEGORIES).await?)
    }

    /// Default category ids in display order, then custom ids.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if the backend cannot be read.
    pub async fn known_categories(&self) -> Result<Vec<String>, QuestionServiceError> {
        let custom = self.custom_categories().await?;
        Ok(DEFAULT_CATEGORIES
            .iter()
            .map(|(id, _)| (*id).to_owned())
            .chain(custom.into_keys())
            .collect())
    }

    /// Display label for a category id; unknown ids are shown as-is.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if the backend cannot be read.
    pub async fn label(&self, id: &str) -> Result<String, QuestionServiceError> {
        if let Some(label) = category_label(id) {
            return Ok(label.to_owned());
        }
        let custom = self.custom_categories().await?;
        Ok(custom
            .get(id)
            .map_or_else(|| id.to_owned(), |category| category.name.clone()))
    }

    /// Add a category named `name`, returning its slug id.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::EmptyName` or `CategoryError::AlreadyExists`.
    pub async fn add_category(&self, name: &str) -> Result<String, QuestionServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CategoryError::EmptyName.into());
        }
        let id = category_slug(name)?;
        let mut custom = self.custom_categories().await?;
        if is_default_category(&id) || custom.contains_key(&id) {
            return Err(CategoryError::AlreadyExists(id).into());
        }

        custom.insert(
            id.clone(),
            CustomCategory {
                name: name.to_owned(),
                created_at: self.clock.now(),
            },
        );
        codec::save(self.kv.as_ref(), keys::CUSTOM_CATEGORIES, &custom).await?;

        let mut questions = self.questions().await?;
        questions.insert(id.clone(), Vec::new());
        self.save_questions(&questions).await?;
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns `CategoryError` for default, unknown or blank input.
    pub async fn rename_category(&self, id: &str, name: &str) -> Result<(), QuestionServiceError> {
        let mut custom = self.editable_categories(id).await?;
        let name = name.trim();
        if name.is_empty() {
            return Err(CategoryError::EmptyName.into());
        }
        if let Some(category) = custom.get_mut(id) {
            category.name = name.to_owned();
        }
        codec::save(self.kv.as_ref(), keys::CUSTOM_CATEGORIES, &custom).await?;
        Ok(())
    }

    /// Remove a custom category together with its questions.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError` for default or unknown ids.
    pub async fn delete_category(&self, id: &str) -> Result<(), QuestionServiceError> {
        let mut custom = self.editable_categories(id).await?;
        custom.remove(id);
        codec::save(self.kv.as_ref(), keys::CUSTOM_CATEGORIES, &custom).await?;

        let mut questions = self.questions().await?;
        if questions.remove(id).is_some() {
            self.save_questions(&questions).await?;
        }
        Ok(())
    }

    async fn editable_categories(&self, id: &str) -> Result<CustomCategories, QuestionServiceError> {
        if is_default_category(id) {
            return Err(CategoryError::DefaultCategory(id.to_owned()).into());
        }
        let custom = self.custom_categories().await?;
        if !custom.contains_key(id) {
            return Err(CategoryError::NotFound(id.to_owned()).into());
        }
        Ok(custom)
    }

    async fn ensure_known(&self, category: &str) -> Result<(), QuestionServiceError> {
        if is_default_category(category) || self.custom_categories().await?.contains_key(category)
        {
            Ok(())
        } else {
            Err(CategoryError::NotFound(category.to_owned()).into())
        }
    }
}

fn not_found(category: &str, index: usize) -> QuestionServiceError {
    QuestionServiceError::QuestionNotFound {
        category: category.to_owned(),
        index,
    }
}

// Unlike session seeding, an explicit template choice never borrows junior questions.
fn template_questions(bank: &QuestionBank, template_id: &str, categories: &[String]) -> QuestionSet {
    let mut set = QuestionSet::new();
    for category in categories {
        let questions = bank
            .template(template_id)
            .and_then(|template| template.get(category))
            .map(<[QuestionRecord]>::to_vec)
            .unwrap_or_default();
        set.insert(category.clone(), questions);
    }
    set
}
