use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyQuestion,
}

/// A single interview question as shipped in the bank or edited by the user.
///
/// The bank file spells the fields `short_answer`/`look_for`; persisted copies
/// use camelCase. Both are accepted when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub question: String,
    #[serde(default, alias = "short_answer")]
    pub short_answer: String,
    #[serde(default, alias = "look_for")]
    pub look_for: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

impl QuestionRecord {
    #[must_use]
    pub fn new(
        question: impl Into<String>,
        short_answer: impl Into<String>,
        look_for: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            short_answer: short_answer.into(),
            look_for: look_for.into(),
            answer: None,
        }
    }

    /// Build a record from user input, trimming every field.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyQuestion` if the question is blank after trimming.
    pub fn validated(
        question: &str,
        short_answer: &str,
        look_for: &str,
    ) -> Result<Self, QuestionError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(QuestionError::EmptyQuestion);
        }
        Ok(Self::new(question, short_answer.trim(), look_for.trim()))
    }

    #[must_use]
    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = Some(answer.into());
        self
    }
}

/// Persisted question entry; very old copies stored only the question text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StoredQuestion {
    Legacy(String),
    Record(QuestionRecord),
}

impl StoredQuestion {
    #[must_use]
    pub fn into_record(self) -> QuestionRecord {
        match self {
            StoredQuestion::Legacy(question) => QuestionRecord::new(question, "", ""),
            StoredQuestion::Record(record) => record,
        }
    }
}

/// The question store: category name to the ordered questions in that category.
///
/// Questions are identified positionally within their category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionSet(BTreeMap<String, Vec<QuestionRecord>>);

impl QuestionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_map(map: BTreeMap<String, Vec<QuestionRecord>>) -> Self {
        Self(map)
    }

    /// Rebuild the store from persisted entries, migrating legacy strings.
    #[must_use]
    pub fn from_stored(map: BTreeMap<String, Vec<StoredQuestion>>) -> Self {
        Self(
            map.into_iter()
                .map(|(category, questions)| {
                    let records = questions.into_iter().map(StoredQuestion::into_record);
                    (category, records.collect())
                })
                .collect(),
        )
    }

    /// True when no category is present at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn category_count(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[QuestionRecord])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    #[must_use]
    pub fn get(&self, category: &str) -> Option<&[QuestionRecord]> {
        self.0.get(category).map(Vec::as_slice)
    }

    pub fn get_mut(&mut self, category: &str) -> Option<&mut Vec<QuestionRecord>> {
        self.0.get_mut(category)
    }

    #[must_use]
    pub fn contains_category(&self, category: &str) -> bool {
        self.0.contains_key(category)
    }

    /// Replace the questions of a category, creating it if needed.
    pub fn insert(&mut self, category: impl Into<String>, questions: Vec<QuestionRecord>) {
        self.0.insert(category.into(), questions);
    }

    pub fn remove(&mut self, category: &str) -> Option<Vec<QuestionRecord>> {
        self.0.remove(category)
    }

    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, Vec<QuestionRecord>> {
        self.0
    }
}

impl Serialize for QuestionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for QuestionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BTreeMap::<String, Vec<StoredQuestion>>::deserialize(deserializer).map(Self::from_stored)
    }
}

/// A question picked for a session, tagged with the category it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedQuestion {
    pub category: String,
    #[serde(flatten)]
    pub record: QuestionRecord,
}

impl SelectedQuestion {
    #[must_use]
    pub fn new(category: impl Into<String>, record: QuestionRecord) -> Self {
        Self {
            category: category.into(),
            record,
        }
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.record.question
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_bank_and_persisted_spellings() {
        let bank: QuestionRecord = serde_json::from_str(
            r#"{"question":"What is Git?","short_answer":"VCS","look_for":"commands"}"#,
        )
        .unwrap();
        let stored: QuestionRecord = serde_json::from_str(
            r#"{"question":"What is Git?","shortAnswer":"VCS","lookFor":"commands"}"#,
        )
        .unwrap();
        assert_eq!(bank, stored);
        assert_eq!(bank.answer, None);

        let json = serde_json::to_string(&bank).unwrap();
        assert!(json.contains("\"shortAnswer\""));
        assert!(!json.contains("answer\":null"));
    }

    #[test]
    fn migrates_legacy_string_entries() {
        let set: QuestionSet =
            serde_json::from_str(r#"{"tools":["What is Gradle?",{"question":"What is ANR?"}]}"#)
                .unwrap();
        let tools = set.get("tools").unwrap();
        assert_eq!(tools[0], QuestionRecord::new("What is Gradle?", "", ""));
        assert_eq!(tools[1].question, "What is ANR?");
        assert_eq!(tools[1].look_for, "");
    }

    #[test]
    fn validated_trims_and_rejects_blank() {
        let record = QuestionRecord::validated("  Q?  ", " a ", " b ").unwrap();
        assert_eq!(record, QuestionRecord::new("Q?", "a", "b"));
        assert_eq!(
            QuestionRecord::validated("   ", "a", "b"),
            Err(QuestionError::EmptyQuestion)
        );
    }

    #[test]
    fn selected_question_flattens_record() {
        let selected = SelectedQuestion::new("kotlin", QuestionRecord::new("val vs var?", "", ""));
        let value = serde_json::to_value(&selected).unwrap();
        assert_eq!(value["category"], "kotlin");
        assert_eq!(value["question"], "val vs var?");

        let back: SelectedQuestion = serde_json::from_value(value).unwrap();
        assert_eq!(back, selected);
    }

    #[test]
    fn counts_questions_across_categories() {
        let mut set = QuestionSet::new();
        assert!(set.is_empty());
        set.insert("a", vec![QuestionRecord::new("1", "", ""); 3]);
        set.insert("b", Vec::new());
        assert_eq!(set.category_count(), 2);
        assert_eq!(set.question_count(), 3);
        assert_eq!(set.categories().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
