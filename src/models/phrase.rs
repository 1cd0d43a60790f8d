//! Represents an English/Turkish phrase pair managed by the console.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A phrase pair as exposed to clients.
///
/// `id` and `created_at` never change after creation; `updated_at` is bumped on
/// every successful update.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Phrase {
    /// Store-assigned identifier (sequential in memory, UUID in SQLite).
    pub id: String,

    /// English source sentence, 1–500 characters.
    pub english_text: String,

    /// Turkish translation, 1–500 characters.
    pub turkish_translation: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Storage shape of a phrase as it lives in the `phrases` table.
#[derive(Clone, FromRow, Debug)]
pub struct PhraseRow {
    pub id: String,
    pub english_text: String,
    pub turkish_translation: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PhraseRow> for Phrase {
    fn from(row: PhraseRow) -> Self {
        Self {
            id: row.id,
            english_text: row.english_text,
            turkish_translation: row.turkish_translation,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Validated text fields for a phrase insert or update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhraseFields {
    pub english_text: String,
    pub turkish_translation: String,
}

/// Raw phrase form as submitted by the console. Fields may be absent.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PhraseForm {
    pub english_text: Option<String>,
    pub turkish_translation: Option<String>,
}

/// Length bucket used by the phrase list filter.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PhraseCategory {
    #[default]
    All,
    /// English text shorter than [`SHORT_PHRASE_LIMIT`] characters.
    Short,
    Long,
}

pub const SHORT_PHRASE_LIMIT: usize = 10;

impl PhraseCategory {
    pub fn matches(self, phrase: &Phrase) -> bool {
        let len = phrase.english_text.chars().count();
        match self {
            PhraseCategory::All => true,
            PhraseCategory::Short => len < SHORT_PHRASE_LIMIT,
            PhraseCategory::Long => len >= SHORT_PHRASE_LIMIT,
        }
    }
}

/// Search and category filter applied to a retrieved phrase list.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct PhraseFilter {
    /// Case-insensitive substring matched against either language.
    pub q: Option<String>,
    #[serde(default)]
    pub category: PhraseCategory,
}

impl PhraseFilter {
    pub fn apply(&self, phrases: Vec<Phrase>) -> Vec<Phrase> {
        let query = self
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        phrases
            .into_iter()
            .filter(|p| self.category.matches(p))
            .filter(|p| match &query {
                Some(q) => {
                    p.english_text.to_lowercase().contains(q)
                        || p.turkish_translation.to_lowercase().contains(q)
                }
                None => true,
            })
            .collect()
    }
}
