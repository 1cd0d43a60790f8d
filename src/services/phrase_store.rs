//! Phrase persistence behind a single trait, plus the transient in-memory
//! implementation used for demos and tests.

use crate::models::phrase::{Phrase, PhraseFields};
use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum PhraseStoreError {
    #[error("phrase `{0}` not found")]
    NotFound(String),
    #[error("phrases table is not provisioned")]
    NotProvisioned,
    #[error("phrase `{0}` already exists")]
    Duplicate(String),
    #[error(transparent)]
    Backend(#[from] sqlx::Error),
}

pub type PhraseStoreResult<T> = Result<T, PhraseStoreError>;

/// CRUD over the phrase collection. Implementations assign identifiers and
/// timestamps; callers hand over validated fields only.
#[async_trait]
pub trait PhraseStore: Send + Sync {
    /// All phrases in the store's natural order.
    async fn list(&self) -> PhraseStoreResult<Vec<Phrase>>;

    async fn get(&self, id: &str) -> PhraseStoreResult<Phrase>;

    /// Insert with a fresh id and `created_at == updated_at`.
    async fn insert(&self, fields: PhraseFields) -> PhraseStoreResult<Phrase>;

    /// Replace both texts and bump `updated_at`; id and `created_at` stay.
    async fn update(&self, id: &str, fields: PhraseFields) -> PhraseStoreResult<Phrase>;

    /// Hard delete. No tombstone is kept.
    async fn delete(&self, id: &str) -> PhraseStoreResult<()>;

    /// Short backend label for logs and readiness output.
    fn backend(&self) -> &'static str;
}

#[derive(Debug, Default)]
struct MemoryTable {
    rows: Vec<Phrase>,
    next_id: u64,
}

/// Process-local store. Ids are sequential decimal strings and reset on
/// restart, so this store is never authoritative.
#[derive(Debug)]
pub struct MemoryPhraseStore {
    table: RwLock<MemoryTable>,
}

impl MemoryPhraseStore {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(MemoryTable {
                rows: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Store pre-filled with the console's two sample phrases.
    pub fn with_samples() -> Self {
        let now = Utc::now();
        let rows = [("Hello world", "Merhaba dünya"), ("How are you?", "Nasılsın?")]
            .into_iter()
            .enumerate()
            .map(|(idx, (en, tr))| Phrase {
                id: (idx + 1).to_string(),
                english_text: en.to_string(),
                turkish_translation: tr.to_string(),
                created_at: now,
                updated_at: now,
            })
            .collect::<Vec<_>>();
        let next_id = rows.len() as u64 + 1;
        Self {
            table: RwLock::new(MemoryTable { rows, next_id }),
        }
    }
}

impl Default for MemoryPhraseStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PhraseStore for MemoryPhraseStore {
    async fn list(&self) -> PhraseStoreResult<Vec<Phrase>> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn get(&self, id: &str) -> PhraseStoreResult<Phrase> {
        self.table
            .read()
            .await
            .rows
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| PhraseStoreError::NotFound(id.to_string()))
    }

    async fn insert(&self, fields: PhraseFields) -> PhraseStoreResult<Phrase> {
        let mut table = self.table.write().await;
        let id = table.next_id.to_string();
        if table.rows.iter().any(|p| p.id == id) {
            return Err(PhraseStoreError::Duplicate(id));
        }
        table.next_id += 1;

        let now = Utc::now();
        let phrase = Phrase {
            id,
            english_text: fields.english_text,
            turkish_translation: fields.turkish_translation,
            created_at: now,
            updated_at: now,
        };
        table.rows.push(phrase.clone());
        Ok(phrase)
    }

    async fn update(&self, id: &str, fields: PhraseFields) -> PhraseStoreResult<Phrase> {
        let mut table = self.table.write().await;
        let phrase = table
            .rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| PhraseStoreError::NotFound(id.to_string()))?;

        phrase.english_text = fields.english_text;
        phrase.turkish_translation = fields.turkish_translation;
        phrase.updated_at = Utc::now();
        Ok(phrase.clone())
    }

    async fn delete(&self, id: &str) -> PhraseStoreResult<()> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|p| p.id != id);
        if table.rows.len() == before {
            return Err(PhraseStoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
