//! SqlitePhraseStore — durable phrase storage in the `phrases` table.
//!
//! Ids are UUID v4 strings. Listing is newest first. A missing table is
//! reported as [`PhraseStoreError::NotProvisioned`] instead of a raw
//! database error so the console can point the operator at `--migrate`.

use super::phrase_store::{PhraseStore, PhraseStoreError, PhraseStoreResult};
use crate::models::phrase::{Phrase, PhraseFields, PhraseRow};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

const PHRASE_COLUMNS: &str = "id, english_text, turkish_translation, created_at, updated_at";

#[derive(Clone)]
pub struct SqlitePhraseStore {
    /// Shared SQLite connection pool.
    pub db: Arc<SqlitePool>,
}

impl SqlitePhraseStore {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PhraseStore for SqlitePhraseStore {
    async fn list(&self) -> PhraseStoreResult<Vec<Phrase>> {
        let rows = sqlx::query_as::<_, PhraseRow>(&format!(
            "SELECT {PHRASE_COLUMNS} FROM phrases ORDER BY created_at DESC, rowid DESC"
        ))
        .fetch_all(&*self.db)
        .await
        .map_err(classify)?;

        Ok(rows.into_iter().map(Phrase::from).collect())
    }

    async fn get(&self, id: &str) -> PhraseStoreResult<Phrase> {
        sqlx::query_as::<_, PhraseRow>(&format!(
            "SELECT {PHRASE_COLUMNS} FROM phrases WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&*self.db)
        .await
        .map_err(classify)?
        .map(Phrase::from)
        .ok_or_else(|| PhraseStoreError::NotFound(id.to_string()))
    }

    async fn insert(&self, fields: PhraseFields) -> PhraseStoreResult<Phrase> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let row = sqlx::query_as::<_, PhraseRow>(&format!(
            "INSERT INTO phrases ({PHRASE_COLUMNS}) VALUES (?, ?, ?, ?, ?)
             RETURNING {PHRASE_COLUMNS}"
        ))
        .bind(&id)
        .bind(&fields.english_text)
        .bind(&fields.turkish_translation)
        .bind(now)
        .bind(now)
        .fetch_one(&*self.db)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                PhraseStoreError::Duplicate(id.clone())
            } else {
                classify(err)
            }
        })?;

        Ok(row.into())
    }

    async fn update(&self, id: &str, fields: PhraseFields) -> PhraseStoreResult<Phrase> {
        sqlx::query_as::<_, PhraseRow>(&format!(
            "UPDATE phrases
             SET english_text = ?, turkish_translation = ?, updated_at = ?
             WHERE id = ?
             RETURNING {PHRASE_COLUMNS}"
        ))
        .bind(&fields.english_text)
        .bind(&fields.turkish_translation)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&*self.db)
        .await
        .map_err(classify)?
        .map(Phrase::from)
        .ok_or_else(|| PhraseStoreError::NotFound(id.to_string()))
    }

    async fn delete(&self, id: &str) -> PhraseStoreResult<()> {
        let result = sqlx::query("DELETE FROM phrases WHERE id = ?")
            .bind(id)
            .execute(&*self.db)
            .await
            .map_err(classify)?;

        if result.rows_affected() == 0 {
            return Err(PhraseStoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}

/// Map "relation does not exist" to NotProvisioned; pass everything else on.
fn classify(err: sqlx::Error) -> PhraseStoreError {
    if is_missing_table(&err) {
        PhraseStoreError::NotProvisioned
    } else {
        PhraseStoreError::Backend(err)
    }
}

/// SQLite reports a missing table by message only; Postgres uses `42P01`.
fn is_missing_table(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("42P01")
                || db_err
                    .message()
                    .to_ascii_lowercase()
                    .contains("no such table")
        }
        _ => false,
    }
}

/// Return true if SQLx error indicates a unique constraint violation.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.message().to_ascii_lowercase().contains("unique")
    )
}
