//! PhraseService — validated CRUD over a [`PhraseStore`].
//!
//! Every successful mutation publishes [`ChangeEvent::PhrasesChanged`] so list
//! views re-query. Failures come back as [`ServiceError`]s carrying the
//! message the console shows verbatim.

use super::{
    events::{ChangeEvent, ChangeNotifier},
    phrase_store::{PhraseStore, PhraseStoreError},
};
use crate::{
    errors::{ServiceError, ServiceResult},
    models::phrase::{Phrase, PhraseFilter, PhraseForm},
    validation::validate_phrase,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub const PHRASE_ADDED: &str = "Phrase added successfully!";
pub const PHRASE_UPDATED: &str = "Phrase updated successfully!";
pub const PHRASE_DELETED: &str = "Phrase deleted successfully!";

#[derive(Clone)]
pub struct PhraseService {
    store: Arc<dyn PhraseStore>,
    notifier: ChangeNotifier,
}

impl PhraseService {
    pub fn new(store: Arc<dyn PhraseStore>, notifier: ChangeNotifier) -> Self {
        Self { store, notifier }
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// All phrases in store order. An unprovisioned table yields an empty
    /// list; other backend failures are returned.
    pub async fn get_phrases(&self) -> ServiceResult<Vec<Phrase>> {
        match self.store.list().await {
            Ok(phrases) => Ok(phrases),
            Err(PhraseStoreError::NotProvisioned) => {
                warn!(
                    backend = self.backend(),
                    "phrases table missing; returning an empty list"
                );
                Ok(Vec::new())
            }
            Err(err) => Err(self.log_store_error("list", err)),
        }
    }

    pub async fn search_phrases(&self, filter: &PhraseFilter) -> ServiceResult<Vec<Phrase>> {
        Ok(filter.apply(self.get_phrases().await?))
    }

    pub async fn get_phrase(&self, id: &str) -> ServiceResult<Phrase> {
        self.store
            .get(id)
            .await
            .map_err(|err| self.log_store_error("get", err))
    }

    pub async fn add_phrase(&self, form: &PhraseForm) -> ServiceResult<Phrase> {
        let fields = validate_phrase(form).inspect_err(|err| debug!(%err, "phrase rejected"))?;
        let phrase = self
            .store
            .insert(fields)
            .await
            .map_err(|err| self.log_store_error("insert", err))?;

        info!(id = %phrase.id, "phrase added");
        self.notifier.publish(ChangeEvent::PhrasesChanged);
        Ok(phrase)
    }

    /// Only the texts and `updated_at` change; the id must already exist.
    pub async fn update_phrase(&self, id: &str, form: &PhraseForm) -> ServiceResult<Phrase> {
        if id.trim().is_empty() {
            return Err(ServiceError::NotFound("Phrase not found.".into()));
        }
        let fields = validate_phrase(form).inspect_err(|err| debug!(%err, "phrase rejected"))?;
        let phrase = self
            .store
            .update(id, fields)
            .await
            .map_err(|err| self.log_store_error("update", err))?;

        info!(id = %phrase.id, "phrase updated");
        self.notifier.publish(ChangeEvent::PhrasesChanged);
        Ok(phrase)
    }

    pub async fn delete_phrase(&self, id: &str) -> ServiceResult<()> {
        self.store
            .delete(id)
            .await
            .map_err(|err| self.log_store_error("delete", err))?;

        info!(id, "phrase deleted");
        self.notifier.publish(ChangeEvent::PhrasesChanged);
        Ok(())
    }

    fn log_store_error(&self, op: &'static str, err: PhraseStoreError) -> ServiceError {
        match &err {
            PhraseStoreError::NotFound(id) => debug!(op, id = %id, "phrase not found"),
            PhraseStoreError::NotProvisioned => {
                warn!(op, backend = self.backend(), "phrases table is not provisioned")
            }
            PhraseStoreError::Duplicate(_) | PhraseStoreError::Backend(_) => {
                error!(op, backend = self.backend(), error = %err, "phrase store failure")
            }
        }
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::phrase_store::MemoryPhraseStore;

    fn service() -> (PhraseService, ChangeNotifier) {
        let notifier = ChangeNotifier::new();
        let service = PhraseService::new(Arc::new(MemoryPhraseStore::new()), notifier.clone());
        (service, notifier)
    }

    fn form(en: &str, tr: &str) -> PhraseForm {
        PhraseForm {
            english_text: Some(en.into()),
            turkish_translation: Some(tr.into()),
        }
    }

    #[tokio::test]
    async fn added_phrase_is_listed() {
        let (service, _) = service();
        let added = service
            .add_phrase(&form("Hello world", "Merhaba dünya"))
            .await
            .unwrap();
        assert_eq!(added.created_at, added.updated_at);

        let phrases = service.get_phrases().await.unwrap();
        assert_eq!(phrases.len(), 1);
        assert_eq!(phrases[0].english_text, "Hello world");
        assert_eq!(phrases[0].turkish_translation, "Merhaba dünya");
    }

    #[tokio::test]
    async fn invalid_phrase_leaves_collection_unchanged() {
        let (service, notifier) = service();
        let mut rx = notifier.subscribe();

        let too_long = "x".repeat(501);
        for (en, tr, field) in [
            ("", "a", "English text"),
            (too_long.as_str(), "a", "English text"),
            ("a", "", "Turkish translation"),
            ("a", too_long.as_str(), "Turkish translation"),
        ] {
            let err = service.add_phrase(&form(en, tr)).await.unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)));
            assert!(err.to_string().starts_with(field), "{err}");
        }

        assert!(service.get_phrases().await.unwrap().is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn update_on_missing_id_is_not_found() {
        let (service, _) = service();
        service.add_phrase(&form("a", "b")).await.unwrap();
        let before = service.get_phrases().await.unwrap();

        let err = service
            .update_phrase("404", &form("c", "d"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Phrase not found.");
        assert_eq!(service.get_phrases().await.unwrap(), before);
    }

    #[tokio::test]
    async fn update_changes_texts_only() {
        let (service, _) = service();
        let original = service.add_phrase(&form("a", "b")).await.unwrap();

        let updated = service
            .update_phrase(&original.id, &form("c", "d"))
            .await
            .unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at >= original.updated_at);
        assert_eq!(
            (updated.english_text.as_str(), updated.turkish_translation.as_str()),
            ("c", "d")
        );
    }

    #[tokio::test]
    async fn second_delete_of_same_id_fails() {
        let (service, _) = service();
        let a = service.add_phrase(&form("a", "b")).await.unwrap();
        service.add_phrase(&form("c", "d")).await.unwrap();

        service.delete_phrase(&a.id).await.unwrap();
        assert_eq!(service.get_phrases().await.unwrap().len(), 1);

        let err = service.delete_phrase(&a.id).await.unwrap_err();
        assert_eq!(err.to_string(), "Phrase not found.");
        assert_eq!(service.get_phrases().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn each_mutation_publishes_a_change() {
        let (service, notifier) = service();
        let mut rx = notifier.subscribe();

        let p = service.add_phrase(&form("a", "b")).await.unwrap();
        service.update_phrase(&p.id, &form("c", "d")).await.unwrap();
        service.delete_phrase(&p.id).await.unwrap();

        for _ in 0..3 {
            assert_eq!(rx.recv().await.unwrap(), ChangeEvent::PhrasesChanged);
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn unprovisioned_table_lists_empty_but_rejects_writes() {
        use sqlx::sqlite::SqlitePoolOptions;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let store = crate::services::sqlite_phrase_store::SqlitePhraseStore::new(Arc::new(pool));
        let service = PhraseService::new(Arc::new(store), ChangeNotifier::new());

        assert!(service.get_phrases().await.unwrap().is_empty());
        let err = service.add_phrase(&form("a", "b")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotProvisioned(_)));
    }
}
