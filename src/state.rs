//! Shared state handed to every handler.

use crate::services::{
    clip_service::ClipService, events::ChangeNotifier, phrase_service::PhraseService,
    social_upload::SocialUploadService,
};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub phrases: PhraseService,
    pub uploads: SocialUploadService,
    pub clips: ClipService,
    pub notifier: ChangeNotifier,
    /// Present only when phrases live in SQLite; used by readiness checks.
    pub db: Option<Arc<SqlitePool>>,
}
