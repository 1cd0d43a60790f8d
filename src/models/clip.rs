//! A video clip attached to a phrase.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Metadata for a clip payload written beneath the storage directory.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    pub id: Uuid,
    pub phrase_id: String,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    /// Hex MD5 of the payload.
    pub etag: String,
    pub stored_at: DateTime<Utc>,
}

/// Per-file result of a clip batch; one file failing never affects the others.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ClipUploadResult {
    pub file_name: String,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip: Option<Clip>,
}
