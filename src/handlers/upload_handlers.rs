//! Handlers for outbound social posts and inbound clip uploads.

use crate::{
    errors::{AppError, ServiceError},
    models::{clip::ClipUploadResult, outcome::ActionOutcome, upload::UploadForm},
    services::social_upload::UPLOAD_SENT,
    state::AppState,
};
use axum::{
    Json,
    extract::{
        Multipart, Path, State, multipart::MultipartRejection, rejection::JsonRejection,
    },
    http::StatusCode,
};
use futures::StreamExt;
use serde_json::json;
use std::io;
use tracing::info;

/// `POST /uploads`: hand a finished video to the social posting service.
pub async fn upload_video(
    State(state): State<AppState>,
    form: Result<Json<UploadForm>, JsonRejection>,
) -> Result<Json<ActionOutcome>, AppError> {
    let Json(form) = form?;
    let data = state.uploads.upload_video(&form).await?;
    Ok(Json(ActionOutcome::ok(UPLOAD_SENT).with_data(data)))
}

/// `POST /phrases/{id}/clips`: multipart batch of video clips for a phrase.
///
/// Each file part is stored independently; the response lists a result per
/// file and is only a success when every file was stored.
pub async fn upload_clips(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<ActionOutcome>), AppError> {
    let mut multipart = multipart?;
    let phrase = state.phrases.get_phrase(&id).await?;

    let mut results = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let stream = field.map(|chunk| chunk.map_err(io::Error::other));

        let result = match state
            .clips
            .store_clip(&phrase.id, &file_name, content_type.as_deref(), stream)
            .await
        {
            Ok(clip) => ClipUploadResult {
                message: format!("{file_name} uploaded successfully!"),
                file_name,
                success: true,
                clip: Some(clip),
            },
            Err(err) => ClipUploadResult {
                file_name,
                success: false,
                message: err.to_string(),
                clip: None,
            },
        };
        results.push(result);
    }

    if results.is_empty() {
        return Err(ServiceError::InvalidInput(
            "Please drag and drop video clips to upload.".into(),
        )
        .into());
    }

    let stored = results.iter().filter(|r| r.success).count();
    let total = results.len();
    info!(phrase_id = %phrase.id, stored, total, "clip batch processed");

    let message = format!("Uploaded {stored} of {total} clips.");
    let (status, outcome) = if stored == total {
        (StatusCode::OK, ActionOutcome::ok(message))
    } else {
        (StatusCode::MULTI_STATUS, ActionOutcome::failure(message))
    };
    Ok((status, Json(outcome.with_data(json!(results)))))
}
