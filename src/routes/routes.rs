//! Defines routes for the phrase console API.
//!
//! ## Structure
//! - **Phrases**
//!   - `GET    /phrases`             — list (supports `q`, `category`)
//!   - `POST   /phrases`             — add
//!   - `PUT    /phrases/{id}`        — update
//!   - `DELETE /phrases/{id}`        — delete
//!   - `POST   /phrases/{id}/clips`  — multipart clip upload
//!
//! - **Publishing**
//!   - `POST   /uploads`             — post a video through the social service
//!   - `POST   /edit/{operation}`    — editing stubs (501)
//!
//! - **Plumbing**
//!   - `GET    /events`              — SSE change notifications
//!   - `GET    /healthz`, `/readyz`

use crate::{
    handlers::{
        edit_handlers::edit_video,
        event_handlers::change_events,
        health_handlers::{healthz, readyz},
        phrase_handlers::{create_phrase, delete_phrase, list_phrases, update_phrase},
        upload_handlers::{upload_clips, upload_video},
    },
    state::AppState,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};

/// Clip batches are raw video, well beyond axum's default body limit.
const CLIP_BODY_LIMIT: usize = 512 * 1024 * 1024;

/// Build and return the router; handlers share `AppState`.
pub fn routes() -> Router<AppState> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/events", get(change_events))
        .route("/phrases", get(list_phrases).post(create_phrase))
        .route("/phrases/{id}", put(update_phrase).delete(delete_phrase))
        .route(
            "/phrases/{id}/clips",
            post(upload_clips).layer(DefaultBodyLimit::max(CLIP_BODY_LIMIT)),
        )
        .route("/uploads", post(upload_video))
        .route("/edit/{operation}", post(edit_video))
}
