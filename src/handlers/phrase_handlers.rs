//! HTTP handlers for phrase CRUD. Thin wrappers that turn `PhraseService`
//! results into the uniform `{success, message, data?}` body.

use crate::{
    errors::AppError,
    models::{
        outcome::ActionOutcome,
        phrase::{Phrase, PhraseFilter, PhraseForm},
    },
    services::phrase_service::{PHRASE_ADDED, PHRASE_DELETED, PHRASE_UPDATED},
    state::AppState,
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde_json::json;

/// `GET /phrases?q=&category=`
pub async fn list_phrases(
    State(state): State<AppState>,
    filter: Result<Query<PhraseFilter>, QueryRejection>,
) -> Result<Json<Vec<Phrase>>, AppError> {
    let Query(filter) = filter?;
    Ok(Json(state.phrases.search_phrases(&filter).await?))
}

/// `POST /phrases`
pub async fn create_phrase(
    State(state): State<AppState>,
    form: Result<Json<PhraseForm>, JsonRejection>,
) -> Result<(StatusCode, Json<ActionOutcome>), AppError> {
    let Json(form) = form?;
    let phrase = state.phrases.add_phrase(&form).await?;
    Ok((
        StatusCode::CREATED,
        Json(ActionOutcome::ok(PHRASE_ADDED).with_data(json!(phrase))),
    ))
}

/// `PUT /phrases/{id}`
pub async fn update_phrase(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: Result<Json<PhraseForm>, JsonRejection>,
) -> Result<Json<ActionOutcome>, AppError> {
    let Json(form) = form?;
    let phrase = state.phrases.update_phrase(&id, &form).await?;
    Ok(Json(ActionOutcome::ok(PHRASE_UPDATED).with_data(json!(phrase))))
}

/// `DELETE /phrases/{id}`
pub async fn delete_phrase(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ActionOutcome>, AppError> {
    state.phrases.delete_phrase(&id).await?;
    Ok(Json(ActionOutcome::ok(PHRASE_DELETED)))
}
