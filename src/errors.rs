use crate::{
    models::outcome::ActionOutcome, services::phrase_store::PhraseStoreError,
    validation::ValidationError,
};
use axum::{
    Json,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use thiserror::Error;

/// Failure taxonomy shared by every console operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// User input failed a declared constraint.
    #[error("{0}")]
    Validation(#[from] ValidationError),
    /// A submitted file or parameter is unusable (e.g. not a video).
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
    /// The backing table does not exist yet.
    #[error("{0}")]
    NotProvisioned(String),
    #[error("{0}")]
    Backend(String),
    /// The social posting service rejected the request or could not be reached.
    #[error("{0}")]
    Upstream(String),
    /// A required credential or setting is missing.
    #[error("{0}")]
    Configuration(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::NotProvisioned(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::Backend(_) | ServiceError::Configuration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServiceError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<PhraseStoreError> for ServiceError {
    fn from(err: PhraseStoreError) -> Self {
        match err {
            PhraseStoreError::NotFound(_) => ServiceError::NotFound("Phrase not found.".into()),
            PhraseStoreError::NotProvisioned => ServiceError::NotProvisioned(
                "The phrases table does not exist yet. Run the server with --migrate to create it."
                    .into(),
            ),
            PhraseStoreError::Duplicate(id) => {
                ServiceError::Backend(format!("A phrase with id `{id}` already exists."))
            }
            PhraseStoreError::Backend(err) => {
                ServiceError::Backend(format!("Database error: {err}"))
            }
        }
    }
}

impl From<ServiceError> for ActionOutcome {
    fn from(err: ServiceError) -> Self {
        ActionOutcome::failure(err.to_string())
    }
}

/// A lightweight wrapper for general errors that keeps the message local.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    /// Create a new AppError with a specific status and message.
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, msg)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(ActionOutcome::failure(self.message))).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        AppError::new(err.status(), err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}

/// Extractor rejections keep axum's status and text but use the uniform body.
macro_rules! from_rejection {
    ($($rejection:ty),+ $(,)?) => {
        $(
            impl From<$rejection> for AppError {
                fn from(rejection: $rejection) -> Self {
                    AppError::new(rejection.status(), rejection.body_text())
                }
            }
        )+
    };
}

from_rejection!(
    JsonRejection,
    QueryRejection,
    MultipartRejection,
    MultipartError
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_console_messages() {
        let err: ServiceError = PhraseStoreError::NotFound("42".into()).into();
        assert_eq!(err.to_string(), "Phrase not found.");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err: ServiceError = PhraseStoreError::NotProvisioned.into();
        assert!(err.to_string().contains("does not exist yet"));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn service_errors_become_failure_outcomes() {
        let outcome: ActionOutcome =
            ServiceError::Validation(ValidationError("Title is required.".into())).into();
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Title is required.");
        assert!(outcome.data.is_none());
    }
}
