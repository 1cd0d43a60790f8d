//! Video editing endpoints. None of these operations are backed by a
//! processing pipeline; they answer 501 so the console can label them.

use crate::{errors::AppError, models::outcome::ActionOutcome};
use axum::{Json, extract::Path, http::StatusCode};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOperation {
    Merge,
    Overlay,
    Resize,
    Thumbnail,
}

impl EditOperation {
    pub fn label(self) -> &'static str {
        match self {
            EditOperation::Merge => "Merging clips",
            EditOperation::Overlay => "Text overlay",
            EditOperation::Resize => "Resizing",
            EditOperation::Thumbnail => "Thumbnail generation",
        }
    }
}

impl FromStr for EditOperation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "merge" => Ok(EditOperation::Merge),
            "overlay" => Ok(EditOperation::Overlay),
            "resize" => Ok(EditOperation::Resize),
            "thumbnail" => Ok(EditOperation::Thumbnail),
            _ => Err(()),
        }
    }
}

/// `POST /edit/{operation}`
pub async fn edit_video(
    Path(operation): Path<String>,
) -> Result<(StatusCode, Json<ActionOutcome>), AppError> {
    let op = operation
        .parse::<EditOperation>()
        .map_err(|_| AppError::not_found(format!("Unknown edit operation `{operation}`.")))?;

    Ok((
        StatusCode::NOT_IMPLEMENTED,
        Json(ActionOutcome::failure(format!(
            "{} requires a video processing backend.",
            op.label()
        ))),
    ))
}
