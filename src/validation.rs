//! Input-shape checks for phrase, credential and upload forms.
//!
//! Every check runs in field declaration order and stops at the first
//! violation; callers only ever see a single message.

use crate::models::{
    phrase::{PhraseFields, PhraseForm},
    upload::{Platform, UploadForm, UploadRequest, normalize_tags},
};
use thiserror::Error;
use validator::{ValidateEmail, ValidateUrl};

pub const PHRASE_TEXT_MAX_LEN: usize = 500;
pub const TITLE_MAX_LEN: usize = 255;
pub const DESCRIPTION_MAX_LEN: usize = 1000;
pub const PASSWORD_MIN_LEN: usize = 6;

/// The first violated constraint, phrased for display.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Login / sign-up credentials after validation.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Check a required text field against `1..=max` characters.
fn bounded_text(value: Option<&str>, max: usize, label: &str) -> ValidationResult<String> {
    let value = value.unwrap_or_default();
    let len = value.chars().count();
    if len == 0 {
        return Err(ValidationError(format!("{label} is required.")));
    }
    if len > max {
        return Err(ValidationError(format!("{label} is too long.")));
    }
    Ok(value.to_string())
}

pub fn validate_phrase(form: &PhraseForm) -> ValidationResult<PhraseFields> {
    let english_text = bounded_text(
        form.english_text.as_deref(),
        PHRASE_TEXT_MAX_LEN,
        "English text",
    )?;
    let turkish_translation = bounded_text(
        form.turkish_translation.as_deref(),
        PHRASE_TEXT_MAX_LEN,
        "Turkish translation",
    )?;
    Ok(PhraseFields {
        english_text,
        turkish_translation,
    })
}

/// Shape check for login and sign-up forms: email first, then password.
#[allow(dead_code)]
pub fn validate_credentials(
    email: Option<&str>,
    password: Option<&str>,
) -> ValidationResult<Credentials> {
    let email = email.unwrap_or_default();
    if !email.validate_email() {
        return Err(ValidationError("Invalid email address.".into()));
    }
    let password = password.unwrap_or_default();
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(ValidationError(format!(
            "Password must be at least {PASSWORD_MIN_LEN} characters long."
        )));
    }
    Ok(Credentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

pub fn validate_upload(form: &UploadForm) -> ValidationResult<UploadRequest> {
    let video_url = form.video_url.as_deref().unwrap_or_default();
    if video_url.is_empty() || !video_url.validate_url() {
        return Err(ValidationError("Invalid video URL provided.".into()));
    }
    let title = bounded_text(form.title.as_deref(), TITLE_MAX_LEN, "Title")?;
    let description = bounded_text(
        form.description.as_deref(),
        DESCRIPTION_MAX_LEN,
        "Description",
    )?;
    let tags = normalize_tags(form.tags.as_deref());

    let mut platforms = Vec::with_capacity(form.platforms.len());
    for raw in &form.platforms {
        let platform = raw
            .parse::<Platform>()
            .map_err(|name| ValidationError(format!("Invalid platform `{name}`.")))?;
        if !platforms.contains(&platform) {
            platforms.push(platform);
        }
    }
    if platforms.is_empty() {
        return Err(ValidationError(
            "At least one platform must be selected.".into(),
        ));
    }

    Ok(UploadRequest {
        video_url: video_url.to_string(),
        title,
        description,
        tags,
        platforms,
    })
}
