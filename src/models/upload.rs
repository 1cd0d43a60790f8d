//! Social upload request types: the raw console form, the validated request,
//! and the JSON body sent to the posting service.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Platforms the posting service can fan a video out to.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Tiktok,
    Instagram,
    Pinterest,
    Facebook,
    Youtube,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Tiktok,
        Platform::Instagram,
        Platform::Pinterest,
        Platform::Facebook,
        Platform::Youtube,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Tiktok => "tiktok",
            Platform::Instagram => "instagram",
            Platform::Pinterest => "pinterest",
            Platform::Facebook => "facebook",
            Platform::Youtube => "youtube",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Upload form as posted by the console. Platforms stay as raw strings until
/// validation so unknown values produce a readable message.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UploadForm {
    pub video_url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
}

/// A validated upload. Constructed per submission and never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadRequest {
    pub video_url: String,
    pub title: String,
    pub description: String,
    /// Normalized tag list (trimmed, empties dropped).
    pub tags: Vec<String>,
    pub platforms: Vec<Platform>,
}

/// Wire body accepted by the social posting endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SocialPostBody {
    /// Post text; carries the upload description.
    pub post: String,
    pub platforms: Vec<Platform>,
    pub media_urls: Vec<String>,
    /// Used by platforms with a distinct title field (e.g. YouTube).
    pub title: String,
    pub tags: Vec<String>,
}

impl From<&UploadRequest> for SocialPostBody {
    fn from(req: &UploadRequest) -> Self {
        Self {
            post: req.description.clone(),
            platforms: req.platforms.clone(),
            media_urls: vec![req.video_url.clone()],
            title: req.title.clone(),
            tags: req.tags.clone(),
        }
    }
}

/// Split a comma separated tag string into trimmed tags. Empty segments are
/// kept in place; only a missing or empty string yields no tags.
pub fn normalize_tags(raw: Option<&str>) -> Vec<String> {
    raw.filter(|tags| !tags.is_empty())
        .map(|tags| tags.split(',').map(|t| t.trim().to_string()).collect())
        .unwrap_or_default()
}
