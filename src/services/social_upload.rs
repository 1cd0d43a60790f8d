//! Outbound video posts through the social posting service.
//!
//! A successful call only means the service accepted the post; publication on
//! each platform happens later and is not tracked here.

use super::events::{ChangeEvent, ChangeNotifier};
use crate::{
    errors::{ServiceError, ServiceResult},
    models::upload::{SocialPostBody, UploadForm},
    validation::validate_upload,
};
use serde_json::Value;
use tracing::{debug, error, info};

pub const UPLOAD_SENT: &str = "Video upload request sent successfully!";
const UPLOAD_FAILED: &str = "Failed to upload video to social media.";

#[derive(Clone)]
pub struct SocialUploadService {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    notifier: ChangeNotifier,
}

impl SocialUploadService {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        notifier: ChangeNotifier,
    ) -> reqwest::Result<Self> {
        // No client-side timeout: a post waits as long as the service takes.
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            notifier,
        })
    }

    /// Validate the form, post it, and return the service's JSON reply.
    pub async fn upload_video(&self, form: &UploadForm) -> ServiceResult<Value> {
        let Some(api_key) = self.api_key.as_deref() else {
            error!("social posting API key is not configured");
            return Err(ServiceError::Configuration(
                "Social posting API key is not configured.".into(),
            ));
        };

        let request = validate_upload(form).inspect_err(|err| debug!(%err, "upload rejected"))?;
        let body = SocialPostBody::from(&request);

        let (status, data) = self
            .send(api_key, &body)
            .await
            .map_err(|err| {
                error!(error = %err, endpoint = %self.endpoint, "social post request failed");
                ServiceError::Upstream(format!("An unexpected error occurred: {err}"))
            })?;

        if !status.is_success() {
            error!(%status, response = %data, "social posting service rejected the post");
            let message = data
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or(UPLOAD_FAILED);
            return Err(ServiceError::Upstream(message.to_string()));
        }

        info!(
            platforms = ?request.platforms,
            title = %request.title,
            "video post accepted by social posting service"
        );
        self.notifier.publish(ChangeEvent::UploadsChanged);
        Ok(data)
    }

    /// POST the body and decode whatever JSON comes back. Error replies with
    /// an unreadable body decode to `Null`.
    async fn send(
        &self,
        api_key: &str,
        body: &SocialPostBody,
    ) -> reqwest::Result<(reqwest::StatusCode, Value)> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok((status, response.json::<Value>().await?))
        } else {
            Ok((status, response.json::<Value>().await.unwrap_or(Value::Null)))
        }
    }
}
