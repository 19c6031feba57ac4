//! HTTP implementation of [`PortalService`]
//!
//! All bodies are JSON. Authentication rides on the session cookie, which the
//! client's cookie store keeps between calls.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::wire::{SendMessageResponse, StatusResponse, SuggestResponse};
use super::{PortalService, Reply, SendMessageRequest, ServiceError, SuggestRequest, TagUpdateRequest};
use crate::storage::settings::PortalSettings;
use crate::types::{ClientId, Message};

pub struct HttpPortalClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpPortalClient {
    /// Build a client for the portal described by `settings`
    pub fn new(settings: &PortalSettings) -> Result<Self, ServiceError> {
        let base_url = Url::parse(settings.base_url.trim())
            .map_err(|e| ServiceError::InvalidBaseUrl(format!("{}: {}", settings.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ServiceError::InvalidBaseUrl(settings.base_url.clone()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .cookie_store(true)
            .build()?;

        tracing::info!("Portal client targeting {}", base_url);
        Ok(Self { client, base_url })
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ServiceError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn post<B, R>(&self, url: Url, body: &B) -> Result<R, ServiceError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        tracing::debug!("POST {}", url);
        let response = self.client.post(url).json(body).send().await?;

        let status = response.status();
        let text = response.text().await?;
        decode_response(status, &text)
    }
}

/// Turn a portal response into its envelope
///
/// Error statuses are only read as an answer when the body still carries the
/// `success` field; anything else is a [`ServiceError::Status`].
fn decode_response<R: DeserializeOwned>(status: StatusCode, text: &str) -> Result<R, ServiceError> {
    if status.is_success() {
        return Ok(serde_json::from_str(text)?);
    }

    let status_error = || ServiceError::Status {
        status: status.as_u16(),
        body: text.to_string(),
    };
    let value: serde_json::Value = serde_json::from_str(text).map_err(|_| status_error())?;
    if value.get("success").is_none() {
        return Err(status_error());
    }
    serde_json::from_value(value).map_err(|_| status_error())
}

#[async_trait]
impl PortalService for HttpPortalClient {
    async fn send_message(
        &self,
        request: &SendMessageRequest,
    ) -> Result<Reply<Message>, ServiceError> {
        let url = self.endpoint(&["consultant", "send_message"])?;
        let response: SendMessageResponse = self.post(url, request).await?;
        response.into_reply()
    }

    async fn ai_suggest(&self, request: &SuggestRequest) -> Result<Reply<String>, ServiceError> {
        let url = self.endpoint(&["consultant", "ai_suggest"])?;
        let response: SuggestResponse = self.post(url, request).await?;
        response.into_reply()
    }

    async fn update_client_tag(
        &self,
        client_id: &ClientId,
        request: &TagUpdateRequest,
    ) -> Result<Reply<()>, ServiceError> {
        let url = self.endpoint(&["consultant", "clients", client_id.as_str(), "tags"])?;
        let response: StatusResponse = self.post(url, request).await?;
        Ok(response.into_reply())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(base_url: &str) -> Result<HttpPortalClient, ServiceError> {
        let settings = PortalSettings {
            base_url: base_url.to_string(),
            ..PortalSettings::default()
        };
        HttpPortalClient::new(&settings)
    }

    #[test]
    fn test_endpoint_from_root() {
        let client = client_for("http://127.0.0.1:5000").unwrap();
        let url = client.endpoint(&["consultant", "send_message"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/consultant/send_message");
    }

    #[test]
    fn test_endpoint_keeps_path_prefix() {
        let client = client_for("https://portal.example.com/desk/").unwrap();
        let url = client.endpoint(&["consultant", "ai_suggest"]).unwrap();
        assert_eq!(url.as_str(), "https://portal.example.com/desk/consultant/ai_suggest");
    }

    #[test]
    fn test_client_id_is_encoded() {
        let client = client_for("http://localhost").unwrap();
        let url = client
            .endpoint(&["consultant", "clients", "a/b", "tags"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost/consultant/clients/a%2Fb/tags");
    }

    #[test]
    fn test_error_status_with_envelope_is_rejection() {
        let resp: StatusResponse = decode_response(
            StatusCode::FORBIDDEN,
            r#"{"success": false, "message": "no perm"}"#,
        )
        .unwrap();
        assert_eq!(resp.into_reply(), Reply::Rejected(Some("no perm".into())));
    }

    #[test]
    fn test_error_status_without_envelope() {
        let result: Result<SendMessageResponse, _> =
            decode_response(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error": "db down"}"#);
        assert!(matches!(result, Err(ServiceError::Status { status: 500, .. })));

        let result: Result<SendMessageResponse, _> = decode_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "<html><body>Internal Server Error</body></html>",
        );
        assert!(matches!(result, Err(ServiceError::Status { status: 500, .. })));
    }

    #[test]
    fn test_ok_status_with_garbage_body() {
        let result: Result<StatusResponse, _> = decode_response(StatusCode::OK, "not json");
        assert!(matches!(result, Err(ServiceError::Decode(_))));
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            client_for("not a url"),
            Err(ServiceError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            client_for("mailto:desk@example.com"),
            Err(ServiceError::InvalidBaseUrl(_))
        ));
    }
}
