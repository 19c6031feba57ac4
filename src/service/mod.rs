//! Portal service client
//!
//! The portal backend is the source of truth for messages, AI answers and
//! client tags. Controllers reach it through [`PortalService`] so tests can
//! swap in fakes.

pub mod http;
pub mod wire;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{ClientId, Message};
pub use http::HttpPortalClient;
pub use wire::{SendMessageRequest, SuggestRequest, TagUpdateRequest};

/// Answer of a call that reached the portal and was understood
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    /// `success: true`
    Accepted(T),
    /// `success: false`, with the server's explanation when it gave one
    Rejected(Option<String>),
}

impl<T> Reply<T> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Reply::Accepted(_))
    }
}

/// Transport and decoding failures
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Portal returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("Invalid portal URL: {0}")]
    InvalidBaseUrl(String),
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        ServiceError::Decode(e.to_string())
    }
}

/// Endpoints of the consultant portal used by the desk
#[async_trait]
pub trait PortalService: Send + Sync {
    /// `POST /consultant/send_message`
    async fn send_message(&self, request: &SendMessageRequest)
        -> Result<Reply<Message>, ServiceError>;

    /// `POST /consultant/ai_suggest`
    async fn ai_suggest(&self, request: &SuggestRequest) -> Result<Reply<String>, ServiceError>;

    /// `POST /consultant/clients/{id}/tags`
    async fn update_client_tag(
        &self,
        client_id: &ClientId,
        request: &TagUpdateRequest,
    ) -> Result<Reply<()>, ServiceError>;
}
