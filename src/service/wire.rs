//! Request and response bodies of the portal endpoints

use serde::{Deserialize, Serialize};

use super::{Reply, ServiceError};
use crate::types::{ClientId, Message, MessageKind};

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendMessageRequest {
    pub content: String,
    pub client_id: ClientId,
    pub msg_type: MessageKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

impl SendMessageRequest {
    pub fn text(content: impl Into<String>, client_id: ClientId) -> Self {
        Self {
            content: content.into(),
            client_id,
            msg_type: MessageKind::Text,
            attachment_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestRequest {
    pub question: String,
    /// Prior conversation lines the answer may take into account
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagUpdateRequest {
    pub tag: String,
    pub add: bool,
}

// ============================================================================
// Responses
// ============================================================================

/// `message` is the confirmed message on success and an error text on failure
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SendPayload {
    Confirmed(Message),
    Text(String),
}

#[derive(Debug, Deserialize)]
pub(crate) struct SendMessageResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<SendPayload>,
}

impl SendMessageResponse {
    pub(crate) fn into_reply(self) -> Result<Reply<Message>, ServiceError> {
        match (self.success, self.message) {
            (true, Some(SendPayload::Confirmed(message))) => Ok(Reply::Accepted(message)),
            (true, _) => Err(ServiceError::Decode(
                "success without a confirmed message".into(),
            )),
            (false, Some(SendPayload::Text(text))) => Ok(Reply::Rejected(Some(text))),
            (false, _) => Ok(Reply::Rejected(None)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SuggestResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl SuggestResponse {
    pub(crate) fn into_reply(self) -> Result<Reply<String>, ServiceError> {
        match (self.success, self.answer) {
            (true, Some(answer)) => Ok(Reply::Accepted(answer)),
            (true, None) => Err(ServiceError::Decode("success without an answer".into())),
            (false, _) => Ok(Reply::Rejected(self.message)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

impl StatusResponse {
    pub(crate) fn into_reply(self) -> Reply<()> {
        if self.success {
            Reply::Accepted(())
        } else {
            Reply::Rejected(self.message)
        }
    }
}
