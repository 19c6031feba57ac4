//! Message types
//!
//! Defines the chat message structure shared by the controller, the service
//! client and the UI.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Prefix used for locally generated message ids
pub const PROVISIONAL_PREFIX: &str = "temp-";

/// Display format of message timestamps, identical to the portal's
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Identifier of a rendered message
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageId {
    /// Assigned locally before the server confirmed the message
    Provisional(String),
    /// Assigned by the messaging service
    Persisted(String),
}

impl MessageId {
    /// Build a provisional id from a unix timestamp in milliseconds
    pub fn provisional(millis: i64) -> Self {
        MessageId::Provisional(format!("{PROVISIONAL_PREFIX}{millis}"))
    }

    pub fn as_str(&self) -> &str {
        match self {
            MessageId::Provisional(id) | MessageId::Persisted(id) => id,
        }
    }

    pub fn is_provisional(&self) -> bool {
        matches!(self, MessageId::Provisional(_))
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MessageId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MessageId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // The portal hands out integer primary keys; older payloads used strings.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        let id = match RawId::deserialize(deserializer)? {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        };
        if id.starts_with(PROVISIONAL_PREFIX) {
            Ok(MessageId::Provisional(id))
        } else {
            Ok(MessageId::Persisted(id))
        }
    }
}

/// Kind of message content, sent as `msg_type`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Text,
    Image,
    File,
    System,
}

fn default_is_self() -> bool {
    true
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub content: String,
    /// Whether the local user authored the message. Confirmations of our own
    /// sends omit it.
    #[serde(default = "default_is_self")]
    pub is_self: bool,
    /// Display-formatted time
    #[serde(default)]
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<f32>,
}

impl Message {
    /// Create a self-authored provisional message stamped with the local time
    pub fn provisional(id: MessageId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            is_self: true,
            time: chrono::Local::now().format(TIME_FORMAT).to_string(),
            attachment_url: None,
            sentiment_score: None,
        }
    }

    /// Create a message as the service would return it
    pub fn persisted(
        id: impl Into<String>,
        content: impl Into<String>,
        is_self: bool,
        time: impl Into<String>,
    ) -> Self {
        Self {
            id: MessageId::Persisted(id.into()),
            content: content.into(),
            is_self,
            time: time.into(),
            attachment_url: None,
            sentiment_score: None,
        }
    }

    /// CSS class of the rendered bubble
    pub fn css_class(&self) -> &'static str {
        if self.is_self {
            "chat-message self"
        } else {
            "chat-message other"
        }
    }
}
