//! Chat session controller
//!
//! Owns the view of one conversation with a client. Sends are optimistic: the
//! message shows up as provisional right away and is swapped for the portal's
//! copy once the send is confirmed. A failed send leaves the provisional
//! message where it is.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use crate::service::{PortalService, Reply, SendMessageRequest};
use crate::types::{ClientId, Message, MessageId};

/// Alert prefix for sends the portal refused
pub const SEND_REJECTED_TEXT: &str = "Failed to send message";
/// Alert for sends that never got a usable answer
pub const SEND_RETRY_TEXT: &str = "Sending failed, please try again later";

/// Elements a chat view has to provide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatElement {
    InputField,
    SendControl,
    History,
}

/// View scope the controller drives
///
/// Methods take `&self`; implementations hold cheap handles with interior
/// mutability so the controller can be cloned into concurrent send tasks.
pub trait ChatSurface {
    /// First required element this scope lacks, if any
    fn missing_element(&self) -> Option<ChatElement>;
    fn input_text(&self) -> String;
    fn clear_input(&self);
    /// Conversation partner attached to the send control
    fn partner_id(&self) -> Option<String>;
    fn append_message(&self, message: &Message);
    /// Remove a rendered message, returning whether it was present
    fn remove_message(&self, id: &MessageId) -> bool;
    fn clear_history(&self);
    fn scroll_to_bottom(&self);
    fn alert(&self, text: &str);
}

/// Enter submits, Shift+Enter does not
pub fn is_submit_key(key: &str, shift: bool) -> bool {
    key == "Enter" && !shift
}

/// A send whose provisional message is already on screen
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSend {
    pub temp_id: MessageId,
    pub request: SendMessageRequest,
}

#[derive(Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Nothing to send: blank input or no partner
    Skipped,
    /// The portal stored the message; it replaced the provisional one
    Delivered(Message),
    /// The portal answered `success: false`
    Rejected {
        temp_id: MessageId,
        reason: Option<String>,
    },
    /// Transport or decoding failure
    Failed { temp_id: MessageId, error: String },
}

pub struct ChatSession<S: ?Sized, V> {
    service: Arc<S>,
    surface: V,
    last_temp_millis: Arc<AtomicI64>,
}

impl<S: ?Sized, V: Clone> Clone for ChatSession<S, V> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            surface: self.surface.clone(),
            last_temp_millis: Arc::clone(&self.last_temp_millis),
        }
    }
}

impl<S, V> ChatSession<S, V>
where
    S: PortalService + ?Sized,
    V: ChatSurface,
{
    /// Attach a controller to `surface`
    ///
    /// Returns `None` when the scope is missing one of its elements. The view
    /// is expected to route send-control clicks and [`is_submit_key`] presses
    /// to [`ChatSession::submit`].
    pub fn initialize(service: Arc<S>, surface: V) -> Option<Self> {
        if let Some(missing) = surface.missing_element() {
            tracing::debug!("Chat view lacks {:?}, not attaching", missing);
            return None;
        }

        surface.scroll_to_bottom();
        Some(Self {
            service,
            surface,
            last_temp_millis: Arc::new(AtomicI64::new(0)),
        })
    }

    /// Validate the input and put the provisional message on screen
    pub fn begin_submit(&self) -> Option<PendingSend> {
        let text = self.surface.input_text();
        let content = text.trim();
        if content.is_empty() {
            return None;
        }

        let client_id = self
            .surface
            .partner_id()
            .as_deref()
            .and_then(ClientId::parse)?;

        let temp_id = self.next_temp_id();
        self.append_message(&Message::provisional(temp_id.clone(), content));
        self.surface.clear_input();
        self.surface.scroll_to_bottom();

        Some(PendingSend {
            temp_id,
            request: SendMessageRequest::text(content, client_id),
        })
    }

    /// Send a pending message and reconcile the view with the answer
    pub async fn complete(&self, pending: PendingSend) -> SubmitOutcome {
        let PendingSend { temp_id, request } = pending;
        tracing::debug!(
            "Sending {} to client {}",
            temp_id,
            request.client_id
        );

        match self.service.send_message(&request).await {
            Ok(Reply::Accepted(message)) => {
                if !self.surface.remove_message(&temp_id) {
                    tracing::debug!("Provisional message {} already gone", temp_id);
                }
                self.append_message(&message);
                SubmitOutcome::Delivered(message)
            }
            Ok(Reply::Rejected(reason)) => {
                tracing::warn!("Portal refused message {}: {:?}", temp_id, reason);
                let text = match &reason {
                    Some(reason) => format!("{}: {}", SEND_REJECTED_TEXT, reason),
                    None => SEND_REJECTED_TEXT.to_string(),
                };
                self.surface.alert(&text);
                SubmitOutcome::Rejected { temp_id, reason }
            }
            Err(e) => {
                tracing::error!("Failed to send message {}: {}", temp_id, e);
                self.surface.alert(SEND_RETRY_TEXT);
                SubmitOutcome::Failed {
                    temp_id,
                    error: e.to_string(),
                }
            }
        }
    }

    /// Submit whatever is in the input field
    pub async fn submit(&self) -> SubmitOutcome {
        match self.begin_submit() {
            Some(pending) => self.complete(pending).await,
            None => SubmitOutcome::Skipped,
        }
    }

    pub fn append_message(&self, message: &Message) {
        self.surface.append_message(message);
        self.surface.scroll_to_bottom();
    }

    /// Replace the whole visible history with `messages`
    pub fn load_history(&self, messages: &[Message]) {
        self.surface.clear_history();
        for message in messages {
            self.append_message(message);
        }
    }

    /// Time-derived id, strictly increasing within the session
    fn next_temp_id(&self) -> MessageId {
        let now = chrono::Utc::now().timestamp_millis();
        let previous = self
            .last_temp_millis
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        MessageId::provisional(now.max(previous + 1))
    }
}
