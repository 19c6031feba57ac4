//! Root Dioxus application component
//!
//! This module contains the App component and the state shared across the
//! component tree.

use crate::service::PortalService;
use crate::storage::settings::{save_settings, PortalSettings};
use crate::types::client::with_tag;
use crate::types::{ClientId, ClientTag, Message, MessageId};
use crate::ui::Layout;
use dioxus::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

/// Chat history of every client opened this session
///
/// Lives at the app level so a send finishing after its chat view was closed
/// still reconciles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcripts {
    by_client: HashMap<ClientId, Vec<Message>>,
    notices: HashMap<ClientId, String>,
}

impl Transcripts {
    pub fn messages(&self, client_id: &ClientId) -> &[Message] {
        self.by_client
            .get(client_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn push(&mut self, client_id: &ClientId, message: Message) {
        self.by_client
            .entry(client_id.clone())
            .or_default()
            .push(message);
    }

    pub fn remove(&mut self, client_id: &ClientId, id: &MessageId) -> bool {
        let Some(list) = self.by_client.get_mut(client_id) else {
            return false;
        };
        let before = list.len();
        list.retain(|m| &m.id != id);
        list.len() != before
    }

    pub fn clear(&mut self, client_id: &ClientId) {
        self.by_client.remove(client_id);
    }

    pub fn notice(&self, client_id: &ClientId) -> Option<&str> {
        self.notices.get(client_id).map(String::as_str)
    }

    pub fn set_notice(&mut self, client_id: &ClientId, text: &str) {
        self.notices.insert(client_id.clone(), text.to_string());
    }

    pub fn dismiss_notice(&mut self, client_id: &ClientId) {
        self.notices.remove(client_id);
    }

    /// Last `count` messages as `consultant: ...` / `client: ...` lines
    pub fn recent_lines(&self, client_id: &ClientId, count: usize) -> Vec<String> {
        let messages = self.messages(client_id);
        let start = messages.len().saturating_sub(count);
        messages[start..]
            .iter()
            .map(|m| {
                let who = if m.is_self { "consultant" } else { "client" };
                format!("{}: {}", who, m.content)
            })
            .collect()
    }
}

/// Everything `main` prepares before the window opens
#[derive(Clone)]
pub struct Bootstrap {
    pub portal: Arc<dyn PortalService>,
    pub settings: PortalSettings,
}

/// Global application state shared across components
#[derive(Clone)]
pub struct AppState {
    pub portal: Arc<dyn PortalService>,
    pub settings: Signal<PortalSettings>,
    pub selected_client: Signal<Option<ClientId>>,
    pub transcripts: Signal<Transcripts>,
}

impl AppState {
    pub fn new(bootstrap: Bootstrap) -> Self {
        let selected = bootstrap
            .settings
            .client_id
            .as_deref()
            .and_then(ClientId::parse);
        tracing::info!(
            "AppState initialized with {} clients",
            bootstrap.settings.clients.len()
        );

        Self {
            portal: bootstrap.portal,
            settings: Signal::new(bootstrap.settings),
            selected_client: Signal::new(selected),
            transcripts: Signal::new(Transcripts::default()),
        }
    }

    /// Open the conversation with `client_id` and remember the choice
    pub fn select_client(&mut self, client_id: ClientId) {
        self.settings.write().client_id = Some(client_id.to_string());
        if let Err(e) = save_settings(&self.settings.read()) {
            tracing::warn!("Failed to persist selected client: {}", e);
        }
        self.selected_client.set(Some(client_id));
    }

    /// Record a tag change the portal accepted in the local roster
    pub fn record_tag(&mut self, tag: &ClientTag, active: bool) {
        {
            let mut settings = self.settings.write();
            let Some(entry) = settings
                .clients
                .iter_mut()
                .find(|c| c.id.trim() == tag.client_id.as_str())
            else {
                return;
            };
            entry.tags = with_tag(&entry.tags, &tag.tag, active);
        }
        if let Err(e) = save_settings(&self.settings.read()) {
            tracing::warn!("Failed to persist tags for client {}: {}", tag.client_id, e);
        }
    }
}

#[component]
pub fn App() -> Element {
    let bootstrap = use_context::<Bootstrap>();
    use_context_provider(|| AppState::new(bootstrap));

    rsx! {
        Layout {}
    }
}
