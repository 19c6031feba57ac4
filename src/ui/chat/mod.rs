//! Chat interface components
//!
//! Wires the chat session controller to Dioxus signals through
//! [`SignalChatSurface`].

pub mod input;
pub mod message;

use dioxus::prelude::*;
use input::ChatInput;
use message::MessageBubble;

use crate::app::{AppState, Transcripts};
use crate::controller::{ChatElement, ChatSession, ChatSurface};
use crate::service::PortalService;
use crate::types::{ClientId, Message, MessageId};

/// DOM id of the scrollable history container
pub const HISTORY_ELEMENT_ID: &str = "chat-history";

const SCROLL_TO_BOTTOM_JS: &str = r#"
const history = document.getElementById("chat-history");
if (history) { history.scrollTop = history.scrollHeight; }
"#;

/// Chat view backed by the app-level transcript of one client
///
/// Only the draft belongs to the panel. History and alerts go to
/// [`Transcripts`] so a send that completes after the panel closed still
/// lands.
#[derive(Clone)]
pub struct SignalChatSurface {
    input: Signal<String>,
    partner: ClientId,
    transcripts: Signal<Transcripts>,
}

impl ChatSurface for SignalChatSurface {
    fn missing_element(&self) -> Option<ChatElement> {
        None
    }

    fn input_text(&self) -> String {
        self.input.peek().to_string()
    }

    fn clear_input(&self) {
        let mut input = self.input;
        input.set(String::new());
    }

    fn partner_id(&self) -> Option<String> {
        Some(self.partner.to_string())
    }

    fn append_message(&self, message: &Message) {
        let mut transcripts = self.transcripts;
        transcripts.write().push(&self.partner, message.clone());
    }

    fn remove_message(&self, id: &MessageId) -> bool {
        let mut transcripts = self.transcripts;
        let removed = transcripts.write().remove(&self.partner, id);
        removed
    }

    fn clear_history(&self) {
        let mut transcripts = self.transcripts;
        transcripts.write().clear(&self.partner);
    }

    fn scroll_to_bottom(&self) {
        let _ = document::eval(SCROLL_TO_BOTTOM_JS);
    }

    fn alert(&self, text: &str) {
        let mut transcripts = self.transcripts;
        transcripts.write().set_notice(&self.partner, text);
    }
}

type Session = ChatSession<dyn PortalService, SignalChatSurface>;

/// Run a send outside the panel's scope so closing the chat does not cancel it
fn dispatch_submit(session: &Option<Session>) {
    let Some(session) = session.clone() else {
        return;
    };
    if let Some(pending) = session.begin_submit() {
        spawn_forever(async move {
            session.complete(pending).await;
        });
    }
}

#[component]
pub fn ChatPanel(client_id: ClientId, client_name: String) -> Element {
    let app_state = use_context::<AppState>();
    let mut transcripts = app_state.transcripts;

    let input = use_signal(String::new);

    let session: Option<Session> = use_hook(|| {
        let surface = SignalChatSurface {
            input,
            partner: client_id.clone(),
            transcripts,
        };
        ChatSession::initialize(app_state.portal.clone(), surface)
    });

    let messages = transcripts.read().messages(&client_id).to_vec();
    let notice = transcripts.read().notice(&client_id).map(str::to_string);
    let session_for_send = session.clone();
    let notice_owner = client_id.clone();

    rsx! {
        div {
            class: "flex flex-col h-full min-h-0",

            div {
                class: "flex-none px-6 py-4 border-b border-[var(--border-subtle)]",
                h2 { class: "text-base font-semibold text-[var(--text-primary)]", "{client_name}" }
                span { class: "text-xs text-[var(--text-tertiary)]", "Client #{client_id}" }
            }

            if let Some(text) = notice {
                div {
                    class: "mx-6 mt-3 px-4 py-2 rounded-lg text-sm flex items-center justify-between",
                    style: "background: rgba(220,80,80,0.12); color: var(--error);",
                    span { "{text}" }
                    button {
                        class: "ml-4 opacity-60 hover:opacity-100",
                        onclick: move |_| transcripts.write().dismiss_notice(&notice_owner),
                        "×"
                    }
                }
            }

            div {
                id: HISTORY_ELEMENT_ID,
                class: "flex-1 overflow-y-auto px-6 py-4 space-y-3 custom-scrollbar",

                if messages.is_empty() {
                    div {
                        class: "text-center text-sm text-[var(--text-tertiary)] opacity-50 py-10",
                        "No messages yet"
                    }
                }

                for message in messages {
                    MessageBubble { key: "{message.id}", message: message.clone() }
                }
            }

            ChatInput {
                text: input,
                disabled: session.is_none(),
                on_send: move |_| dispatch_submit(&session_for_send),
            }
        }
    }
}
