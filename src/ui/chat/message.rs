//! Message bubble component

use crate::types::Message;
use dioxus::prelude::*;

#[component]
pub fn MessageBubble(message: Message) -> Element {
    let is_pending = message.id.is_provisional();

    let row_class = if message.is_self {
        "flex justify-end"
    } else {
        "flex justify-start"
    };

    let bubble_style = match (message.is_self, is_pending) {
        (true, true) => "background: var(--accent-primary); color: #F2EDE7; opacity: 0.6;",
        (true, false) => "background: var(--accent-primary); color: #F2EDE7;",
        _ => "background: var(--bg-elevated); color: var(--text-primary);",
    };

    let id = message.id.to_string();
    let class = message.css_class();

    rsx! {
        div {
            class: "{row_class}",
            div {
                id: "{id}",
                class: "{class} max-w-[75%] px-4 py-2.5 rounded-2xl",
                style: "{bubble_style}",

                div {
                    class: "message-content whitespace-pre-wrap break-words text-[15px] leading-relaxed",
                    "{message.content}"
                }

                if let Some(url) = message.attachment_url.clone() {
                    a {
                        class: "block text-xs underline mt-1 opacity-80",
                        href: "{url}",
                        "Attachment"
                    }
                }

                small {
                    class: "block mt-1 text-[11px] opacity-60",
                    if is_pending { "Sending… · {message.time}" } else { "{message.time}" }
                }
            }
        }
    }
}
