//! Chat input component - glass style with send button inside

use crate::controller::is_submit_key;
use dioxus::prelude::*;

/// Estimate how many rows the textarea needs based on content
fn compute_rows(text: &str) -> usize {
    let newlines = text.chars().filter(|&c| c == '\n').count();
    // Each visual line ~ 70 chars for our input width
    let wrap_lines: usize = text
        .lines()
        .map(|line| {
            if line.is_empty() {
                0
            } else {
                (line.chars().count().saturating_sub(1)) / 70
            }
        })
        .sum();
    let total = newlines + wrap_lines + 1;
    total.clamp(1, 8)
}

#[component]
pub fn ChatInput(text: Signal<String>, disabled: bool, on_send: EventHandler<()>) -> Element {
    let mut text = text;

    let handle_keydown = move |evt: KeyboardEvent| {
        let shift = evt.modifiers().contains(Modifiers::SHIFT);
        if is_submit_key(&evt.key().to_string(), shift) {
            evt.prevent_default();
            on_send.call(());
        }
    };

    let can_send = !disabled && !text().trim().is_empty();
    let rows = compute_rows(&text());
    let rows_str = format!("{}", rows);
    let is_multiline = rows > 1;

    let container_class = if is_multiline {
        "glass-input flex items-end gap-2 pr-2"
    } else {
        "glass-input flex items-center gap-2 pr-2"
    };

    let send_class = if can_send {
        "flex-shrink-0 w-9 h-9 rounded-full flex items-center justify-center transition-all hover:scale-105 active:scale-95"
    } else {
        "flex-shrink-0 w-9 h-9 rounded-full flex items-center justify-center transition-all cursor-not-allowed opacity-30"
    };

    let mb = if is_multiline { " margin-bottom: 8px;" } else { "" };
    let send_style = if can_send {
        format!("background: var(--accent-primary); color: #F2EDE7;{mb}")
    } else {
        format!("background: var(--bg-elevated);{mb}")
    };

    rsx! {
        div {
            class: "w-full px-4 pb-5 pt-2",

            div {
                class: "relative max-w-3xl mx-auto",

                div {
                    class: "{container_class}",
                    style: "border-radius: 28px; min-height: 52px;",

                    textarea {
                        id: "message-input",
                        class: "flex-1 bg-transparent outline-none text-[var(--text-primary)] resize-none placeholder-[var(--text-tertiary)] text-[15px] custom-scrollbar",
                        style: "line-height: 22px; padding: 14px 0 14px 20px; max-height: 180px; overflow-y: auto;",
                        placeholder: "Write to the client...",
                        value: "{text}",
                        oninput: move |evt| text.set(evt.value()),
                        onkeydown: handle_keydown,
                        disabled: disabled,
                        rows: "{rows_str}",
                    }

                    button {
                        id: "send-button",
                        onclick: move |_| on_send.call(()),
                        disabled: !can_send,
                        class: "{send_class}",
                        style: "{send_style}",
                        title: "Send (Enter)",
                        svg {
                            width: "16",
                            height: "16",
                            view_box: "0 0 24 24",
                            fill: "none",
                            stroke: "currentColor",
                            stroke_width: "2",
                            stroke_linecap: "round",
                            stroke_linejoin: "round",
                            line { x1: "12", y1: "19", x2: "12", y2: "5" }
                            polyline { points: "5 12 12 5 19 12" }
                        }
                    }
                }

                p {
                    class: "text-center text-[11px] text-[var(--text-tertiary)] mt-2 opacity-40",
                    "Enter to send, Shift+Enter for a new line"
                }
            }
        }
    }
}
