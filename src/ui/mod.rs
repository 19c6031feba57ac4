//! UI components for ConsultDesk
//!
//! This module contains all user interface components built with Dioxus.

#![allow(non_snake_case)]

pub mod assistant;
pub mod chat;
pub mod clients;
pub mod sidebar;

use crate::app::AppState;
use crate::ui::assistant::SuggestPanel;
use crate::ui::chat::ChatPanel;
use crate::ui::clients::ClientTable;
use crate::ui::sidebar::ClientList;
use dioxus::prelude::*;

const DARK_THEME: &str = "--bg-base: #161412; --bg-elevated: #24211E; --text-primary: #F2EDE7; --text-secondary: #C9C1B8; --text-tertiary: #8A8178; --border-subtle: rgba(242,237,231,0.08); --accent-primary: #C2703D; --error: #E06A5F;";
const LIGHT_THEME: &str = "--bg-base: #FAF8F5; --bg-elevated: #EFEAE4; --text-primary: #221F1C; --text-secondary: #4A443E; --text-tertiary: #8A8178; --border-subtle: rgba(34,31,28,0.10); --accent-primary: #B0612F; --error: #C0392B;";

#[derive(PartialEq, Clone, Copy)]
enum MainTab {
    Chat,
    Clients,
}

#[component]
pub fn Layout() -> Element {
    let mut active_tab = use_signal(|| MainTab::Chat);
    let app_state = use_context::<AppState>();

    let theme = if app_state.settings.read().theme == "light" {
        LIGHT_THEME
    } else {
        DARK_THEME
    };

    let selected = app_state.selected_client.read().clone();
    let selected_name = selected.as_ref().map(|id| {
        app_state
            .settings
            .read()
            .clients
            .iter()
            .find(|c| c.id.trim() == id.as_str())
            .map(|c| c.name.clone())
            .unwrap_or_else(|| id.to_string())
    });

    rsx! {
        div {
            class: "flex h-screen w-screen overflow-hidden",
            style: "{theme} background: var(--bg-base); color: var(--text-primary);",

            aside {
                class: "flex flex-col w-64 flex-none border-r border-[var(--border-subtle)]",
                div {
                    class: "px-4 py-4 text-sm font-semibold tracking-wide",
                    "ConsultDesk"
                }
                ClientList {}
            }

            main {
                class: "flex flex-col flex-1 min-w-0",

                div {
                    class: "flex-none px-6 pt-4",
                    div {
                        class: "flex gap-1 p-1 rounded-xl w-fit",
                        style: "background: rgba(242,237,231,0.03); border: 1px solid rgba(242,237,231,0.06);",

                        TabButton {
                            active: active_tab() == MainTab::Chat,
                            onclick: move |_| active_tab.set(MainTab::Chat),
                            label: "Chat",
                        }
                        TabButton {
                            active: active_tab() == MainTab::Clients,
                            onclick: move |_| active_tab.set(MainTab::Clients),
                            label: "Clients",
                        }
                    }
                }

                div {
                    class: "flex-1 min-h-0",
                    match active_tab() {
                        MainTab::Chat => rsx! {
                            div {
                                class: "flex flex-col h-full min-h-0",
                                div {
                                    class: "flex-1 min-h-0",
                                    if let Some((client_id, name)) = selected.clone().zip(selected_name.clone()) {
                                        ChatPanel {
                                            key: "{client_id}",
                                            client_id: client_id,
                                            client_name: name,
                                        }
                                    } else {
                                        div {
                                            class: "flex items-center justify-center h-full text-sm text-[var(--text-tertiary)] opacity-50",
                                            "Select a client to start chatting"
                                        }
                                    }
                                }
                                SuggestPanel {}
                            }
                        },
                        MainTab::Clients => rsx! { ClientTable {} },
                    }
                }
            }
        }
    }
}

#[component]
fn TabButton(active: bool, onclick: EventHandler<MouseEvent>, label: String) -> Element {
    let classes = if active {
        "text-[var(--text-primary)] shadow-sm"
    } else {
        "text-[var(--text-tertiary)] hover:text-[var(--text-secondary)]"
    };

    rsx! {
        button {
            class: "py-2 px-4 rounded-lg text-sm font-medium transition-all {classes}",
            style: if active { "background: rgba(242,237,231,0.06); border: 1px solid rgba(242,237,231,0.08);" } else { "" },
            onclick: onclick,
            "{label}"
        }
    }
}
