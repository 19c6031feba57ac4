//! Client table with tag toggles

use std::collections::HashSet;

use dioxus::prelude::*;

use crate::app::AppState;
use crate::controller::{TagOutcome, TagSurface, TagToggle};
use crate::service::PortalService;
use crate::storage::settings::ClientEntry;
use crate::types::client::split_tags;
use crate::types::{ClientId, ClientTag};

#[derive(Clone, Copy)]
pub struct SignalTagSurface {
    active: Signal<HashSet<ClientTag>>,
    notice: Signal<Option<String>>,
}

impl TagSurface for SignalTagSurface {
    fn is_active(&self, tag: &ClientTag) -> bool {
        self.active.peek().contains(tag)
    }

    fn set_active(&self, tag: &ClientTag, active: bool) {
        let mut set = self.active;
        if active {
            set.write().insert(tag.clone());
        } else {
            set.write().remove(tag);
        }
    }

    fn alert(&self, text: &str) {
        let mut notice = self.notice;
        notice.set(Some(text.to_string()));
    }
}

type Toggle = TagToggle<dyn PortalService, SignalTagSurface>;

/// Tags stored on a roster entry
fn stored_tags(entry: &ClientEntry) -> Vec<ClientTag> {
    let Some(id) = ClientId::parse(&entry.id) else {
        return Vec::new();
    };
    split_tags(&entry.tags)
        .into_iter()
        .map(|tag| ClientTag::new(id.clone(), tag))
        .collect()
}

/// One button per palette tag; `None` for entries without a usable id
fn palette_tags(entry: &ClientEntry, palette: &[String]) -> Option<Vec<ClientTag>> {
    let id = ClientId::parse(&entry.id)?;
    Some(
        palette
            .iter()
            .map(|tag| ClientTag::new(id.clone(), tag.clone()))
            .collect(),
    )
}

#[component]
pub fn ClientTable() -> Element {
    let app_state = use_context::<AppState>();
    let mut notice = use_signal(|| None::<String>);

    let active = use_signal(|| {
        app_state
            .settings
            .peek()
            .clients
            .iter()
            .flat_map(stored_tags)
            .collect::<HashSet<_>>()
    });

    let toggle: Toggle = use_hook(|| {
        TagToggle::new(
            app_state.portal.clone(),
            SignalTagSurface { active, notice },
        )
    });

    let on_toggle = {
        let app_state = app_state.clone();
        use_callback(move |tag: ClientTag| {
            let toggle = toggle.clone();
            let mut app_state = app_state.clone();
            spawn(async move {
                if let TagOutcome::Persisted { active } = toggle.toggle(&tag).await {
                    app_state.record_tag(&tag, active);
                }
            });
        })
    };

    let settings = app_state.settings.read().clone();
    let rows: Vec<(ClientEntry, Vec<ClientTag>)> = settings
        .clients
        .iter()
        .filter_map(|entry| Some((entry.clone(), palette_tags(entry, &settings.tag_palette)?)))
        .collect();

    rsx! {
        div {
            class: "flex flex-col h-full min-h-0",

            div {
                class: "flex-none px-6 py-4 border-b border-[var(--border-subtle)]",
                h2 { class: "text-base font-semibold text-[var(--text-primary)]", "Clients" }
            }

            if let Some(text) = notice() {
                div {
                    class: "mx-6 mt-3 px-4 py-2 rounded-lg text-sm flex items-center justify-between",
                    style: "background: rgba(220,80,80,0.12); color: var(--error);",
                    span { "{text}" }
                    button {
                        class: "ml-4 opacity-60 hover:opacity-100",
                        onclick: move |_| notice.set(None),
                        "×"
                    }
                }
            }

            div {
                class: "flex-1 overflow-y-auto p-6 scrollbar-thin",

                if settings.clients.is_empty() {
                    div {
                        class: "text-center text-sm text-[var(--text-tertiary)] opacity-50 py-10",
                        "No clients configured"
                    }
                }

                table {
                    class: "w-full text-sm",
                    for (entry, tags) in rows {
                        tr {
                            key: "{entry.id}",
                            class: "border-b border-[var(--border-subtle)]",
                            td { class: "py-2 pr-4 text-[var(--text-primary)]", "{entry.name}" }
                            td {
                                class: "py-2 flex flex-wrap gap-1.5",
                                for tag in tags {
                                    ClientTagButton {
                                        key: "{tag.client_id}-{tag.tag}",
                                        active: active.read().contains(&tag),
                                        tag: tag,
                                        on_toggle: on_toggle,
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ClientTagButton(tag: ClientTag, active: bool, on_toggle: EventHandler<ClientTag>) -> Element {
    let classes = if active {
        "tag-btn active"
    } else {
        "tag-btn text-[var(--text-tertiary)] hover:text-[var(--text-secondary)]"
    };
    let style = if active {
        "background: var(--accent-primary); color: #F2EDE7;"
    } else {
        "background: var(--bg-elevated);"
    };

    let label = tag.tag.clone();

    rsx! {
        button {
            class: "px-2.5 py-1 rounded-full text-xs transition-all {classes}",
            style: "{style}",
            title: "Toggle {label}",
            onclick: move |_| on_toggle.call(tag.clone()),
            "{label}"
        }
    }
}
