use dioxus::prelude::*;

use crate::app::AppState;
use crate::types::ClientId;

#[component]
pub fn ClientList() -> Element {
    let app_state = use_context::<AppState>();

    let clients = app_state.settings.read().clients.clone();
    let selected_id = app_state.selected_client.read().clone();

    rsx! {
        div {
            class: "flex-1 overflow-y-auto p-2 space-y-1 scrollbar-thin",

            if clients.is_empty() {
                div {
                    class: "flex flex-col items-center justify-center py-10 text-[var(--text-tertiary)] gap-2 opacity-50",
                    span { class: "text-xs font-medium", "No clients" }
                }
            } else {
                div {
                    class: "text-[10px] uppercase tracking-widest text-[var(--text-tertiary)] font-semibold px-3 py-2 select-none opacity-60",
                    "Clients"
                }

                {clients.into_iter().filter_map(|entry| {
                    let client_id = ClientId::parse(&entry.id)?;
                    let is_selected = selected_id.as_ref() == Some(&client_id);

                    let row_class = if is_selected {
                        "flex items-center gap-2.5 px-3 py-2 rounded-lg bg-white/[0.08] border-l-2 border-[var(--accent-primary)] text-[var(--text-primary)] cursor-pointer transition-all"
                    } else {
                        "flex items-center gap-2.5 px-3 py-2 rounded-lg hover:bg-white/[0.05] border-l-2 border-transparent text-[var(--text-secondary)] hover:text-[var(--text-primary)] cursor-pointer transition-all"
                    };

                    let mut app_state = app_state.clone();
                    let key = client_id.to_string();

                    Some(rsx! {
                        div {
                            key: "{key}",
                            class: "px-1",
                            onclick: move |_| app_state.select_client(client_id.clone()),

                            div {
                                class: row_class,
                                div { class: "truncate flex-1 text-sm", "{entry.name}" }
                                if !entry.tags.is_empty() {
                                    span { class: "text-[10px] text-[var(--text-tertiary)] truncate", "{entry.tags}" }
                                }
                            }
                        }
                    })
                })}
            }
        }
    }
}
