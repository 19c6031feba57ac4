//! AI suggestion panel

use dioxus::prelude::*;

use crate::app::AppState;
use crate::controller::{SuggestElement, SuggestSurface, SuggestionPanel};
use crate::service::PortalService;

/// Number of recent chat lines sent along with a question
const CONTEXT_LINES: usize = 6;

#[derive(Clone, PartialEq, Debug)]
pub enum AnswerState {
    Empty,
    Loading,
    Text(String),
}

#[derive(Clone, Copy)]
pub struct SignalSuggestSurface {
    question: Signal<String>,
    answer: Signal<AnswerState>,
}

impl SuggestSurface for SignalSuggestSurface {
    fn missing_element(&self) -> Option<SuggestElement> {
        None
    }

    fn question_text(&self) -> String {
        self.question.peek().to_string()
    }

    fn show_loading(&self) {
        let mut answer = self.answer;
        answer.set(AnswerState::Loading);
    }

    fn show_answer(&self, text: &str) {
        let mut answer = self.answer;
        answer.set(AnswerState::Text(text.to_string()));
    }
}

type Panel = SuggestionPanel<dyn PortalService, SignalSuggestSurface>;

#[component]
pub fn SuggestPanel() -> Element {
    let app_state = use_context::<AppState>();
    let mut question = use_signal(String::new);
    let answer = use_signal(|| AnswerState::Empty);

    let panel: Option<Panel> = use_hook(|| {
        SuggestionPanel::initialize(
            app_state.portal.clone(),
            SignalSuggestSurface { question, answer },
        )
    });

    let ask = {
        let transcripts = app_state.transcripts;
        let selected = app_state.selected_client;
        move |_: MouseEvent| {
            let Some(panel) = panel.clone() else {
                return;
            };
            let context = match &*selected.peek() {
                Some(client) => transcripts.peek().recent_lines(client, CONTEXT_LINES),
                None => Vec::new(),
            };
            spawn(async move {
                panel.ask_with_context(context).await;
            });
        }
    };

    rsx! {
        div {
            class: "flex flex-col gap-3 p-4 border-t border-[var(--border-subtle)]",

            span {
                class: "text-[10px] uppercase tracking-widest text-[var(--text-tertiary)] font-semibold",
                "AI suggestion"
            }

            div {
                class: "flex gap-2",
                input {
                    id: "question-input",
                    class: "flex-1 px-3 py-2 rounded-lg bg-[var(--bg-elevated)] text-sm outline-none",
                    placeholder: "What did the client ask?",
                    value: "{question}",
                    oninput: move |evt| question.set(evt.value()),
                }
                button {
                    id: "ai-suggest-button",
                    class: "px-3 py-2 rounded-lg text-sm",
                    style: "background: var(--accent-primary); color: #F2EDE7;",
                    onclick: ask,
                    "Suggest"
                }
            }

            div {
                id: "ai-answer",
                class: "text-sm text-[var(--text-secondary)] whitespace-pre-wrap min-h-[2rem]",
                {match answer() {
                    AnswerState::Empty => rsx! {},
                    AnswerState::Loading => rsx! { div { class: "spinner" } },
                    AnswerState::Text(text) => rsx! { "{text}" },
                }}
            }
        }
    }
}
