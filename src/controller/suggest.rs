//! AI suggestion widget
//!
//! Asks the portal for a suggested answer to a client's question. Every ask
//! starts a new generation; answers that come back after a newer question was
//! asked are dropped instead of overwriting the newer display.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::service::{PortalService, Reply, SuggestRequest};

/// Shown when the portal could not produce an answer
pub const ANSWER_UNAVAILABLE_TEXT: &str = "Unable to get an answer, please try again later";
/// Shown when the request itself failed
pub const ANSWER_ERROR_TEXT: &str = "An error occurred, please try again later";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestElement {
    AskButton,
    QuestionInput,
    AnswerDisplay,
}

pub trait SuggestSurface {
    fn missing_element(&self) -> Option<SuggestElement>;
    fn question_text(&self) -> String;
    fn show_loading(&self);
    fn show_answer(&self, text: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub enum AskOutcome {
    /// Blank question
    Skipped,
    Answered(String),
    /// The portal answered `success: false`
    Unavailable,
    Failed(String),
    /// A newer question was asked while this one was in flight
    Stale,
}

pub struct SuggestionPanel<S: ?Sized, V> {
    service: Arc<S>,
    surface: V,
    generation: Arc<AtomicU64>,
}

impl<S: ?Sized, V: Clone> Clone for SuggestionPanel<S, V> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            surface: self.surface.clone(),
            generation: Arc::clone(&self.generation),
        }
    }
}

impl<S, V> SuggestionPanel<S, V>
where
    S: PortalService + ?Sized,
    V: SuggestSurface,
{
    pub fn initialize(service: Arc<S>, surface: V) -> Option<Self> {
        if let Some(missing) = surface.missing_element() {
            tracing::debug!("Suggestion view lacks {:?}, not attaching", missing);
            return None;
        }
        Some(Self {
            service,
            surface,
            generation: Arc::new(AtomicU64::new(0)),
        })
    }

    pub async fn ask(&self) -> AskOutcome {
        self.ask_with_context(Vec::new()).await
    }

    /// Ask with prior conversation lines attached
    pub async fn ask_with_context(&self, context: Vec<String>) -> AskOutcome {
        let question = self.surface.question_text().trim().to_string();
        if question.is_empty() {
            return AskOutcome::Skipped;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.surface.show_loading();

        let request = SuggestRequest { question, context };
        let result = self.service.ai_suggest(&request).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Dropping stale answer for generation {}", generation);
            return AskOutcome::Stale;
        }

        match result {
            Ok(Reply::Accepted(answer)) => {
                self.surface.show_answer(&answer);
                AskOutcome::Answered(answer)
            }
            Ok(Reply::Rejected(reason)) => {
                tracing::warn!("Portal had no suggestion: {:?}", reason);
                self.surface.show_answer(ANSWER_UNAVAILABLE_TEXT);
                AskOutcome::Unavailable
            }
            Err(e) => {
                tracing::error!("Suggestion request failed: {}", e);
                self.surface.show_answer(ANSWER_ERROR_TEXT);
                AskOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::testing::{AnswerView, FakePortal, MemorySuggest};
    use crate::service::ServiceError;

    fn panel(portal: &Arc<FakePortal>, surface: &MemorySuggest) -> SuggestionPanel<FakePortal, MemorySuggest> {
        SuggestionPanel::initialize(Arc::clone(portal), surface.clone()).expect("complete scope")
    }

    #[test]
    fn test_initialize_without_display_is_noop() {
        let surface = MemorySuggest::default();
        surface.set_missing(Some(SuggestElement::AnswerDisplay));
        assert!(SuggestionPanel::initialize(Arc::new(FakePortal::default()), surface).is_none());
    }

    #[tokio::test]
    async fn test_blank_question_is_ignored() {
        let portal = Arc::new(FakePortal::default());
        let surface = MemorySuggest::default();
        surface.type_question("  ");

        assert_eq!(panel(&portal, &surface).ask().await, AskOutcome::Skipped);
        assert!(portal.asked().is_empty());
        assert_eq!(surface.answer(), AnswerView::Empty);
    }

    #[tokio::test]
    async fn test_loading_then_answer() {
        let portal = Arc::new(FakePortal::default());
        let gate = portal.push_suggestion_gated(Ok(Reply::Accepted("About two hours".into())));
        let surface = MemorySuggest::default();
        surface.type_question(" How long does it take? ");
        let panel = panel(&portal, &surface);

        let observer = {
            let surface = surface.clone();
            async move {
                tokio::task::yield_now().await;
                assert_eq!(surface.answer(), AnswerView::Loading);
                gate.send(()).unwrap();
            }
        };
        let (outcome, _) = tokio::join!(panel.ask(), observer);

        assert_eq!(outcome, AskOutcome::Answered("About two hours".into()));
        assert_eq!(surface.answer(), AnswerView::Text("About two hours".into()));
        assert_eq!(portal.asked()[0].question, "How long does it take?");
    }

    #[tokio::test]
    async fn test_rejection_and_failure_texts() {
        let portal = Arc::new(FakePortal::default());
        portal.push_suggestion(Ok(Reply::Rejected(None)));
        portal.push_suggestion(Err(ServiceError::Status {
            status: 502,
            body: "bad gateway".into(),
        }));
        let surface = MemorySuggest::default();
        surface.type_question("price?");
        let panel = panel(&portal, &surface);

        assert_eq!(panel.ask().await, AskOutcome::Unavailable);
        assert_eq!(surface.answer(), AnswerView::Text(ANSWER_UNAVAILABLE_TEXT.into()));

        assert!(matches!(panel.ask().await, AskOutcome::Failed(_)));
        assert_eq!(surface.answer(), AnswerView::Text(ANSWER_ERROR_TEXT.into()));
    }

    #[tokio::test]
    async fn test_stale_answer_is_dropped() {
        let portal = Arc::new(FakePortal::default());
        let first_gate = portal.push_suggestion_gated(Ok(Reply::Accepted("old answer".into())));
        let second_gate = portal.push_suggestion_gated(Ok(Reply::Accepted("new answer".into())));
        let surface = MemorySuggest::default();
        let panel = panel(&portal, &surface);

        surface.type_question("first");
        let first = panel.ask();
        let second = {
            let surface = surface.clone();
            let panel = panel.clone();
            async move {
                tokio::task::yield_now().await;
                surface.type_question("second");
                panel.ask().await
            }
        };
        let release = async move {
            for _ in 0..3 {
                tokio::task::yield_now().await;
            }
            second_gate.send(()).unwrap();
            tokio::task::yield_now().await;
            first_gate.send(()).unwrap();
        };

        let (first, second, _) = tokio::join!(first, second, release);
        assert_eq!(second, AskOutcome::Answered("new answer".into()));
        assert_eq!(first, AskOutcome::Stale);
        assert_eq!(surface.answer(), AnswerView::Text("new answer".into()));
    }

    #[tokio::test]
    async fn test_context_is_forwarded() {
        let portal = Arc::new(FakePortal::default());
        portal.push_suggestion(Ok(Reply::Accepted("ok".into())));
        let surface = MemorySuggest::default();
        surface.type_question("does it hurt?");

        panel(&portal, &surface)
            .ask_with_context(vec!["client: I'm nervous".into()])
            .await;
        assert_eq!(portal.asked()[0].context, vec!["client: I'm nervous".to_string()]);
    }
}
