//! Fakes shared by the controller tests

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use super::chat::{ChatElement, ChatSurface};
use super::suggest::{SuggestElement, SuggestSurface};
use super::tags::TagSurface;
use crate::service::{
    PortalService, Reply, SendMessageRequest, ServiceError, SuggestRequest, TagUpdateRequest,
};
use crate::types::{ClientId, ClientTag, Message, MessageId};

type Scripted<T> = (Option<oneshot::Receiver<()>>, Result<Reply<T>, ServiceError>);

/// Portal that plays back queued answers, optionally holding each one until
/// its gate is released
#[derive(Default)]
pub struct FakePortal {
    sends: Mutex<VecDeque<Scripted<Message>>>,
    suggestions: Mutex<VecDeque<Scripted<String>>>,
    tags: Mutex<VecDeque<Scripted<()>>>,
    sent: Mutex<Vec<SendMessageRequest>>,
    asked: Mutex<Vec<SuggestRequest>>,
    tag_requests: Mutex<Vec<(ClientId, TagUpdateRequest)>>,
}

fn gated<T>(queue: &Mutex<VecDeque<Scripted<T>>>, result: Result<Reply<T>, ServiceError>) -> oneshot::Sender<()> {
    let (tx, rx) = oneshot::channel();
    queue.lock().unwrap().push_back((Some(rx), result));
    tx
}

async fn play<T>(queue: &Mutex<VecDeque<Scripted<T>>>) -> Result<Reply<T>, ServiceError> {
    let (gate, result) = queue
        .lock()
        .unwrap()
        .pop_front()
        .expect("no scripted answer left");
    if let Some(gate) = gate {
        let _ = gate.await;
    }
    result
}

impl FakePortal {
    pub fn push_send(&self, result: Result<Reply<Message>, ServiceError>) {
        self.sends.lock().unwrap().push_back((None, result));
    }

    pub fn push_send_gated(&self, result: Result<Reply<Message>, ServiceError>) -> oneshot::Sender<()> {
        gated(&self.sends, result)
    }

    pub fn push_suggestion(&self, result: Result<Reply<String>, ServiceError>) {
        self.suggestions.lock().unwrap().push_back((None, result));
    }

    pub fn push_suggestion_gated(
        &self,
        result: Result<Reply<String>, ServiceError>,
    ) -> oneshot::Sender<()> {
        gated(&self.suggestions, result)
    }

    pub fn push_tag(&self, result: Result<Reply<()>, ServiceError>) {
        self.tags.lock().unwrap().push_back((None, result));
    }

    pub fn push_tag_gated(&self, result: Result<Reply<()>, ServiceError>) -> oneshot::Sender<()> {
        gated(&self.tags, result)
    }

    pub fn sent(&self) -> Vec<SendMessageRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn asked(&self) -> Vec<SuggestRequest> {
        self.asked.lock().unwrap().clone()
    }

    pub fn tag_requests(&self) -> Vec<(ClientId, TagUpdateRequest)> {
        self.tag_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PortalService for FakePortal {
    async fn send_message(
        &self,
        request: &SendMessageRequest,
    ) -> Result<Reply<Message>, ServiceError> {
        self.sent.lock().unwrap().push(request.clone());
        play(&self.sends).await
    }

    async fn ai_suggest(&self, request: &SuggestRequest) -> Result<Reply<String>, ServiceError> {
        self.asked.lock().unwrap().push(request.clone());
        play(&self.suggestions).await
    }

    async fn update_client_tag(
        &self,
        client_id: &ClientId,
        request: &TagUpdateRequest,
    ) -> Result<Reply<()>, ServiceError> {
        self.tag_requests
            .lock()
            .unwrap()
            .push((client_id.clone(), request.clone()));
        play(&self.tags).await
    }
}

// ============================================================================
// In-memory surfaces
// ============================================================================

#[derive(Default)]
struct ChatState {
    missing: Option<ChatElement>,
    input: String,
    partner: Option<String>,
    history: Vec<Message>,
    alerts: Vec<String>,
    scrolls: usize,
}

#[derive(Clone, Default)]
pub struct MemoryChat {
    state: Arc<Mutex<ChatState>>,
}

impl MemoryChat {
    pub fn with_partner(partner: &str) -> Self {
        let chat = Self::default();
        chat.state.lock().unwrap().partner = Some(partner.to_string());
        chat
    }

    pub fn set_missing(&self, missing: Option<ChatElement>) {
        self.state.lock().unwrap().missing = missing;
    }

    pub fn type_text(&self, text: &str) {
        self.state.lock().unwrap().input = text.to_string();
    }

    pub fn input(&self) -> String {
        self.state.lock().unwrap().input.clone()
    }

    pub fn history(&self) -> Vec<Message> {
        self.state.lock().unwrap().history.clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.state.lock().unwrap().alerts.clone()
    }

    pub fn scrolls(&self) -> usize {
        self.state.lock().unwrap().scrolls
    }
}

impl ChatSurface for MemoryChat {
    fn missing_element(&self) -> Option<ChatElement> {
        self.state.lock().unwrap().missing
    }

    fn input_text(&self) -> String {
        self.input()
    }

    fn clear_input(&self) {
        self.state.lock().unwrap().input.clear();
    }

    fn partner_id(&self) -> Option<String> {
        self.state.lock().unwrap().partner.clone()
    }

    fn append_message(&self, message: &Message) {
        self.state.lock().unwrap().history.push(message.clone());
    }

    fn remove_message(&self, id: &MessageId) -> bool {
        let mut state = self.state.lock().unwrap();
        let before = state.history.len();
        state.history.retain(|m| &m.id != id);
        state.history.len() != before
    }

    fn clear_history(&self) {
        self.state.lock().unwrap().history.clear();
    }

    fn scroll_to_bottom(&self) {
        self.state.lock().unwrap().scrolls += 1;
    }

    fn alert(&self, text: &str) {
        self.state.lock().unwrap().alerts.push(text.to_string());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnswerView {
    Empty,
    Loading,
    Text(String),
}

struct SuggestState {
    missing: Option<SuggestElement>,
    question: String,
    answer: AnswerView,
}

#[derive(Clone)]
pub struct MemorySuggest {
    state: Arc<Mutex<SuggestState>>,
}

impl Default for MemorySuggest {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(SuggestState {
                missing: None,
                question: String::new(),
                answer: AnswerView::Empty,
            })),
        }
    }
}

impl MemorySuggest {
    pub fn set_missing(&self, missing: Option<SuggestElement>) {
        self.state.lock().unwrap().missing = missing;
    }

    pub fn type_question(&self, text: &str) {
        self.state.lock().unwrap().question = text.to_string();
    }

    pub fn answer(&self) -> AnswerView {
        self.state.lock().unwrap().answer.clone()
    }
}

impl SuggestSurface for MemorySuggest {
    fn missing_element(&self) -> Option<SuggestElement> {
        self.state.lock().unwrap().missing
    }

    fn question_text(&self) -> String {
        self.state.lock().unwrap().question.clone()
    }

    fn show_loading(&self) {
        self.state.lock().unwrap().answer = AnswerView::Loading;
    }

    fn show_answer(&self, text: &str) {
        self.state.lock().unwrap().answer = AnswerView::Text(text.to_string());
    }
}

#[derive(Default)]
struct TagState {
    active: HashSet<ClientTag>,
    alerts: Vec<String>,
}

#[derive(Clone, Default)]
pub struct MemoryTags {
    state: Arc<Mutex<TagState>>,
}

impl MemoryTags {
    pub fn alerts(&self) -> Vec<String> {
        self.state.lock().unwrap().alerts.clone()
    }
}

impl TagSurface for MemoryTags {
    fn is_active(&self, tag: &ClientTag) -> bool {
        self.state.lock().unwrap().active.contains(tag)
    }

    fn set_active(&self, tag: &ClientTag, active: bool) {
        let mut state = self.state.lock().unwrap();
        if active {
            state.active.insert(tag.clone());
        } else {
            state.active.remove(tag);
        }
    }

    fn alert(&self, text: &str) {
        self.state.lock().unwrap().alerts.push(text.to_string());
    }
}
