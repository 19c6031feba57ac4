//! View controllers
//!
//! Each controller is built from a service handle and a view surface, and is
//! cheap to clone into the tasks that await portal answers.

pub mod chat;
pub mod suggest;
pub mod tags;

#[cfg(test)]
pub(crate) mod testing;

pub use chat::{is_submit_key, ChatElement, ChatSession, ChatSurface, SubmitOutcome};
pub use suggest::{AskOutcome, SuggestElement, SuggestSurface, SuggestionPanel};
pub use tags::{TagOutcome, TagSurface, TagToggle};
