//! Conversation domain.
//!
//! - [`entities::MessageRecord`] — a single entry in the conversation
//! - [`store::ConversationStore`] — the ordered, observable record sequence

pub mod entities;
pub mod store;
