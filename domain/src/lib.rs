//! Domain layer for murmur
//!
//! This crate contains the core conversation state and stream decoding logic.
//! It has no dependencies on infrastructure or presentation concerns and
//! performs no I/O.
//!
//! # Core Concepts
//!
//! ## Conversation
//!
//! An append-only, ordered sequence of [`MessageRecord`]s held by a
//! [`ConversationStore`]. A record is either a complete user message or an
//! assistant message that starts as a loading placeholder and is filled in
//! as the response streams.
//!
//! ## Stream
//!
//! [`StreamEvent`] carries transport-level byte chunks up to the application
//! layer; [`StreamDecoder`] turns those chunks into text incrementally, so a
//! multi-byte character split across two chunks still decodes correctly.

pub mod conversation;
pub mod stream;

// Re-export commonly used types
pub use conversation::entities::{MessageRecord, Sender};
pub use conversation::store::{ConversationStore, ReplaceOutcome, StoreChange};
pub use stream::decoder::StreamDecoder;
pub use stream::event::StreamEvent;
