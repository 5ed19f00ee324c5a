//! Conversation domain entities

use serde::{Deserialize, Serialize};

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    User,
    Assistant,
}

/// A single entry in the conversation (Entity)
///
/// User records are created complete and never mutated. Assistant records
/// are created as loading placeholders and replaced wholesale on each chunk
/// arrival until the stream ends.
///
/// Invariant (maintained by callers of the store): at most one record has
/// `loading == true` at any time, and if present it is the last record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub sender: Sender,
    pub content: String,
    /// True while this record is a placeholder for an in-flight response.
    pub loading: bool,
    /// True when the exchange behind this record ended in an error; rendered
    /// as an error-styled bubble.
    pub failed: bool,
}

impl MessageRecord {
    /// A complete user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            content: content.into(),
            loading: false,
            failed: false,
        }
    }

    /// An assistant placeholder for a response that has not produced text yet.
    pub fn assistant_loading() -> Self {
        Self {
            sender: Sender::Assistant,
            content: String::new(),
            loading: true,
            failed: false,
        }
    }

    /// This record with new content and the loading flag cleared.
    ///
    /// Content is replaced wholesale: the caller passes the full accumulated
    /// buffer, not a delta.
    pub fn with_content(self, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            loading: false,
            ..self
        }
    }

    /// This record marked as failed, with the loading flag cleared.
    pub fn with_failure(self, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            loading: false,
            failed: true,
            ..self
        }
    }

    pub fn is_assistant(&self) -> bool {
        self.sender == Sender::Assistant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_record_is_complete() {
        let record = MessageRecord::user("hi");
        assert_eq!(record.sender, Sender::User);
        assert_eq!(record.content, "hi");
        assert!(!record.loading);
        assert!(!record.failed);
    }

    #[test]
    fn assistant_placeholder_starts_loading_and_empty() {
        let record = MessageRecord::assistant_loading();
        assert_eq!(record.sender, Sender::Assistant);
        assert!(record.content.is_empty());
        assert!(record.loading);
    }

    #[test]
    fn with_content_clears_loading() {
        let record = MessageRecord::assistant_loading().with_content("Hel");
        assert_eq!(record.content, "Hel");
        assert!(!record.loading);
        assert!(!record.failed);
    }

    #[test]
    fn with_failure_marks_record() {
        let record = MessageRecord::assistant_loading().with_failure("connection refused");
        assert!(!record.loading);
        assert!(record.failed);
        assert_eq!(record.content, "connection refused");
    }
}
