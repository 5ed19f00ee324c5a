//! TUI channel types
//!
//! Commands sent TO the controller task and updates coming FROM it.

use murmur_domain::MessageRecord;

/// Commands sent from the TUI event loop to the controller task (Actor inbox)
#[derive(Debug)]
pub enum UiCommand {
    /// User submitted the input field contents
    Submit(String),
}

/// Updates emitted for rendering
#[derive(Debug, Clone)]
pub enum UiUpdate {
    /// Fresh snapshot of the whole conversation (display-refresh)
    Conversation(Vec<MessageRecord>),
    /// Re-attach the view to the bottom of the conversation
    ScrollToBottom,
    /// An exchange started; lock the input
    StreamStarted,
    /// The exchange settled; unlock the input
    StreamEnded,
}
