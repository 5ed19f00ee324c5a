//! TUI application state
//!
//! Single source of truth for everything the TUI renders. Updated by
//! terminal key events and by [`UiUpdate`]s from the controller task.

use super::event::UiUpdate;
use murmur_domain::MessageRecord;

/// How many lines a page scroll moves.
const PAGE_SCROLL: u16 = 10;

/// Central TUI state — owned by the ChatApp select! loop
pub struct UiState {
    // -- Input field --
    pub input: String,
    /// Byte offset of the cursor within `input`.
    pub cursor: usize,
    pub max_input_len: usize,

    // -- Conversation snapshot --
    pub messages: Vec<MessageRecord>,
    pub show_sender_labels: bool,

    // -- Stream lifecycle --
    /// True while an exchange is in flight; the input is locked.
    pub streaming: bool,

    // -- Scrolling --
    pub scroll: u16,
    /// When true the view stays pinned to the newest message.
    pub follow: bool,

    // -- Loader animation --
    pub spinner_frame: usize,

    // -- Lifecycle --
    pub should_quit: bool,
}

impl UiState {
    pub fn new(show_sender_labels: bool, max_input_len: usize) -> Self {
        Self {
            input: String::new(),
            cursor: 0,
            max_input_len,
            messages: Vec::new(),
            show_sender_labels,
            streaming: false,
            scroll: 0,
            follow: true,
            spinner_frame: 0,
            should_quit: false,
        }
    }

    // -- Controller updates --

    pub fn apply(&mut self, update: UiUpdate) {
        match update {
            UiUpdate::Conversation(messages) => self.messages = messages,
            UiUpdate::ScrollToBottom => self.follow = true,
            UiUpdate::StreamStarted => self.streaming = true,
            UiUpdate::StreamEnded => self.streaming = false,
        }
    }

    // -- Input editing --

    pub fn insert_char(&mut self, c: char) {
        if self.input.chars().count() >= self.max_input_len {
            return;
        }
        self.input.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_char(&mut self) {
        if let Some(c) = self.input[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
            self.input.remove(self.cursor);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(c) = self.input[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(c) = self.input[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// True when a submission would be accepted.
    pub fn can_submit(&self) -> bool {
        !self.streaming && !self.input.trim().is_empty()
    }

    /// Clear the input field, returning its contents.
    pub fn take_input(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.input)
    }

    // -- Scrolling --

    pub fn scroll_up(&mut self, lines: u16) {
        self.follow = false;
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        // Clamped against content height at render time.
        self.scroll = self.scroll.saturating_add(lines);
    }

    pub fn page_up(&mut self) {
        self.scroll_up(PAGE_SCROLL);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(PAGE_SCROLL);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.follow = true;
    }

    // -- Loader animation --

    pub fn tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }
}
