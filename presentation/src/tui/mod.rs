//! Terminal chat UI.
//!
//! - [`app::ChatApp`] — the main loop wiring terminal events to the controller
//! - [`state::UiState`] — everything the view renders
//! - [`event`] — command/update channel types between UI and controller
//! - [`view`] — ratatui rendering

pub mod app;
pub mod event;
pub mod state;
pub mod view;
