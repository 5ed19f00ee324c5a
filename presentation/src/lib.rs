//! Presentation layer for murmur
//!
//! This crate contains the terminal chat UI and the CLI definitions.

pub mod cli;
pub mod tui;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use tui::app::ChatApp;
