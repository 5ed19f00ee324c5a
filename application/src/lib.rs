//! Application layer for murmur
//!
//! This crate contains the stream reconciler use case and the port the
//! infrastructure layer implements to reach the remote answer service.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::answer_gateway::{AnswerGateway, GatewayError, StreamHandle};
pub use use_cases::exchange::{ChatController, ExchangeState, SubmitError};
