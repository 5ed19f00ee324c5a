//! HTTP adapter for the remote answer service.
//!
//! The service is an opaque endpoint: one `POST` with a JSON payload, one
//! chunked byte-stream response with no framing. [`gateway::HttpAnswerGateway`]
//! implements the application layer's `AnswerGateway` port on top of it.

pub mod error;
pub mod gateway;
pub mod protocol;
