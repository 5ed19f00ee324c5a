//! Infrastructure layer for murmur
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer, plus configuration file loading.

pub mod config;
pub mod http;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileEndpointConfig, FileLoggingConfig,
    FileUiConfig,
};
pub use http::{
    error::{HttpError, Result},
    gateway::HttpAnswerGateway,
};
