//! Configuration file support
//!
//! - [`file_config`] — raw TOML data types with defaults
//! - [`loader`] — multi-source discovery and merging

pub mod file_config;
pub mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileEndpointConfig, FileLoggingConfig, FileUiConfig,
};
pub use loader::ConfigLoader;
