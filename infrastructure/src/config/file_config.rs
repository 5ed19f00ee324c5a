//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; every section and field has a default so
//! a missing config file still yields a usable development setup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("endpoint.url cannot be empty")]
    EmptyEndpointUrl,

    #[error("endpoint.connect_timeout_secs cannot be 0")]
    InvalidConnectTimeout,

    #[error("endpoint.request_timeout_secs cannot be 0")]
    InvalidRequestTimeout,
}

/// Raw answer-service endpoint configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEndpointConfig {
    /// URL of the remote answer service
    pub url: String,
    /// TCP connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds, body reads included
    pub request_timeout_secs: u64,
}

impl Default for FileEndpointConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8000/chat".to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 300,
        }
    }
}

/// Raw UI configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUiConfig {
    /// Show "You"/"Assistant" labels above bubbles
    pub show_sender_labels: bool,
    /// Maximum accepted input length in characters
    pub max_input_len: usize,
}

impl Default for FileUiConfig {
    fn default() -> Self {
        Self {
            show_sender_labels: true,
            max_input_len: 4000,
        }
    }
}

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for the log file; defaults to the platform state dir
    pub directory: Option<String>,
}

/// Top-level configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub endpoint: FileEndpointConfig,
    pub ui: FileUiConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate values figment cannot check structurally.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.endpoint.url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyEndpointUrl);
        }
        if self.endpoint.connect_timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidConnectTimeout);
        }
        if self.endpoint.request_timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidRequestTimeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_url_is_rejected() {
        let mut config = FileConfig::default();
        config.endpoint.url = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptyEndpointUrl)
        ));
    }

    #[test]
    fn zero_timeouts_are_rejected() {
        let mut config = FileConfig::default();
        config.endpoint.connect_timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidConnectTimeout)
        ));

        let mut config = FileConfig::default();
        config.endpoint.request_timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidRequestTimeout)
        ));
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [endpoint]
            url = "https://example.com/chat"
            "#,
        )
        .unwrap();
        assert_eq!(config.endpoint.url, "https://example.com/chat");
        assert_eq!(config.endpoint.connect_timeout_secs, 10);
        assert!(config.ui.show_sender_labels);
    }
}
