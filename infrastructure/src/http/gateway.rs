//! HTTP implementation of the `AnswerGateway` port.
//!
//! One `POST` per exchange; the response body is drained by a spawned task
//! that forwards raw byte chunks into the `StreamHandle` channel in arrival
//! order. Decoding happens upstream in the reconciler, so a chunk split
//! inside a multi-byte character is harmless here.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use murmur_application::{AnswerGateway, GatewayError, StreamHandle};
use murmur_domain::StreamEvent;
use reqwest::Url;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::error::{HttpError, Result};
use super::protocol::AskRequest;
use crate::config::FileEndpointConfig;

/// Buffered events between the drain task and the reconciler.
const STREAM_CHANNEL_CAPACITY: usize = 32;

/// Gateway to the remote answer service over HTTP.
pub struct HttpAnswerGateway {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpAnswerGateway {
    /// Create a gateway for `endpoint` with explicit timeouts.
    ///
    /// The request timeout bounds the whole exchange including body reads,
    /// so a stalled stream surfaces as an error instead of locking the UI.
    pub fn new(
        endpoint: &str,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| HttpError::InvalidEndpoint {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(HttpError::ClientBuild)?;
        Ok(Self { client, endpoint })
    }

    /// Create a gateway from the `[endpoint]` config section.
    pub fn from_config(config: &FileEndpointConfig) -> Result<Self> {
        Self::new(
            &config.url,
            Duration::from_secs(config.connect_timeout_secs),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn open_stream(&self, request: &AskRequest<'_>) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(HttpError::Status(response.status()));
        }
        Ok(response)
    }
}

#[async_trait]
impl AnswerGateway for HttpAnswerGateway {
    async fn ask(
        &self,
        prompt: &str,
        session_id: &str,
    ) -> std::result::Result<StreamHandle, GatewayError> {
        let request = AskRequest {
            user_input: prompt,
            unique_session_id: session_id,
        };
        debug!(endpoint = %self.endpoint, %session_id, "posting exchange request");

        let response = self
            .open_stream(&request)
            .await
            .map_err(map_gateway_error)?;

        // A declared empty body will never produce a chunk; report it up
        // front rather than opening a stream that ends immediately.
        if response.content_length() == Some(0) {
            return Err(GatewayError::MissingBody);
        }

        let mut stream = response.bytes_stream();
        let (tx, rx) = mpsc::channel(STREAM_CHANNEL_CAPACITY);

        tokio::spawn(async move {
            while let Some(next) = stream.next().await {
                let event = match next {
                    Ok(bytes) => StreamEvent::Chunk(bytes.to_vec()),
                    Err(e) => {
                        warn!(error = %e, "response stream failed mid-body");
                        let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                        return;
                    }
                };
                if tx.send(event).await.is_err() {
                    // Receiver dropped (exchange torn down); stop draining.
                    return;
                }
            }
            let _ = tx.send(StreamEvent::Completed).await;
        });

        Ok(StreamHandle::new(rx))
    }
}

fn map_gateway_error(error: HttpError) -> GatewayError {
    match error {
        HttpError::Request(e) if e.is_connect() => GatewayError::ConnectionFailed(e.to_string()),
        HttpError::InvalidEndpoint { .. } => GatewayError::InvalidEndpoint(error.to_string()),
        other => GatewayError::RequestFailed(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_endpoint_urls() {
        let result = HttpAnswerGateway::new(
            "not a url",
            Duration::from_secs(5),
            Duration::from_secs(60),
        );
        assert!(matches!(result, Err(HttpError::InvalidEndpoint { .. })));
    }

    #[test]
    fn accepts_http_endpoint_from_config_defaults() {
        let gateway = HttpAnswerGateway::from_config(&FileEndpointConfig::default()).unwrap();
        assert_eq!(gateway.endpoint().scheme(), "http");
    }
}
