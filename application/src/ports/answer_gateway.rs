//! Answer Gateway port
//!
//! Defines the interface for communicating with the remote answer service.

use async_trait::async_trait;
use murmur_domain::StreamEvent;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during answer gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Response had no readable body")]
    MissingBody,

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Gateway to the remote answer service
///
/// This port defines how the application layer talks to the remote service.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait AnswerGateway: Send + Sync {
    /// Send a prompt and open the response stream.
    ///
    /// Returns a [`StreamHandle`] delivering raw byte chunks in arrival
    /// order, terminated by [`StreamEvent::Completed`] or
    /// [`StreamEvent::Error`].
    async fn ask(&self, prompt: &str, session_id: &str) -> Result<StreamHandle, GatewayError>;
}

/// Handle for receiving streaming events from one exchange.
///
/// Wraps an `mpsc::Receiver<StreamEvent>` so adapters can feed chunks from a
/// spawned drain task while the reconciler consumes them sequentially.
pub struct StreamHandle {
    receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Receive the next event; `None` means the adapter dropped the sender,
    /// which the reconciler treats as stream end.
    pub async fn recv(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }

    /// Consume the stream and collect all chunks into a single string.
    ///
    /// Useful when streaming at the transport level but only the final text
    /// is needed (e.g. in tests and one-shot callers).
    pub async fn collect_text(mut self) -> Result<String, GatewayError> {
        let mut decoder = murmur_domain::StreamDecoder::new();
        let mut full_text = String::new();
        while let Some(event) = self.recv().await {
            match event {
                StreamEvent::Chunk(bytes) => full_text.push_str(&decoder.decode(&bytes)),
                StreamEvent::Completed => break,
                StreamEvent::Error(e) => return Err(GatewayError::RequestFailed(e)),
            }
        }
        full_text.push_str(&decoder.finish());
        Ok(full_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle_with(events: Vec<StreamEvent>) -> StreamHandle {
        let (tx, rx) = mpsc::channel(events.len().max(1));
        for event in events {
            tx.try_send(event).unwrap();
        }
        drop(tx);
        StreamHandle::new(rx)
    }

    #[tokio::test]
    async fn collect_text_concatenates_chunks_in_order() {
        let handle = handle_with(vec![
            StreamEvent::Chunk(b"Hel".to_vec()),
            StreamEvent::Chunk(b"lo!".to_vec()),
            StreamEvent::Completed,
        ]);
        assert_eq!(handle.collect_text().await.unwrap(), "Hello!");
    }

    #[tokio::test]
    async fn collect_text_decodes_split_characters() {
        let handle = handle_with(vec![
            StreamEvent::Chunk(vec![0xC3]),
            StreamEvent::Chunk(vec![0xA9]),
            StreamEvent::Completed,
        ]);
        assert_eq!(handle.collect_text().await.unwrap(), "é");
    }

    #[tokio::test]
    async fn collect_text_surfaces_stream_errors() {
        let handle = handle_with(vec![
            StreamEvent::Chunk(b"par".to_vec()),
            StreamEvent::Error("connection reset".to_string()),
        ]);
        assert!(matches!(
            handle.collect_text().await,
            Err(GatewayError::RequestFailed(_))
        ));
    }

    #[tokio::test]
    async fn closed_channel_counts_as_stream_end() {
        let handle = handle_with(vec![StreamEvent::Chunk(b"done".to_vec())]);
        assert_eq!(handle.collect_text().await.unwrap(), "done");
    }
}
