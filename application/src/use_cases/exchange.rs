//! The stream reconciler — one user/assistant exchange from submit to idle.
//!
//! [`ChatController`] owns the [`ConversationStore`] and drives the exchange
//! state machine:
//!
//! ```text
//! Idle ──submit──> Sending ──response body──> Streaming ──stream end──> Idle
//!                     │                           │
//!                     └── request failure ────────┴── stream error ───> Idle
//! ```
//!
//! Each received chunk is decoded statefully, appended to the accumulation
//! buffer, and folded into the store with the *full* buffer as the new
//! content — the placeholder is replaced wholesale, never appended to, so a
//! re-render between any two chunks always shows a consistent prefix of the
//! answer. The loading flag clears on the first chunk, not at stream end.
//!
//! Failures never propagate out of the exchange: the pending assistant
//! record becomes an error-styled bubble and the controller returns to Idle
//! so the user can retry.

use std::sync::Arc;

use murmur_domain::{
    ConversationStore, MessageRecord, ReplaceOutcome, StreamDecoder, StreamEvent,
};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::ports::answer_gateway::{AnswerGateway, StreamHandle};

/// Exchange lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExchangeState {
    #[default]
    Idle,
    /// Records appended, outbound request in flight.
    Sending,
    /// Response body open, chunks being folded into the store.
    Streaming,
}

/// Rejected submissions. The store is never mutated when these occur.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Input is empty or whitespace-only")]
    EmptyInput,

    #[error("An exchange is already in progress")]
    ExchangeInProgress,
}

/// Ephemeral per-exchange state; dropped when the exchange settles.
struct StreamSession {
    buffer: String,
    decoder: StreamDecoder,
    got_chunk: bool,
}

impl StreamSession {
    fn new() -> Self {
        Self {
            buffer: String::new(),
            decoder: StreamDecoder::new(),
            got_chunk: false,
        }
    }
}

/// Controller owning the conversation state and the reconcile loop.
pub struct ChatController<G: AnswerGateway> {
    store: ConversationStore,
    gateway: Arc<G>,
    session_id: String,
    state: ExchangeState,
}

impl<G: AnswerGateway> ChatController<G> {
    /// Create a controller with a generated per-conversation session id.
    pub fn new(gateway: Arc<G>) -> Self {
        Self::with_session_id(gateway, Uuid::new_v4().to_string())
    }

    /// Create a controller with a caller-supplied session id.
    pub fn with_session_id(gateway: Arc<G>, session_id: impl Into<String>) -> Self {
        Self {
            store: ConversationStore::new(),
            gateway,
            session_id: session_id.into(),
            state: ExchangeState::Idle,
        }
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// Mutable store access, used by the presentation layer to subscribe.
    pub fn store_mut(&mut self) -> &mut ConversationStore {
        &mut self.store
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn state(&self) -> ExchangeState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == ExchangeState::Idle
    }

    /// Run one full exchange: validate, append records, stream the response
    /// into the store, settle back to Idle.
    ///
    /// Only submission rejection is an error; everything downstream of a
    /// valid submission (request failure, missing body, stream error,
    /// cancellation) settles into the conversation itself.
    pub async fn send(&mut self, input: &str, cancel: &CancellationToken) -> Result<(), SubmitError> {
        self.begin(input)?;
        self.run_exchange(input, cancel).await;
        self.state = ExchangeState::Idle;
        Ok(())
    }

    /// `Idle -> Sending`: append the user record and the loading placeholder.
    fn begin(&mut self, input: &str) -> Result<(), SubmitError> {
        if input.trim().is_empty() {
            return Err(SubmitError::EmptyInput);
        }
        if self.state != ExchangeState::Idle {
            return Err(SubmitError::ExchangeInProgress);
        }
        debug!(session_id = %self.session_id, "starting exchange");
        self.state = ExchangeState::Sending;
        self.store.append(MessageRecord::user(input));
        self.store.append(MessageRecord::assistant_loading());
        Ok(())
    }

    async fn run_exchange(&mut self, prompt: &str, cancel: &CancellationToken) {
        let gateway = Arc::clone(&self.gateway);
        let session_id = self.session_id.clone();

        let handle = tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                self.settle_cancelled(String::new());
                return;
            }

            result = gateway.ask(prompt, &session_id) => match result {
                Ok(handle) => handle,
                Err(e) => {
                    self.fail_pending(String::new(), &e.to_string());
                    return;
                }
            },
        };

        self.state = ExchangeState::Streaming;
        self.drain(handle, cancel).await;
    }

    /// `Streaming` steady state: one reader, chunks applied strictly in
    /// arrival order, each store update visible before the next read.
    async fn drain(&mut self, mut handle: StreamHandle, cancel: &CancellationToken) {
        let mut session = StreamSession::new();

        loop {
            let event = tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    let partial = std::mem::take(&mut session.buffer);
                    self.settle_cancelled(partial);
                    return;
                }

                event = handle.recv() => event,
            };

            match event {
                Some(StreamEvent::Chunk(bytes)) => {
                    let text = session.decoder.decode(&bytes);
                    session.buffer.push_str(&text);
                    session.got_chunk = true;
                    self.apply_content(session.buffer.clone());
                }
                Some(StreamEvent::Error(message)) => {
                    let partial = std::mem::take(&mut session.buffer);
                    self.fail_pending(partial, &message);
                    return;
                }
                // A closed channel without a terminal event counts as end.
                Some(StreamEvent::Completed) | None => break,
            }
        }

        let StreamSession {
            mut buffer,
            decoder,
            got_chunk,
        } = session;

        if !got_chunk {
            // The source silently ignored a bodyless response and left the
            // input locked; here it settles as a recoverable error.
            self.fail_pending(String::new(), "response had no readable body");
            return;
        }

        let tail = decoder.finish();
        if !tail.is_empty() {
            buffer.push_str(&tail);
            self.apply_content(buffer);
        }
        debug!(session_id = %self.session_id, "stream finished");
    }

    /// Fold the full accumulated buffer into the pending assistant record,
    /// clearing its loading flag.
    fn apply_content(&mut self, content: String) {
        let outcome = self
            .store
            .replace_last(|r| r.is_assistant(), |r| r.with_content(content));
        if outcome == ReplaceOutcome::NoMatch {
            warn!("expected a pending assistant record for the streamed response but found none");
        }
    }

    /// Turn the pending assistant record into an error-styled bubble,
    /// keeping any partial text already received.
    fn fail_pending(&mut self, partial: String, message: &str) {
        warn!(session_id = %self.session_id, %message, "exchange failed");
        let content = if partial.is_empty() {
            message.to_string()
        } else {
            format!("{partial}\n\n{message}")
        };
        let outcome = self
            .store
            .replace_last(|r| r.is_assistant(), |r| r.with_failure(content));
        if outcome == ReplaceOutcome::NoMatch {
            warn!("expected a pending assistant record to mark as failed but found none");
        }
    }

    /// Cancellation keeps whatever arrived and clears the loading flag.
    fn settle_cancelled(&mut self, partial: String) {
        debug!(session_id = %self.session_id, "exchange cancelled");
        let outcome = self
            .store
            .replace_last(|r| r.is_assistant(), |r| r.with_content(partial));
        if outcome == ReplaceOutcome::NoMatch {
            warn!("expected a pending assistant record after cancellation but found none");
        }
    }
}
