//! Response stream domain.
//!
//! - [`event::StreamEvent`] — one event in a streamed response
//! - [`decoder::StreamDecoder`] — stateful chunk-to-text decoding

pub mod decoder;
pub mod event;
