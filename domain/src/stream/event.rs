//! Streaming events for the remote answer service.
//!
//! [`StreamEvent`] bridges infrastructure-level streaming (raw byte chunks
//! from an HTTP response body) to the application layer. The response wire
//! format has no framing: the concatenated chunk bytes, decoded as UTF-8,
//! are the assistant's full answer text.

/// An event in a streamed assistant response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// One transport-determined unit of bytes. Chunk boundaries carry no
    /// meaning and may fall inside a multi-byte character.
    Chunk(Vec<u8>),
    /// The stream reported no more data (signals stream end).
    Completed,
    /// A transport failure occurred during streaming.
    Error(String),
}

impl StreamEvent {
    /// Returns the raw bytes if this is a chunk event.
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            StreamEvent::Chunk(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns true if this event signals the end of the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Completed | StreamEvent::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_exposes_bytes_and_is_not_terminal() {
        let event = StreamEvent::Chunk(b"Hel".to_vec());
        assert_eq!(event.bytes(), Some(b"Hel".as_slice()));
        assert!(!event.is_terminal());
    }

    #[test]
    fn completed_is_terminal() {
        let event = StreamEvent::Completed;
        assert_eq!(event.bytes(), None);
        assert!(event.is_terminal());
    }

    #[test]
    fn error_is_terminal() {
        let event = StreamEvent::Error("connection reset".to_string());
        assert_eq!(event.bytes(), None);
        assert!(event.is_terminal());
    }
}
