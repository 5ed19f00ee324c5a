//! Stateful chunk-to-text decoding.
//!
//! Chunk boundaries are transport-determined and may split a multi-byte
//! UTF-8 sequence across two reads. [`StreamDecoder`] wraps an
//! [`encoding_rs`] streaming decoder so partial-sequence state is retained
//! between calls: the split character decodes correctly once its remaining
//! bytes arrive, instead of producing replacement characters.

use encoding_rs::{CoderResult, Decoder, UTF_8};

/// Incremental UTF-8 decoder for one response stream.
///
/// One decoder per stream session; it must not be reused across sessions
/// because it carries partial-sequence state.
pub struct StreamDecoder {
    inner: Decoder,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self {
            inner: UTF_8.new_decoder_without_bom_handling(),
        }
    }

    /// Decode one chunk, returning the text it contributed.
    ///
    /// Genuinely malformed byte sequences become U+FFFD; a trailing
    /// incomplete sequence is held back until the next call.
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        let capacity = self
            .inner
            .max_utf8_buffer_length(bytes.len())
            .unwrap_or(bytes.len() * 3 + 4);
        let mut out = String::with_capacity(capacity);
        let (result, read, _had_errors) = self.inner.decode_to_string(bytes, &mut out, false);
        // With capacity from max_utf8_buffer_length the input is always consumed.
        debug_assert!(matches!(result, CoderResult::InputEmpty));
        debug_assert_eq!(read, bytes.len());
        out
    }

    /// Flush the decoder at stream end.
    ///
    /// Returns U+FFFD text for a dangling partial sequence, or an empty
    /// string when the stream ended on a character boundary.
    pub fn finish(mut self) -> String {
        let capacity = self.inner.max_utf8_buffer_length(0).unwrap_or(4);
        let mut out = String::with_capacity(capacity);
        let (result, _, _) = self.inner.decode_to_string(&[], &mut out, true);
        debug_assert!(matches!(result, CoderResult::InputEmpty));
        out
    }
}

impl Default for StreamDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StreamDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamDecoder").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_decodes_directly() {
        let mut decoder = StreamDecoder::new();
        assert_eq!(decoder.decode(b"Hel"), "Hel");
        assert_eq!(decoder.decode(b"lo!"), "lo!");
        assert_eq!(decoder.finish(), "");
    }

    #[test]
    fn multi_byte_character_split_across_chunks() {
        // "é" is 0xC3 0xA9; split it between two reads.
        let mut decoder = StreamDecoder::new();
        assert_eq!(decoder.decode(&[0xC3]), "");
        assert_eq!(decoder.decode(&[0xA9]), "é");
    }

    #[test]
    fn four_byte_character_split_three_ways() {
        // "🦀" is F0 9F A6 80.
        let bytes = "🦀".as_bytes();
        let mut decoder = StreamDecoder::new();
        let mut text = String::new();
        text.push_str(&decoder.decode(&bytes[..1]));
        text.push_str(&decoder.decode(&bytes[1..3]));
        text.push_str(&decoder.decode(&bytes[3..]));
        assert_eq!(text, "🦀");
    }

    #[test]
    fn split_never_yields_replacement_characters() {
        let bytes = "日本語".as_bytes();
        // Deliver one byte at a time; concatenation must be lossless.
        for split_free_run in 1..=2 {
            let mut decoder = StreamDecoder::new();
            let mut text = String::new();
            for chunk in bytes.chunks(split_free_run) {
                text.push_str(&decoder.decode(chunk));
            }
            text.push_str(&decoder.finish());
            assert_eq!(text, "日本語");
        }
    }

    #[test]
    fn invalid_bytes_become_replacement_characters() {
        let mut decoder = StreamDecoder::new();
        let text = decoder.decode(&[0xFF, b'a']);
        assert_eq!(text, "\u{FFFD}a");
    }

    #[test]
    fn finish_flushes_dangling_partial_sequence() {
        let mut decoder = StreamDecoder::new();
        assert_eq!(decoder.decode(&[0xC3]), "");
        assert_eq!(decoder.finish(), "\u{FFFD}");
    }
}
