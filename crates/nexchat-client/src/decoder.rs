//! Incremental decoding of the chunked completion stream.
//!
//! The transport hands us arbitrary byte chunks: a chunk boundary can fall
//! in the middle of a multi-byte character, in the middle of a line, even
//! in the middle of the `data: ` prefix. [`StreamDecoder`] reassembles the
//! chunks into complete event lines and extracts the text fragments,
//! skipping anything it cannot make sense of.

use crate::wire::{ChatChunk, DATA_PREFIX, DONE_SENTINEL};

/// Diagnostic hook for lines the decoder throws away.
///
/// Skip-and-continue is the decode policy: one malformed line never aborts
/// the stream, and the user never sees it. The observer keeps those skips
/// auditable.
pub trait DecodeObserver {
    /// Called when an event payload fails JSON decoding.
    fn malformed_line(&mut self, payload: &str, error: &serde_json::Error);
}

/// Default observer: logs skipped lines at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DecodeObserver for TracingObserver {
    fn malformed_line(&mut self, payload: &str, error: &serde_json::Error) {
        tracing::debug!(%error, payload, "skipping malformed stream line");
    }
}

/// Stateful decoder for one in-flight response stream.
///
/// Feed raw transport chunks through [`StreamDecoder::push`]; it yields the
/// text fragments extracted from each complete `data: ` line. The trailing
/// partial line is carried across chunks and never processed early. The
/// accumulated reply is exactly the concatenation, in arrival order, of
/// every non-empty fragment seen so far.
///
/// The decoder is pure and synchronous; the transport loop lives in
/// [`crate::turn::TurnRunner`].
pub struct StreamDecoder<O = TracingObserver> {
    /// Undecoded tail bytes of a UTF-8 scalar split across chunks.
    pending: Vec<u8>,
    /// Trailing partial line carried to the next chunk.
    line_buffer: String,
    /// The reply assembled so far.
    accumulated: String,
    observer: O,
}

impl StreamDecoder<TracingObserver> {
    /// Creates a decoder that reports skipped lines via `tracing`.
    pub fn new() -> Self {
        Self::with_observer(TracingObserver)
    }
}

impl Default for StreamDecoder<TracingObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: DecodeObserver> StreamDecoder<O> {
    /// Creates a decoder with a custom [`DecodeObserver`].
    pub fn with_observer(observer: O) -> Self {
        Self {
            pending: Vec::new(),
            line_buffer: String::new(),
            accumulated: String::new(),
            observer,
        }
    }

    /// Feeds one transport chunk and returns the fragments it completed.
    ///
    /// Fragments are returned in arrival order and have already been
    /// appended to [`StreamDecoder::accumulated`].
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.decode_utf8(chunk);

        let mut fragments = Vec::new();
        while let Some(line_end) = self.line_buffer.find('\n') {
            let line = self.line_buffer[..line_end].to_string();
            self.line_buffer.drain(..=line_end);
            if let Some(fragment) = self.process_line(&line) {
                fragments.push(fragment);
            }
        }
        fragments
    }

    /// The reply text assembled so far.
    pub fn accumulated(&self) -> &str {
        &self.accumulated
    }

    /// Ends the stream and returns the assembled reply.
    ///
    /// Whatever remains in the trailing line buffer is discarded
    /// unexamined: an incomplete trailing fragment is assumed not to be a
    /// complete event.
    pub fn finish(self) -> String {
        if !self.line_buffer.is_empty() {
            tracing::debug!(
                len = self.line_buffer.len(),
                "discarding incomplete trailing line at stream end"
            );
        }
        self.accumulated
    }

    /// Streaming UTF-8 decode: appends the decodable prefix of `pending +
    /// chunk` to the line buffer, keeping an incomplete trailing scalar for
    /// the next chunk. Truly invalid sequences become U+FFFD.
    fn decode_utf8(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);
        let mut offset = 0;
        loop {
            match std::str::from_utf8(&self.pending[offset..]) {
                Ok(text) => {
                    self.line_buffer.push_str(text);
                    offset = self.pending.len();
                    break;
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    if let Ok(text) = std::str::from_utf8(&self.pending[offset..offset + valid]) {
                        self.line_buffer.push_str(text);
                    }
                    offset += valid;
                    match err.error_len() {
                        Some(invalid) => {
                            self.line_buffer.push('\u{FFFD}');
                            offset += invalid;
                        }
                        // Incomplete scalar at the end of the chunk; the
                        // rest arrives with the next one.
                        None => break,
                    }
                }
            }
        }
        self.pending.drain(..offset);
    }

    /// Handles one complete line; returns the extracted fragment, if any.
    fn process_line(&mut self, line: &str) -> Option<String> {
        let payload = line.strip_prefix(DATA_PREFIX)?;
        if payload.trim() == DONE_SENTINEL {
            return None;
        }
        match serde_json::from_str::<ChatChunk>(payload) {
            Ok(chunk) => {
                let fragment = chunk.into_delta_content()?;
                if fragment.is_empty() {
                    return None;
                }
                self.accumulated.push_str(&fragment);
                Some(fragment)
            }
            Err(err) => {
                self.observer.malformed_line(payload, &err);
                None
            }
        }
    }
}
