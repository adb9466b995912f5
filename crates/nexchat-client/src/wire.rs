//! Wire types for the chat completion endpoint.
//!
//! Outbound: a JSON object carrying the full conversation history.
//! Inbound: server-sent-event lines whose `data: ` payload is an
//! OpenAI-style chunk, `{"choices":[{"delta":{"content":"..."}}]}`.

use nexchat_core::{Message, Role};
use serde::{Deserialize, Serialize};

/// Literal prefix of event lines carrying a payload.
pub const DATA_PREFIX: &str = "data: ";

/// Sentinel payload signaling the producer's logical end-of-content.
///
/// Distinct from transport-level stream completion: the decoder skips it
/// without terminating.
pub const DONE_SENTINEL: &str = "[DONE]";

// --- Outbound ---

/// The request body: the full transcript snapshot at send time.
///
/// Serializes to exactly `{"history":[{"role":...,"content":...},...]}`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Every message exchanged so far, in insertion order.
    pub history: Vec<HistoryEntry>,
}

impl ChatRequest {
    /// Builds a request body from a transcript snapshot.
    pub fn from_messages(messages: &[Message]) -> Self {
        Self {
            history: messages.iter().map(HistoryEntry::from).collect(),
        }
    }
}

/// One role-tagged message on the wire.
///
/// Local bookkeeping fields (ids, timestamps) stay off the wire.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    /// Who authored the message.
    pub role: Role,
    /// The message text.
    pub content: String,
}

impl From<&Message> for HistoryEntry {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role.clone(),
            content: message.content.clone(),
        }
    }
}

// --- Inbound ---

/// One decoded stream event payload.
///
/// Every field defaults so structurally valid JSON that lacks the nested
/// delta field decodes to "no fragment" instead of an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatChunk {
    /// Completion choices; only the first is consulted.
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

impl ChatChunk {
    /// The incremental text fragment carried by this chunk, if any.
    ///
    /// Reads `choices[0].delta.content`; absent is `None`.
    pub fn into_delta_content(self) -> Option<String> {
        self.choices.into_iter().next().and_then(|c| c.delta.content)
    }
}

/// One completion choice within a [`ChatChunk`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChunkChoice {
    /// The incremental update for this choice.
    #[serde(default)]
    pub delta: ChunkDelta,
}

/// The incremental update within a [`ChunkChoice`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChunkDelta {
    /// New assistant text, if this event carries any.
    #[serde(default)]
    pub content: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn request_body_shape_is_exact() {
        let sid = Uuid::new_v4();
        let messages = vec![
            Message::user("hi", sid),
            Message::assistant("hello there", sid),
        ];
        let body = serde_json::to_value(ChatRequest::from_messages(&messages)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "history": [
                    {"role": "user", "content": "hi"},
                    {"role": "assistant", "content": "hello there"},
                ]
            })
        );
    }

    #[test]
    fn chunk_with_content_yields_fragment() {
        let chunk: ChatChunk =
            serde_json::from_str(r#"{"choices":[{"delta":{"content":"Hel"}}]}"#).unwrap();
        assert_eq!(chunk.into_delta_content().as_deref(), Some("Hel"));
    }

    #[test]
    fn chunk_with_unknown_fields_still_parses() {
        let chunk: ChatChunk = serde_json::from_str(
            r#"{"id":"x","model":"m","choices":[{"index":0,"delta":{"content":"ok","role":"assistant"},"finish_reason":null}]}"#,
        )
        .unwrap();
        assert_eq!(chunk.into_delta_content().as_deref(), Some("ok"));
    }

    #[test]
    fn chunk_without_delta_content_yields_none() {
        let empty: ChatChunk = serde_json::from_str("{}").unwrap();
        assert!(empty.into_delta_content().is_none());

        let no_choices: ChatChunk = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(no_choices.into_delta_content().is_none());

        let no_content: ChatChunk =
            serde_json::from_str(r#"{"choices":[{"delta":{}}]}"#).unwrap();
        assert!(no_content.into_delta_content().is_none());
    }
}
