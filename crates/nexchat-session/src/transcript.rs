//! The append-only conversation transcript.

use chrono::{DateTime, Utc};
use nexchat_core::Message;
use uuid::Uuid;

/// An ordered, append-only sequence of conversation messages.
///
/// Insertion order is significant: it defines the conversational context
/// sent to the backend on every request. Messages are never reordered,
/// mutated, or removed; the fields stay private so the only write path
/// is [`Transcript::append`].
///
/// The transcript does not enforce strict user/assistant alternation.
#[derive(Debug, Clone)]
pub struct Transcript {
    id: Uuid,
    messages: Vec<Message>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Transcript {
    /// Creates an empty transcript with a fresh session ID.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The session ID new messages should be tagged with.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Appends a message to the end of the transcript.
    ///
    /// O(1); no validation of role sequencing. The appended message is
    /// visible to the next [`Transcript::snapshot`] call immediately.
    pub fn append(&mut self, message: Message) {
        self.updated_at = Utc::now();
        self.messages.push(message);
    }

    /// The full ordered sequence of messages appended so far.
    ///
    /// Used as the outgoing request payload; no reordering, no filtering.
    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages in the transcript.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the transcript contains no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The most recently appended message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// When the transcript was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the transcript was last appended to.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use nexchat_core::Role;

    #[test]
    fn new_transcript_is_empty() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.len(), 0);
        assert!(transcript.snapshot().is_empty());
        assert!(transcript.last().is_none());
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut transcript = Transcript::new();
        let sid = transcript.id();

        transcript.append(Message::user("first", sid));
        transcript.append(Message::assistant("second", sid));
        transcript.append(Message::user("third", sid));

        let snapshot = transcript.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[0].content, "first");
        assert_eq!(snapshot[1].content, "second");
        assert_eq!(snapshot[2].content, "third");
    }

    #[test]
    fn snapshot_reflects_appends_at_call_time() {
        let mut transcript = Transcript::new();
        let sid = transcript.id();

        transcript.append(Message::user("hello", sid));
        assert_eq!(transcript.snapshot().len(), 1);

        transcript.append(Message::assistant("hi", sid));
        assert_eq!(transcript.snapshot().len(), 2);
        assert_eq!(transcript.last().unwrap().role, Role::Assistant);
    }

    #[test]
    fn no_alternation_is_enforced() {
        let mut transcript = Transcript::new();
        let sid = transcript.id();

        transcript.append(Message::user("one", sid));
        transcript.append(Message::user("two", sid));

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.snapshot()[1].role, Role::User);
    }

    #[test]
    fn append_bumps_updated_at() {
        let mut transcript = Transcript::new();
        let created = transcript.created_at();
        let sid = transcript.id();

        transcript.append(Message::user("hello", sid));
        assert!(transcript.updated_at() >= created);
    }
}
