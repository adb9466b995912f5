//! Session-scoped conversation state for nexchat.
//!
//! The only type here is [`Transcript`]: an in-memory, append-only record
//! of the conversation, sent in full on every outgoing request. There is
//! no persistence; a transcript lives exactly as long as its session.

pub mod transcript;

pub use transcript::Transcript;
