//! Core types and error definitions for the nexchat client.
//!
//! This crate provides the foundational types shared across all nexchat
//! crates: the unified error surface and the message representation that
//! the transcript, the wire layer, and the UI all agree on.
//!
//! # Main types
//!
//! - [`NexchatError`] — Unified error enum for all nexchat subsystems.
//! - [`NexchatResult`] — Convenience alias for `Result<T, NexchatError>`.
//! - [`Role`] — Message role (user, assistant, system).
//! - [`Message`] — A single message within a conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Error types ---

/// Top-level error type for the nexchat client.
///
/// Failures from the network layer are deliberately collapsed into the
/// single [`NexchatError::Transport`] variant: the client treats a refused
/// connection, a non-success status, and a broken response body uniformly.
#[derive(Debug, thiserror::Error)]
pub enum NexchatError {
    /// A failure communicating with the chat endpoint (network error,
    /// non-success status, missing or broken response body).
    #[error("Transport error: {0}")]
    Transport(String),

    /// An error in configuration parsing or validation.
    #[error("Config error: {0}")]
    Config(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`NexchatError`].
pub type NexchatResult<T> = Result<T, NexchatError>;

// --- Message types ---

/// The role of the participant that authored a [`Message`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A human end-user.
    User,
    /// The AI assistant.
    Assistant,
    /// A system-level instruction or prompt.
    System,
}

/// A single message exchanged within a conversation.
///
/// The wire protocol only carries `role` and `content`; the remaining
/// fields exist for local bookkeeping and diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier for this message.
    pub id: Uuid,
    /// The role of the message author.
    pub role: Role,
    /// The textual content of the message. Immutable once finalized.
    pub content: String,
    /// The transcript this message belongs to.
    pub session_id: Uuid,
    /// UTC timestamp of when the message was created.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Creates a new message with the given role, content, and session ID.
    pub fn new(role: Role, content: impl Into<String>, session_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            session_id,
            timestamp: Utc::now(),
        }
    }

    /// Creates a new message with [`Role::User`].
    pub fn user(content: impl Into<String>, session_id: Uuid) -> Self {
        Self::new(Role::User, content, session_id)
    }

    /// Creates a new message with [`Role::Assistant`].
    pub fn assistant(content: impl Into<String>, session_id: Uuid) -> Self {
        Self::new(Role::Assistant, content, session_id)
    }

    /// Creates a new message with [`Role::System`].
    pub fn system(content: impl Into<String>, session_id: Uuid) -> Self {
        Self::new(Role::System, content, session_id)
    }
}
