//! Per-agent conversation logs.
//!
//! Every agent owns one ordered, append-only message log for the life of a
//! game. The log is what gets shipped verbatim to the responder on each
//! turn, so ordering is never changed and nothing is ever removed. Memory
//! grows with the game, bounded by rounds x agents.

use serde::{Deserialize, Serialize};

/// The role of a message in an agent's conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A single role-tagged message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// An ordered, append-only message log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, preserving insertion order.
    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Insert a message at the front of the log.
    ///
    /// Used once at setup to place the GM's final system prompt ahead of
    /// any word-generation exchange already in its log.
    pub fn prepend(&mut self, message: ChatMessage) {
        self.messages.insert(0, message);
    }

    /// The full ordered history, for transmission to the responder.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
