//! Agent identities and roles.

use crate::conversation::Conversation;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub Uuid);

impl AgentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AgentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role an agent plays in one game.
///
/// The GM is a pure moderator: it supplies the word pair at setup but never
/// joins the active roster, never votes, and cannot be eliminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameRole {
    Gm,
    Civilian,
    Spy,
}

impl GameRole {
    pub fn is_player(&self) -> bool {
        !matches!(self, GameRole::Gm)
    }
}

/// A language-model agent in the game.
///
/// Created at setup, one per seat. Owns its conversation log; the log is
/// appended to on every turn and never truncated within a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub role: GameRole,
    pub conversation: Conversation,
}

impl Agent {
    pub fn new(name: impl Into<String>, role: GameRole) -> Self {
        Self {
            id: AgentId::new(),
            name: name.into(),
            role,
            conversation: Conversation::new(),
        }
    }

    pub fn is_spy(&self) -> bool {
        self.role == GameRole::Spy
    }
}
