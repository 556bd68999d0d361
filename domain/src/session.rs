use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message in a conversation. Turns are only minted by [`Session`], so a
/// turn's `sequence` always reflects its position at append time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    content: String,
    sequence: u64,
}

impl Turn {
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Ordered transcript of one conversation.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    turns: Vec<Turn>,
    next_sequence: u64,
}

impl Session {
    pub fn new(id: String) -> Self {
        Self {
            id,
            turns: Vec::new(),
            next_sequence: 0,
        }
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> Turn {
        self.push(Role::User, content.into())
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) -> Turn {
        self.push(Role::Assistant, content.into())
    }

    fn push(&mut self, role: Role, content: String) -> Turn {
        let turn = Turn {
            role,
            content,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.turns.push(turn.clone());
        turn
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Drop every turn. The sequence counter keeps counting so numbers are
    /// never handed out twice within one session id.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
