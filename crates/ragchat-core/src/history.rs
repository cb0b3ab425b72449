//! Conversation turns and chat history rendering

use serde::{Deserialize, Serialize};

/// Role of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Get the capitalized display name used in rendered history
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    /// Create a user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Render conversation turns as `"Role: content"` lines in turn order.
///
/// This is a pure function of the turn sequence; every backend adapter uses
/// the same rendering.
pub fn format_history(turns: &[ChatTurn]) -> String {
    turns
        .iter()
        .map(|turn| format!("{}: {}", turn.role, turn.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prepend the rendered history to a new question
pub fn question_with_history(question: &str, turns: &[ChatTurn]) -> String {
    format!(
        "Chat History:\n{}\n\nNew Question:\n{}",
        format_history(turns),
        question
    )
}
