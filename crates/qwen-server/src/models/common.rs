//! Common types shared across request and response models.

use serde::{Deserialize, Serialize};

/// Conversation role.
///
/// Deserialization accepts exactly the three wire literals, so a request
/// with an unknown role is rejected at the JSON boundary and never reaches
/// the prompt formatter — silently dropping a message would corrupt turn
/// ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Capitalized tag used in the flat prompt (`[System]:` etc.).
    pub fn prompt_tag(self) -> &'static str {
        match self {
            Role::System => "System",
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

/// Chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}
