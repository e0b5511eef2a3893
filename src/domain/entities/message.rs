//! Message entity and repository trait.
//!
//! Maps to the `messages` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use super::{Chat, User};
use crate::shared::error::AppError;
use crate::shared::ids;

/// Maximum message length in characters, after trimming.
pub const MAX_MESSAGE_LENGTH: usize = 4000;

/// Represents a message in a chat.
///
/// Maps to the `messages` table:
/// - id: TEXT PRIMARY KEY (server generated)
/// - chat_id: TEXT NOT NULL REFERENCES chats(id) ON DELETE CASCADE
/// - user_id: TEXT NOT NULL REFERENCES users(id)
/// - text: TEXT NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,

    /// Chat the message belongs to (immutable)
    pub chat_id: String,

    /// Author (immutable)
    pub user_id: String,

    pub text: String,

    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Build a new message with a fresh id and timestamp.
    pub fn new(chat_id: impl Into<String>, user_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: ids::generate(),
            chat_id: chat_id.into(),
            user_id: user_id.into(),
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    pub fn is_authored_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

/// A message together with the entities it references, as returned by the
/// access layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub message: Message,
    pub author: User,
    pub chat: Chat,
}

/// Trim message text and check its length.
pub fn normalize_text(text: &str) -> Result<String, AppError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("text: must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(AppError::Validation(format!(
            "text: must be at most {} characters",
            MAX_MESSAGE_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

/// Repository trait for Message data access operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// All messages of a chat, in storage order.
    async fn find_by_chat(&self, chat_id: &str) -> Result<Vec<Message>, AppError>;

    /// Find a message by id, only if it belongs to `chat_id`.
    async fn find_in_chat(&self, chat_id: &str, message_id: &str) -> Result<Option<Message>, AppError>;

    /// Insert a new message.
    async fn create(&self, message: &Message) -> Result<Message, AppError>;

    /// Persist new text for an existing message.
    async fn update(&self, message: &Message) -> Result<Message, AppError>;

    /// Delete a message.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}
