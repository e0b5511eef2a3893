//! Chat entity and repository trait.
//!
//! Maps to the `chats` table; `user_ids` is assembled from `chat_memberships`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;
use crate::shared::ids;

/// Represents a chat room.
///
/// Maps to the `chats` table:
/// - id: TEXT PRIMARY KEY (server generated)
/// - name: TEXT NOT NULL
/// - owner_id: TEXT NOT NULL REFERENCES users(id) (immutable)
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW() (immutable)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: String,

    /// Mutable display name
    pub name: String,

    /// Ids of member users, sorted
    #[serde(default)]
    pub user_ids: Vec<String>,

    /// Creator of the chat; always a member
    pub owner_id: String,

    pub created_at: DateTime<Utc>,
}

impl Chat {
    /// Build a new chat owned by `owner_id`.
    ///
    /// The owner is added to the member list if absent and duplicates are
    /// collapsed, so the owner-is-member invariant holds from creation.
    pub fn new(name: impl Into<String>, owner_id: impl Into<String>, members: Vec<String>) -> Self {
        let owner_id = owner_id.into();
        let mut user_ids = members;
        user_ids.push(owner_id.clone());
        user_ids.sort();
        user_ids.dedup();

        Self {
            id: ids::generate(),
            name: name.into(),
            user_ids,
            owner_id,
            created_at: Utc::now(),
        }
    }

    /// Check whether `user_id` is in the member list.
    pub fn has_member(&self, user_id: &str) -> bool {
        self.user_ids.iter().any(|id| id == user_id)
    }

    pub fn is_owner(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }
}

/// Trim a chat name, rejecting one that is blank.
pub fn normalize_chat_name(name: &str) -> Result<String, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("name: must not be empty".into()));
    }
    Ok(trimmed.to_string())
}

/// Attributes accepted when creating a chat.
#[derive(Debug, Clone, Default)]
pub struct NewChat {
    pub name: String,
    /// Additional members besides the owner
    pub user_ids: Vec<String>,
}

/// Partial update for a chat. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatPatch {
    pub name: Option<String>,
}

impl ChatPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }

    /// Apply the present fields to `chat`. Id, owner, members and
    /// created_at are not patchable.
    pub fn apply(self, chat: &mut Chat) {
        if let Some(name) = self.name {
            chat.name = name;
        }
    }
}

/// Repository trait for Chat data access operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Every chat, in storage order.
    async fn find_all(&self) -> Result<Vec<Chat>, AppError>;

    /// Find a chat by id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Chat>, AppError>;

    /// Chats in which `user_id` holds a membership.
    async fn find_by_member(&self, user_id: &str) -> Result<Vec<Chat>, AppError>;

    /// Insert a chat together with one membership per entry in `user_ids`.
    async fn create(&self, chat: &Chat) -> Result<Chat, AppError>;

    /// Persist the mutable fields of an existing chat.
    async fn update(&self, chat: &Chat) -> Result<Chat, AppError>;

    /// Physically delete a chat, its memberships and its messages.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}
