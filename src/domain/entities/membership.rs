//! Chat membership join entity and repository trait.
//!
//! Maps to the `chat_memberships` table.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use super::User;
use crate::shared::error::AppError;

/// Links one user to one chat.
///
/// Maps to the `chat_memberships` table:
/// - chat_id: TEXT NOT NULL REFERENCES chats(id) ON DELETE CASCADE (composite PK)
/// - user_id: TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE (composite PK)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatMembership {
    pub chat_id: String,
    pub user_id: String,
}

impl ChatMembership {
    pub fn new(chat_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            user_id: user_id.into(),
        }
    }

    /// Identifier reported in uniqueness errors.
    pub fn key(&self) -> String {
        format!("{}:{}", self.chat_id, self.user_id)
    }
}

/// Repository trait for membership lookups in both directions.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Check if a user is a member of a chat.
    async fn is_member(&self, chat_id: &str, user_id: &str) -> Result<bool, AppError>;

    /// Users holding a membership in `chat_id`.
    async fn find_members(&self, chat_id: &str) -> Result<Vec<User>, AppError>;

    /// Add a membership. Fails with `DuplicateEntity` if it already exists.
    async fn add(&self, membership: &ChatMembership) -> Result<(), AppError>;

    /// Remove a membership; returns whether a row was deleted.
    async fn remove(&self, membership: &ChatMembership) -> Result<bool, AppError>;
}
