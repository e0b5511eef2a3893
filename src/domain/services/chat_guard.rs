//! Chat membership guard.
//!
//! Gates chat-scoped reads and writes: load the chat, then check the
//! caller's membership with an explicit existence query.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::{Chat, ChatRepository, MembershipRepository, User};
use crate::shared::error::{AppError, EntityKind};

/// Authorization checks performed before chat-scoped operations.
#[async_trait]
pub trait ChatGuard: Send + Sync {
    /// Load the chat and require `user` to be a member.
    async fn authorize(&self, chat_id: &str, user: &User) -> Result<Chat, AppError>;

    /// Load the chat and require `user` to be its owner.
    async fn authorize_owner(&self, chat_id: &str, user: &User) -> Result<Chat, AppError>;
}

/// Membership-based guard backed by the chat and membership repositories.
pub struct MembershipGuard<C, M>
where
    C: ChatRepository,
    M: MembershipRepository,
{
    chat_repo: Arc<C>,
    membership_repo: Arc<M>,
}

impl<C, M> MembershipGuard<C, M>
where
    C: ChatRepository,
    M: MembershipRepository,
{
    pub fn new(chat_repo: Arc<C>, membership_repo: Arc<M>) -> Self {
        Self {
            chat_repo,
            membership_repo,
        }
    }

    async fn load_chat(&self, chat_id: &str) -> Result<Chat, AppError> {
        self.chat_repo
            .find_by_id(chat_id)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::Chat, chat_id))
    }
}

#[async_trait]
impl<C, M> ChatGuard for MembershipGuard<C, M>
where
    C: ChatRepository + 'static,
    M: MembershipRepository + 'static,
{
    async fn authorize(&self, chat_id: &str, user: &User) -> Result<Chat, AppError> {
        let chat = self.load_chat(chat_id).await?;

        if !self.membership_repo.is_member(&chat.id, &user.id).await? {
            tracing::debug!(chat_id = %chat.id, user_id = %user.id, "membership check failed");
            return Err(AppError::Forbidden(format!(
                "user {} is not a member of chat {}",
                user.id, chat.id
            )));
        }

        Ok(chat)
    }

    async fn authorize_owner(&self, chat_id: &str, user: &User) -> Result<Chat, AppError> {
        let chat = self.authorize(chat_id, user).await?;

        if !chat.is_owner(&user.id) {
            return Err(AppError::Forbidden(format!(
                "only the owner of chat {} may do this",
                chat.id
            )));
        }

        Ok(chat)
    }
}
