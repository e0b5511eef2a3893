//! Chat Service
//!
//! Chat lookup, partial update, deletion and membership management.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    normalize_chat_name, Chat, ChatMembership, ChatPatch, ChatRepository, MembershipRepository,
    NewChat, User, UserRepository,
};
use crate::shared::error::{AppError, EntityKind};

/// Chat service trait
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Every chat; callers sort.
    async fn get_all_chats(&self) -> Result<Vec<Chat>, AppError>;

    /// Get chat by ID
    async fn get_chat_by_id(&self, chat_id: &str) -> Result<Chat, AppError>;

    /// Create a chat owned by `owner`; the owner is always a member.
    async fn create_chat(&self, owner: &User, request: NewChat) -> Result<Chat, AppError>;

    /// Apply a partial update to a chat.
    async fn update_chat(&self, chat_id: &str, patch: ChatPatch) -> Result<Chat, AppError>;

    /// Delete a chat with its memberships and messages.
    async fn delete_chat(&self, chat_id: &str) -> Result<(), AppError>;

    /// Members of a chat.
    async fn get_users_in_chat(&self, chat_id: &str) -> Result<Vec<User>, AppError>;

    /// Add an existing user to a chat.
    async fn add_member(&self, chat_id: &str, user_id: &str) -> Result<Vec<User>, AppError>;

    /// Remove a user from a chat. The owner cannot be removed.
    async fn remove_member(&self, chat_id: &str, user_id: &str) -> Result<(), AppError>;
}

/// ChatService implementation
pub struct ChatServiceImpl<C, U, M>
where
    C: ChatRepository,
    U: UserRepository,
    M: MembershipRepository,
{
    chat_repo: Arc<C>,
    user_repo: Arc<U>,
    membership_repo: Arc<M>,
}

impl<C, U, M> ChatServiceImpl<C, U, M>
where
    C: ChatRepository,
    U: UserRepository,
    M: MembershipRepository,
{
    pub fn new(chat_repo: Arc<C>, user_repo: Arc<U>, membership_repo: Arc<M>) -> Self {
        Self {
            chat_repo,
            user_repo,
            membership_repo,
        }
    }

    async fn ensure_user_exists(&self, user_id: &str) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::User, user_id))
    }
}

#[async_trait]
impl<C, U, M> ChatService for ChatServiceImpl<C, U, M>
where
    C: ChatRepository + 'static,
    U: UserRepository + 'static,
    M: MembershipRepository + 'static,
{
    async fn get_all_chats(&self) -> Result<Vec<Chat>, AppError> {
        self.chat_repo.find_all().await
    }

    async fn get_chat_by_id(&self, chat_id: &str) -> Result<Chat, AppError> {
        self.chat_repo
            .find_by_id(chat_id)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::Chat, chat_id))
    }

    async fn create_chat(&self, owner: &User, request: NewChat) -> Result<Chat, AppError> {
        let name = normalize_chat_name(&request.name)?;
        let chat = Chat::new(name, owner.id.clone(), request.user_ids);

        // Resolve every member before writing anything.
        let found = self.user_repo.find_by_ids(&chat.user_ids).await?;
        if let Some(missing) = chat
            .user_ids
            .iter()
            .find(|id| !found.iter().any(|user| &user.id == *id))
        {
            return Err(AppError::not_found(EntityKind::User, missing.clone()));
        }

        let created = self.chat_repo.create(&chat).await?;
        tracing::info!(
            chat_id = %created.id,
            owner_id = %created.owner_id,
            members = created.user_ids.len(),
            "chat created"
        );

        Ok(created)
    }

    async fn update_chat(&self, chat_id: &str, mut patch: ChatPatch) -> Result<Chat, AppError> {
        let mut chat = self.get_chat_by_id(chat_id).await?;

        if patch.is_empty() {
            return Ok(chat);
        }

        if let Some(name) = patch.name.take() {
            patch.name = Some(normalize_chat_name(&name)?);
        }

        patch.apply(&mut chat);
        let updated = self.chat_repo.update(&chat).await?;
        tracing::debug!(chat_id = %updated.id, "chat updated");

        Ok(updated)
    }

    async fn delete_chat(&self, chat_id: &str) -> Result<(), AppError> {
        let chat = self.get_chat_by_id(chat_id).await?;
        self.chat_repo.delete(&chat.id).await?;
        tracing::info!(chat_id = %chat.id, "chat deleted");
        Ok(())
    }

    async fn get_users_in_chat(&self, chat_id: &str) -> Result<Vec<User>, AppError> {
        let chat = self.get_chat_by_id(chat_id).await?;
        self.membership_repo.find_members(&chat.id).await
    }

    async fn add_member(&self, chat_id: &str, user_id: &str) -> Result<Vec<User>, AppError> {
        let chat = self.get_chat_by_id(chat_id).await?;
        let user = self.ensure_user_exists(user_id).await?;

        self.membership_repo
            .add(&ChatMembership::new(&chat.id, &user.id))
            .await?;
        tracing::info!(chat_id = %chat.id, user_id = %user.id, "member added");

        self.membership_repo.find_members(&chat.id).await
    }

    async fn remove_member(&self, chat_id: &str, user_id: &str) -> Result<(), AppError> {
        let chat = self.get_chat_by_id(chat_id).await?;

        if chat.is_owner(user_id) {
            return Err(AppError::Forbidden(format!(
                "the owner cannot be removed from chat {}",
                chat.id
            )));
        }

        let membership = ChatMembership::new(&chat.id, user_id);
        if !self.membership_repo.remove(&membership).await? {
            return Err(AppError::not_found(EntityKind::ChatMembership, membership.key()));
        }
        tracing::info!(chat_id = %chat.id, user_id = %user_id, "member removed");

        Ok(())
    }
}
