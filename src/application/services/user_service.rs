//! User Service
//!
//! Lookup, creation and partial update of users.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Chat, ChatRepository, CreateUser, User, UserPatch, UserRepository};
use crate::shared::error::{AppError, EntityKind};

/// User service trait
#[async_trait]
pub trait UserService: Send + Sync {
    /// Every user; callers sort.
    async fn get_all_users(&self) -> Result<Vec<User>, AppError>;

    /// Create a user with a client-supplied id.
    async fn create_user(&self, request: CreateUser) -> Result<User, AppError>;

    /// Get user by ID
    async fn get_user_by_id(&self, user_id: &str) -> Result<User, AppError>;

    /// Apply a partial update to a user.
    async fn update_user(&self, user_id: &str, patch: UserPatch) -> Result<User, AppError>;

    /// Chats the user is a member of.
    async fn get_chats_with_user(&self, user_id: &str) -> Result<Vec<Chat>, AppError>;
}

/// UserService implementation
pub struct UserServiceImpl<U, C>
where
    U: UserRepository,
    C: ChatRepository,
{
    user_repo: Arc<U>,
    chat_repo: Arc<C>,
}

impl<U, C> UserServiceImpl<U, C>
where
    U: UserRepository,
    C: ChatRepository,
{
    pub fn new(user_repo: Arc<U>, chat_repo: Arc<C>) -> Self {
        Self {
            user_repo,
            chat_repo,
        }
    }
}

#[async_trait]
impl<U, C> UserService for UserServiceImpl<U, C>
where
    U: UserRepository + 'static,
    C: ChatRepository + 'static,
{
    async fn get_all_users(&self) -> Result<Vec<User>, AppError> {
        self.user_repo.find_all().await
    }

    async fn create_user(&self, request: CreateUser) -> Result<User, AppError> {
        if self.user_repo.find_by_id(&request.id).await?.is_some() {
            return Err(AppError::duplicate(EntityKind::User, request.id));
        }

        let mut user = User::new(request.id);
        user.username = request.username;
        user.email = request.email;

        // The store still enforces uniqueness if a concurrent create wins the race.
        let created = self.user_repo.create(&user).await?;
        tracing::info!(user_id = %created.id, "user created");

        Ok(created)
    }

    async fn get_user_by_id(&self, user_id: &str) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::User, user_id))
    }

    async fn update_user(&self, user_id: &str, patch: UserPatch) -> Result<User, AppError> {
        let mut user = self.get_user_by_id(user_id).await?;

        if patch.is_empty() {
            return Ok(user);
        }

        patch.apply(&mut user);
        let updated = self.user_repo.update(&user).await?;
        tracing::debug!(user_id = %updated.id, "user updated");

        Ok(updated)
    }

    async fn get_chats_with_user(&self, user_id: &str) -> Result<Vec<Chat>, AppError> {
        let user = self.get_user_by_id(user_id).await?;
        self.chat_repo.find_by_member(&user.id).await
    }
}
