//! Message Service
//!
//! Handles message operations including listing, posting, editing and deleting.
//! Membership is checked by the guard before these calls; the edit policy
//! decides whether an editor must also be the author.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::EditPolicy;
use crate::domain::{
    normalize_text, Chat, ChatRepository, Message, MessageRepository, MessageView, User,
    UserRepository,
};
use crate::shared::error::{AppError, EntityKind};

/// Message service trait
#[async_trait]
pub trait MessageService: Send + Sync {
    /// All messages of a chat, unsorted.
    async fn get_messages_in_chat(&self, chat_id: &str) -> Result<Vec<MessageView>, AppError>;

    /// Post a message authored by `author`.
    async fn add_message(&self, author: &User, chat_id: &str, text: &str) -> Result<MessageView, AppError>;

    /// Replace the text of a message in a chat.
    async fn update_message(
        &self,
        chat_id: &str,
        message_id: &str,
        editor_id: &str,
        text: &str,
    ) -> Result<MessageView, AppError>;

    /// Delete a message from a chat.
    async fn delete_message(&self, chat_id: &str, message_id: &str, editor_id: &str) -> Result<(), AppError>;
}

/// MessageService implementation
pub struct MessageServiceImpl<Msg, C, U>
where
    Msg: MessageRepository,
    C: ChatRepository,
    U: UserRepository,
{
    message_repo: Arc<Msg>,
    chat_repo: Arc<C>,
    user_repo: Arc<U>,
    edit_policy: EditPolicy,
}

impl<Msg, C, U> MessageServiceImpl<Msg, C, U>
where
    Msg: MessageRepository,
    C: ChatRepository,
    U: UserRepository,
{
    pub fn new(
        message_repo: Arc<Msg>,
        chat_repo: Arc<C>,
        user_repo: Arc<U>,
        edit_policy: EditPolicy,
    ) -> Self {
        Self {
            message_repo,
            chat_repo,
            user_repo,
            edit_policy,
        }
    }

    async fn load_chat(&self, chat_id: &str) -> Result<Chat, AppError> {
        self.chat_repo
            .find_by_id(chat_id)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::Chat, chat_id))
    }

    async fn load_user(&self, user_id: &str) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::User, user_id))
    }

    /// Locate a message scoped to `chat` and apply the edit policy.
    async fn load_editable(&self, chat: &Chat, message_id: &str, editor_id: &str) -> Result<Message, AppError> {
        let message = self
            .message_repo
            .find_in_chat(&chat.id, message_id)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::Message, message_id))?;

        if self.edit_policy == EditPolicy::AuthorOnly && !message.is_authored_by(editor_id) {
            return Err(AppError::Forbidden(format!(
                "only the author may change message {}",
                message.id
            )));
        }

        Ok(message)
    }
}

#[async_trait]
impl<Msg, C, U> MessageService for MessageServiceImpl<Msg, C, U>
where
    Msg: MessageRepository + 'static,
    C: ChatRepository + 'static,
    U: UserRepository + 'static,
{
    async fn get_messages_in_chat(&self, chat_id: &str) -> Result<Vec<MessageView>, AppError> {
        let chat = self.load_chat(chat_id).await?;
        let messages = self.message_repo.find_by_chat(&chat.id).await?;

        let mut author_ids: Vec<String> = messages.iter().map(|m| m.user_id.clone()).collect();
        author_ids.sort();
        author_ids.dedup();

        let authors: HashMap<String, User> = self
            .user_repo
            .find_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|user| (user.id.clone(), user))
            .collect();

        messages
            .into_iter()
            .map(|message| {
                let author = authors
                    .get(&message.user_id)
                    .cloned()
                    .ok_or_else(|| AppError::not_found(EntityKind::User, message.user_id.clone()))?;
                Ok(MessageView {
                    message,
                    author,
                    chat: chat.clone(),
                })
            })
            .collect()
    }

    async fn add_message(&self, author: &User, chat_id: &str, text: &str) -> Result<MessageView, AppError> {
        let text = normalize_text(text)?;
        let chat = self.load_chat(chat_id).await?;

        let message = Message::new(chat.id.clone(), author.id.clone(), text);
        let created = self.message_repo.create(&message).await?;
        tracing::info!(message_id = %created.id, chat_id = %chat.id, user_id = %author.id, "message added");

        Ok(MessageView {
            message: created,
            author: author.clone(),
            chat,
        })
    }

    async fn update_message(
        &self,
        chat_id: &str,
        message_id: &str,
        editor_id: &str,
        text: &str,
    ) -> Result<MessageView, AppError> {
        let text = normalize_text(text)?;
        let chat = self.load_chat(chat_id).await?;
        let mut message = self.load_editable(&chat, message_id, editor_id).await?;

        message.text = text;
        let updated = self.message_repo.update(&message).await?;
        tracing::debug!(message_id = %updated.id, editor_id = %editor_id, "message updated");

        let author = self.load_user(&updated.user_id).await?;
        Ok(MessageView {
            message: updated,
            author,
            chat,
        })
    }

    async fn delete_message(&self, chat_id: &str, message_id: &str, editor_id: &str) -> Result<(), AppError> {
        let chat = self.load_chat(chat_id).await?;
        let message = self.load_editable(&chat, message_id, editor_id).await?;

        self.message_repo.delete(&message.id).await?;
        tracing::info!(message_id = %message.id, editor_id = %editor_id, "message deleted");

        Ok(())
    }
}
