//! Response DTOs
//!
//! Data structures for API response bodies. Singles are wrapped as
//! `{<entity>: {...}}`, collections as `{meta: {count}, <entities>: [...]}`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Chat, MessageView, User};

/// Collection metadata
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Metadata {
    pub count: usize,
}

impl Metadata {
    fn of<T>(items: &[T]) -> Self {
        Self { count: items.len() }
    }
}

/// User response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Chat response
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub id: String,
    pub name: String,
    pub user_ids: Vec<String>,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<Chat> for ChatResponse {
    fn from(chat: Chat) -> Self {
        Self {
            id: chat.id,
            name: chat.name,
            user_ids: chat.user_ids,
            owner_id: chat.owner_id,
            created_at: chat.created_at,
        }
    }
}

/// Author summary embedded in a message
#[derive(Debug, Serialize)]
pub struct MessageAuthor {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Chat summary embedded in a message
#[derive(Debug, Serialize)]
pub struct MessageChat {
    pub id: String,
    pub name: String,
}

/// Message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub chat_id: String,
    pub user_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub user: MessageAuthor,
    pub chat: MessageChat,
}

impl From<MessageView> for MessageResponse {
    fn from(view: MessageView) -> Self {
        let MessageView {
            message,
            author,
            chat,
        } = view;

        Self {
            id: message.id,
            chat_id: message.chat_id,
            user_id: message.user_id,
            text: message.text,
            created_at: message.created_at,
            user: MessageAuthor {
                id: author.id,
                username: author.username,
            },
            chat: MessageChat {
                id: chat.id,
                name: chat.name,
            },
        }
    }
}

/// `{user}` envelope
#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub user: UserResponse,
}

impl From<User> for UserEnvelope {
    fn from(user: User) -> Self {
        Self { user: user.into() }
    }
}

/// `{meta, users}` envelope, sorted by id
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub meta: Metadata,
    pub users: Vec<UserResponse>,
}

impl From<Vec<User>> for UserListResponse {
    fn from(mut users: Vec<User>) -> Self {
        users.sort_by(|a, b| a.id.cmp(&b.id));
        Self {
            meta: Metadata::of(&users),
            users: users.into_iter().map(UserResponse::from).collect(),
        }
    }
}

/// `{chat}` envelope
#[derive(Debug, Serialize)]
pub struct ChatEnvelope {
    pub chat: ChatResponse,
}

impl From<Chat> for ChatEnvelope {
    fn from(chat: Chat) -> Self {
        Self { chat: chat.into() }
    }
}

/// `{meta, chats}` envelope, sorted by name
#[derive(Debug, Serialize)]
pub struct ChatListResponse {
    pub meta: Metadata,
    pub chats: Vec<ChatResponse>,
}

impl From<Vec<Chat>> for ChatListResponse {
    fn from(mut chats: Vec<Chat>) -> Self {
        chats.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Self {
            meta: Metadata::of(&chats),
            chats: chats.into_iter().map(ChatResponse::from).collect(),
        }
    }
}

/// `{message}` envelope
#[derive(Debug, Serialize)]
pub struct MessageEnvelope {
    pub message: MessageResponse,
}

impl From<MessageView> for MessageEnvelope {
    fn from(view: MessageView) -> Self {
        Self {
            message: view.into(),
        }
    }
}

/// `{meta, messages}` envelope, oldest first
#[derive(Debug, Serialize)]
pub struct MessageListResponse {
    pub meta: Metadata,
    pub messages: Vec<MessageResponse>,
}

impl From<Vec<MessageView>> for MessageListResponse {
    fn from(mut views: Vec<MessageView>) -> Self {
        views.sort_by(|a, b| {
            a.message
                .created_at
                .cmp(&b.message.created_at)
                .then_with(|| a.message.id.cmp(&b.message.id))
        });
        Self {
            meta: Metadata::of(&views),
            messages: views.into_iter().map(MessageResponse::from).collect(),
        }
    }
}
