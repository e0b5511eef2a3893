//! In-memory repositories
//!
//! Implements the domain repository traits over one shared state so the
//! full router can run without PostgreSQL. Seeded from `tests/fixtures`.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use chat_backend::domain::{
    Chat, ChatMembership, ChatRepository, MembershipRepository, Message, MessageRepository, User,
    UserRepository,
};
use chat_backend::shared::error::{AppError, EntityKind};

const SEED: &str = include_str!("../fixtures/seed.json");

#[derive(Debug, Deserialize)]
struct Seed {
    users: Vec<User>,
    chats: Vec<Chat>,
    messages: Vec<Message>,
}

#[derive(Debug, Clone)]
struct ChatRecord {
    id: String,
    name: String,
    owner_id: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<String, User>,
    chats: BTreeMap<String, ChatRecord>,
    /// (chat_id, user_id)
    memberships: BTreeSet<(String, String)>,
    messages: BTreeMap<String, Message>,
}

impl State {
    fn assemble(&self, record: &ChatRecord) -> Chat {
        let user_ids = self
            .memberships
            .iter()
            .filter(|(chat_id, _)| chat_id == &record.id)
            .map(|(_, user_id)| user_id.clone())
            .collect();

        Chat {
            id: record.id.clone(),
            name: record.name.clone(),
            user_ids,
            owner_id: record.owner_id.clone(),
            created_at: record.created_at,
        }
    }
}

/// Shared state behind all four repositories.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    /// A store loaded with the fixture users, chats and messages.
    pub fn seeded() -> Self {
        let seed: Seed = serde_json::from_str(SEED).expect("seed fixture is valid JSON");
        let mut state = State::default();

        for user in seed.users {
            state.users.insert(user.id.clone(), user);
        }
        for chat in seed.chats {
            for user_id in &chat.user_ids {
                state.memberships.insert((chat.id.clone(), user_id.clone()));
            }
            state.chats.insert(
                chat.id.clone(),
                ChatRecord {
                    id: chat.id,
                    name: chat.name,
                    owner_id: chat.owner_id,
                    created_at: chat.created_at,
                },
            );
        }
        for message in seed.messages {
            state.messages.insert(message.id.clone(), message);
        }

        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("memory store lock poisoned")
    }

    pub fn users(&self) -> Arc<MemoryUsers> {
        Arc::new(MemoryUsers(self.clone()))
    }

    pub fn chats(&self) -> Arc<MemoryChats> {
        Arc::new(MemoryChats(self.clone()))
    }

    pub fn memberships(&self) -> Arc<MemoryMemberships> {
        Arc::new(MemoryMemberships(self.clone()))
    }

    pub fn messages(&self) -> Arc<MemoryMessages> {
        Arc::new(MemoryMessages(self.clone()))
    }

    /// Number of stored messages in a chat, for cascade checks.
    pub fn message_count(&self, chat_id: &str) -> usize {
        self.lock()
            .messages
            .values()
            .filter(|m| m.chat_id == chat_id)
            .count()
    }

    /// Number of membership rows of a chat, for cascade checks.
    pub fn membership_count(&self, chat_id: &str) -> usize {
        self.lock()
            .memberships
            .iter()
            .filter(|(c, _)| c == chat_id)
            .count()
    }
}

pub struct MemoryUsers(MemoryStore);
pub struct MemoryChats(MemoryStore);
pub struct MemoryMemberships(MemoryStore);
pub struct MemoryMessages(MemoryStore);

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        Ok(self.0.lock().users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.0.lock().users.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<User>, AppError> {
        let state = self.0.lock();
        Ok(ids.iter().filter_map(|id| state.users.get(id).cloned()).collect())
    }

    async fn create(&self, user: &User) -> Result<User, AppError> {
        let mut state = self.0.lock();
        if state.users.contains_key(&user.id) {
            return Err(AppError::duplicate(EntityKind::User, user.id.clone()));
        }
        state.users.insert(user.id.clone(), user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let mut state = self.0.lock();
        let stored = state
            .users
            .get_mut(&user.id)
            .ok_or_else(|| AppError::not_found(EntityKind::User, user.id.clone()))?;
        stored.username = user.username.clone();
        stored.email = user.email.clone();
        Ok(stored.clone())
    }
}

#[async_trait]
impl ChatRepository for MemoryChats {
    async fn find_all(&self) -> Result<Vec<Chat>, AppError> {
        let state = self.0.lock();
        Ok(state.chats.values().map(|c| state.assemble(c)).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Chat>, AppError> {
        let state = self.0.lock();
        Ok(state.chats.get(id).map(|c| state.assemble(c)))
    }

    async fn find_by_member(&self, user_id: &str) -> Result<Vec<Chat>, AppError> {
        let state = self.0.lock();
        Ok(state
            .chats
            .values()
            .filter(|c| state.memberships.contains(&(c.id.clone(), user_id.to_string())))
            .map(|c| state.assemble(c))
            .collect())
    }

    async fn create(&self, chat: &Chat) -> Result<Chat, AppError> {
        let mut state = self.0.lock();
        if state.chats.contains_key(&chat.id) {
            return Err(AppError::duplicate(EntityKind::Chat, chat.id.clone()));
        }
        let record = ChatRecord {
            id: chat.id.clone(),
            name: chat.name.clone(),
            owner_id: chat.owner_id.clone(),
            created_at: chat.created_at,
        };
        for user_id in &chat.user_ids {
            state.memberships.insert((chat.id.clone(), user_id.clone()));
        }
        state.chats.insert(chat.id.clone(), record.clone());
        Ok(state.assemble(&record))
    }

    async fn update(&self, chat: &Chat) -> Result<Chat, AppError> {
        let mut state = self.0.lock();
        let record = state
            .chats
            .get_mut(&chat.id)
            .ok_or_else(|| AppError::not_found(EntityKind::Chat, chat.id.clone()))?;
        record.name = chat.name.clone();
        let record = record.clone();
        Ok(state.assemble(&record))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut state = self.0.lock();
        if state.chats.remove(id).is_none() {
            return Err(AppError::not_found(EntityKind::Chat, id));
        }
        state.memberships.retain(|(chat_id, _)| chat_id != id);
        state.messages.retain(|_, m| m.chat_id != id);
        Ok(())
    }
}

#[async_trait]
impl MembershipRepository for MemoryMemberships {
    async fn is_member(&self, chat_id: &str, user_id: &str) -> Result<bool, AppError> {
        Ok(self
            .0
            .lock()
            .memberships
            .contains(&(chat_id.to_string(), user_id.to_string())))
    }

    async fn find_members(&self, chat_id: &str) -> Result<Vec<User>, AppError> {
        let state = self.0.lock();
        Ok(state
            .memberships
            .iter()
            .filter(|(c, _)| c == chat_id)
            .filter_map(|(_, u)| state.users.get(u).cloned())
            .collect())
    }

    async fn add(&self, membership: &ChatMembership) -> Result<(), AppError> {
        let inserted = self
            .0
            .lock()
            .memberships
            .insert((membership.chat_id.clone(), membership.user_id.clone()));
        if !inserted {
            return Err(AppError::duplicate(EntityKind::ChatMembership, membership.key()));
        }
        Ok(())
    }

    async fn remove(&self, membership: &ChatMembership) -> Result<bool, AppError> {
        Ok(self
            .0
            .lock()
            .memberships
            .remove(&(membership.chat_id.clone(), membership.user_id.clone())))
    }
}

#[async_trait]
impl MessageRepository for MemoryMessages {
    async fn find_by_chat(&self, chat_id: &str) -> Result<Vec<Message>, AppError> {
        Ok(self
            .0
            .lock()
            .messages
            .values()
            .filter(|m| m.chat_id == chat_id)
            .cloned()
            .collect())
    }

    async fn find_in_chat(&self, chat_id: &str, message_id: &str) -> Result<Option<Message>, AppError> {
        Ok(self
            .0
            .lock()
            .messages
            .get(message_id)
            .filter(|m| m.chat_id == chat_id)
            .cloned())
    }

    async fn create(&self, message: &Message) -> Result<Message, AppError> {
        let mut state = self.0.lock();
        if state.messages.contains_key(&message.id) {
            return Err(AppError::duplicate(EntityKind::Message, message.id.clone()));
        }
        state.messages.insert(message.id.clone(), message.clone());
        Ok(message.clone())
    }

    async fn update(&self, message: &Message) -> Result<Message, AppError> {
        let mut state = self.0.lock();
        let stored = state
            .messages
            .get_mut(&message.id)
            .ok_or_else(|| AppError::not_found(EntityKind::Message, message.id.clone()))?;
        stored.text = message.text.clone();
        Ok(stored.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.0
            .lock()
            .messages
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(EntityKind::Message, id))
    }
}
