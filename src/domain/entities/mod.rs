//! # Domain Entities
//!
//! Core domain entities representing the persisted objects of the messaging
//! backend. All entities map directly to their corresponding database tables.
//!
//! - **User**: account with a client-supplied id
//! - **Chat**: a conversation with an owner and a member set
//! - **ChatMembership**: the user/chat join relation
//! - **Message**: a text message posted in a chat
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod chat;
mod membership;
mod message;
mod user;

pub use chat::{normalize_chat_name, Chat, ChatPatch, ChatRepository, NewChat};
pub use membership::{ChatMembership, MembershipRepository};
pub use message::{normalize_text, Message, MessageRepository, MessageView, MAX_MESSAGE_LENGTH};
pub use user::{CreateUser, User, UserPatch, UserRepository};

#[cfg(test)]
pub use chat::MockChatRepository;
#[cfg(test)]
pub use membership::MockMembershipRepository;
#[cfg(test)]
pub use message::MockMessageRepository;
#[cfg(test)]
pub use user::MockUserRepository;
