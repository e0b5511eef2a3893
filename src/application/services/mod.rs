//! Application Services
//!
//! The access layer: lookup-or-fail semantics, membership-scoped queries
//! and partial updates over the repository traits.
//!
//! ## Available Services
//!
//! - **UserService**: user lookup, creation and profile updates
//! - **ChatService**: chat CRUD and membership management
//! - **MessageService**: message listing, posting, editing and deleting

pub mod chat_service;
pub mod message_service;
pub mod user_service;

pub use chat_service::{ChatService, ChatServiceImpl};
pub use message_service::{MessageService, MessageServiceImpl};
pub use user_service::{UserService, UserServiceImpl};
