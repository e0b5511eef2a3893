//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! ## Available Repositories
//!
//! - **PgUserRepository** - User accounts
//! - **PgChatRepository** - Chats with aggregated member ids
//! - **PgMembershipRepository** - Chat/user join table
//! - **PgMessageRepository** - Messages scoped to chats
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use chat_backend::infrastructure::repositories::{
//!     PgChatRepository, PgMembershipRepository, PgMessageRepository, PgUserRepository,
//! };
//!
//! async fn setup_repositories(pool: PgPool) {
//!     let user_repo = PgUserRepository::new(pool.clone());
//!     let chat_repo = PgChatRepository::new(pool.clone());
//!     let membership_repo = PgMembershipRepository::new(pool.clone());
//!     let message_repo = PgMessageRepository::new(pool);
//! }
//! ```

pub mod chat_repository;
pub mod membership_repository;
pub mod message_repository;
pub mod user_repository;

pub use chat_repository::PgChatRepository;
pub use membership_repository::PgMembershipRepository;
pub use message_repository::PgMessageRepository;
pub use user_repository::PgUserRepository;
