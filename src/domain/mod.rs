//! # Domain Layer
//!
//! The domain layer contains the core rules of the messaging backend.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Core domain entities (User, Chat, ChatMembership, Message)
//!   and their repository traits
//! - **services**: Domain services for authorization
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts
//! - Partial updates are explicit patch objects

pub mod entities;
pub mod services;

// Re-export commonly used types
pub use entities::*;
pub use services::*;
