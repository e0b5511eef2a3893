//! Identifier Generation
//!
//! Server-assigned ids for chats and messages: UUID v4 in 32-char
//! lowercase hex, without hyphens.

use uuid::Uuid;

/// Generate a new entity id.
pub fn generate() -> String {
    Uuid::new_v4().simple().to_string()
}
