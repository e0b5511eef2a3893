//! # Domain Services
//!
//! Domain services encapsulate business rules that don't naturally belong
//! to a single entity.
//!
//! ## Services
//!
//! - **ChatGuard**: membership and ownership checks for chat-scoped requests

mod chat_guard;

pub use chat_guard::*;
