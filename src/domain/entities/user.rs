//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Represents a user account in the chat system.
///
/// Maps to the `users` table:
/// - id: TEXT PRIMARY KEY (client supplied, immutable)
/// - username: TEXT NULL
/// - email: TEXT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW() (immutable)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Client-supplied identifier (primary key)
    pub id: String,

    /// Optional display handle
    #[serde(default)]
    pub username: Option<String>,

    /// Optional contact address
    #[serde(default)]
    pub email: Option<String>,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a user stamped with the current time.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: None,
            email: None,
            created_at: Utc::now(),
        }
    }
}

/// Attributes accepted when creating a user.
#[derive(Debug, Clone, Default)]
pub struct CreateUser {
    pub id: String,
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Partial update for a user. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none()
    }

    /// Apply the present fields to `user`; id and created_at are never touched.
    pub fn apply(self, user: &mut User) {
        if let Some(username) = self.username {
            user.username = Some(username);
        }
        if let Some(email) = self.email {
            user.email = Some(email);
        }
    }
}

/// Repository trait for User data access operations.
///
/// Implementations of this trait handle the actual database interactions.
/// The trait is defined in the domain layer to maintain dependency inversion.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every user, in storage order.
    async fn find_all(&self) -> Result<Vec<User>, AppError>;

    /// Find a user by id.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    /// Find all users whose id is in `ids`. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<User>, AppError>;

    /// Insert a new user. Fails with `DuplicateEntity` if the id is taken.
    async fn create(&self, user: &User) -> Result<User, AppError>;

    /// Persist the mutable fields of an existing user.
    async fn update(&self, user: &User) -> Result<User, AppError>;
}
