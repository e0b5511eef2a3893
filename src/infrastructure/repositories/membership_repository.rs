//! Membership Repository Implementation
//!
//! PostgreSQL implementation of the MembershipRepository trait over the
//! `chat_memberships` join table.

use async_trait::async_trait;
use sqlx::PgPool;

use super::user_repository::UserRow;
use crate::domain::{ChatMembership, MembershipRepository, User};
use crate::shared::error::{AppError, EntityKind};

/// PostgreSQL membership repository implementation.
#[derive(Clone)]
pub struct PgMembershipRepository {
    pool: PgPool,
}

impl PgMembershipRepository {
    /// Create a new PgMembershipRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for PgMembershipRepository {
    async fn is_member(&self, chat_id: &str, user_id: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM chat_memberships
                WHERE chat_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(chat_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_members(&self, chat_id: &str) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT u.id, u.username, u.email, u.created_at
            FROM users u
            INNER JOIN chat_memberships m ON m.user_id = u.id
            WHERE m.chat_id = $1
            "#,
        )
        .bind(chat_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_user()).collect())
    }

    async fn add(&self, membership: &ChatMembership) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO chat_memberships (chat_id, user_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(&membership.chat_id)
        .bind(&membership.user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::duplicate(EntityKind::ChatMembership, membership.key())
            }
            _ => AppError::Database(e),
        })?;

        Ok(())
    }

    async fn remove(&self, membership: &ChatMembership) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM chat_memberships
            WHERE chat_id = $1 AND user_id = $2
            "#,
        )
        .bind(&membership.chat_id)
        .bind(&membership.user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
