//! Message Repository Implementation
//!
//! PostgreSQL implementation of the MessageRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Message, MessageRepository};
use crate::shared::error::{AppError, EntityKind};

/// Database row representation matching the messages table schema.
#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: String,
    chat_id: String,
    user_id: String,
    text: String,
    created_at: DateTime<Utc>,
}

impl MessageRow {
    /// Convert database row to domain Message entity.
    fn into_message(self) -> Message {
        Message {
            id: self.id,
            chat_id: self.chat_id,
            user_id: self.user_id,
            text: self.text,
            created_at: self.created_at,
        }
    }
}

/// PostgreSQL message repository implementation.
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    async fn find_by_chat(&self, chat_id: &str) -> Result<Vec<Message>, AppError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, chat_id, user_id, text, created_at
            FROM messages
            WHERE chat_id = $1
            "#,
        )
        .bind(chat_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_message()).collect())
    }

    async fn find_in_chat(&self, chat_id: &str, message_id: &str) -> Result<Option<Message>, AppError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, chat_id, user_id, text, created_at
            FROM messages
            WHERE id = $1 AND chat_id = $2
            "#,
        )
        .bind(message_id)
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_message()))
    }

    async fn create(&self, message: &Message) -> Result<Message, AppError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            INSERT INTO messages (id, chat_id, user_id, text, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, chat_id, user_id, text, created_at
            "#,
        )
        .bind(&message.id)
        .bind(&message.chat_id)
        .bind(&message.user_id)
        .bind(&message.text)
        .bind(message.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::duplicate(EntityKind::Message, message.id.clone())
            }
            _ => AppError::Database(e),
        })?;

        Ok(row.into_message())
    }

    async fn update(&self, message: &Message) -> Result<Message, AppError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            UPDATE messages
            SET text = $2
            WHERE id = $1
            RETURNING id, chat_id, user_id, text, created_at
            "#,
        )
        .bind(&message.id)
        .bind(&message.text)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found(EntityKind::Message, message.id.clone()))?;

        Ok(row.into_message())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(EntityKind::Message, id));
        }

        Ok(())
    }
}
