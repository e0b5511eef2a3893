//! Chat Repository Implementation
//!
//! PostgreSQL implementation of the ChatRepository trait.
//! Member ids are aggregated from `chat_memberships` on every read.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Chat, ChatRepository};
use crate::shared::error::{AppError, EntityKind};

/// Chat row joined with its aggregated member ids.
#[derive(Debug, sqlx::FromRow)]
struct ChatRow {
    id: String,
    name: String,
    owner_id: String,
    created_at: DateTime<Utc>,
    user_ids: Vec<String>,
}

impl ChatRow {
    fn into_chat(self) -> Chat {
        Chat {
            id: self.id,
            name: self.name,
            user_ids: self.user_ids,
            owner_id: self.owner_id,
            created_at: self.created_at,
        }
    }
}

const SELECT_CHATS: &str = r#"
    SELECT c.id, c.name, c.owner_id, c.created_at,
           COALESCE(
               ARRAY_AGG(m.user_id ORDER BY m.user_id) FILTER (WHERE m.user_id IS NOT NULL),
               ARRAY[]::TEXT[]
           ) AS user_ids
    FROM chats c
    LEFT JOIN chat_memberships m ON m.chat_id = c.id
"#;

/// PostgreSQL chat repository implementation.
#[derive(Clone)]
pub struct PgChatRepository {
    pool: PgPool,
}

impl PgChatRepository {
    /// Create a new PgChatRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatRepository for PgChatRepository {
    async fn find_all(&self) -> Result<Vec<Chat>, AppError> {
        let query = format!("{SELECT_CHATS} GROUP BY c.id");
        let rows = sqlx::query_as::<_, ChatRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into_chat()).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Chat>, AppError> {
        let query = format!("{SELECT_CHATS} WHERE c.id = $1 GROUP BY c.id");
        let row = sqlx::query_as::<_, ChatRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into_chat()))
    }

    async fn find_by_member(&self, user_id: &str) -> Result<Vec<Chat>, AppError> {
        let query = format!(
            "{SELECT_CHATS}
            WHERE c.id IN (SELECT chat_id FROM chat_memberships WHERE user_id = $1)
            GROUP BY c.id"
        );
        let rows = sqlx::query_as::<_, ChatRow>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into_chat()).collect())
    }

    /// Insert the chat and one membership per member in a single transaction.
    async fn create(&self, chat: &Chat) -> Result<Chat, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO chats (id, name, owner_id, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&chat.id)
        .bind(&chat.name)
        .bind(&chat.owner_id)
        .bind(chat.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::duplicate(EntityKind::Chat, chat.id.clone())
            }
            _ => AppError::Database(e),
        })?;

        sqlx::query(
            r#"
            INSERT INTO chat_memberships (chat_id, user_id)
            SELECT $1, member FROM UNNEST($2::TEXT[]) AS member
            ON CONFLICT (chat_id, user_id) DO NOTHING
            "#,
        )
        .bind(&chat.id)
        .bind(&chat.user_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.find_by_id(&chat.id)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::Chat, chat.id.clone()))
    }

    async fn update(&self, chat: &Chat) -> Result<Chat, AppError> {
        let result = sqlx::query("UPDATE chats SET name = $2 WHERE id = $1")
            .bind(&chat.id)
            .bind(&chat.name)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(EntityKind::Chat, chat.id.clone()));
        }

        self.find_by_id(&chat.id)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::Chat, chat.id.clone()))
    }

    /// Delete a chat; memberships and messages cascade.
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM chats WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(EntityKind::Chat, id));
        }

        Ok(())
    }
}
