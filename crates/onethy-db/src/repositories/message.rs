//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use onethy_core::{Message, MessageQuery, MessageRepository, RepoResult, Snowflake};

use crate::models::MessageModel;

use super::error::map_db_error;

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, conversation_id, from_me, content, message_type, status,
                   external_id, push_name, provider_timestamp, created_at
            FROM messages
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }

    #[instrument(skip(self))]
    async fn find_by_conversation(
        &self,
        conversation_id: Snowflake,
        query: MessageQuery,
    ) -> RepoResult<Vec<Message>> {
        let limit = query.limit.clamp(1, 100);

        let results = match (query.before, query.after) {
            (Some(before), None) => {
                // Fetch messages before cursor (scrolling up)
                sqlx::query_as::<_, MessageModel>(
                    r#"
                    SELECT id, conversation_id, from_me, content, message_type, status,
                           external_id, push_name, provider_timestamp, created_at
                    FROM messages
                    WHERE conversation_id = $1 AND id < $2
                    ORDER BY id DESC
                    LIMIT $3
                    "#,
                )
                .bind(conversation_id.into_inner())
                .bind(before.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            (None, Some(after)) => {
                // Fetch messages after cursor (scrolling down)
                sqlx::query_as::<_, MessageModel>(
                    r#"
                    SELECT id, conversation_id, from_me, content, message_type, status,
                           external_id, push_name, provider_timestamp, created_at
                    FROM messages
                    WHERE conversation_id = $1 AND id > $2
                    ORDER BY id ASC
                    LIMIT $3
                    "#,
                )
                .bind(conversation_id.into_inner())
                .bind(after.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            _ => {
                // Fetch latest messages (no cursor)
                sqlx::query_as::<_, MessageModel>(
                    r#"
                    SELECT id, conversation_id, from_me, content, message_type, status,
                           external_id, push_name, provider_timestamp, created_at
                    FROM messages
                    WHERE conversation_id = $1
                    ORDER BY id DESC
                    LIMIT $2
                    "#,
                )
                .bind(conversation_id.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self, message))]
    async fn create(&self, message: &Message) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO messages
                (id, conversation_id, from_me, content, message_type, status,
                 external_id, push_name, provider_timestamp, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(message.id.into_inner())
        .bind(message.conversation_id.into_inner())
        .bind(message.from_me)
        .bind(&message.content)
        .bind(message.message_type.as_str())
        .bind(message.status.as_str())
        .bind(&message.external_id)
        .bind(&message.push_name)
        .bind(message.provider_timestamp)
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, conversation_id: Snowflake) -> RepoResult<u64> {
        // Forward-only: only sent/delivered inbound messages move to read, so
        // repeating the call affects zero rows.
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET status = 'read'
            WHERE conversation_id = $1 AND from_me = false AND status IN ('sent', 'delivered')
            "#,
        )
        .bind(conversation_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgMessageRepository>();
    }
}
