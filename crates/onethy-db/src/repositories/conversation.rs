//! PostgreSQL implementation of ConversationRepository

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::instrument;

use onethy_core::{
    Conversation, ConversationQuery, ConversationRepository, RepoResult, Snowflake,
};

use crate::models::ConversationModel;

use super::error::{conversation_not_found, map_db_error};

/// PostgreSQL implementation of ConversationRepository
#[derive(Clone)]
pub struct PgConversationRepository {
    pool: PgPool,
}

impl PgConversationRepository {
    /// Create a new PgConversationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationRepository for PgConversationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(
        &self,
        id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<Conversation>> {
        let result = sqlx::query_as::<_, ConversationModel>(
            r#"
            SELECT id, user_id, contact_id, channel_id, status, priority, assigned_agent_id,
                   assigned_team_id, last_message, last_activity_at, unread_count, labels,
                   created_at, updated_at
            FROM conversations
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Conversation::from))
    }

    #[instrument(skip(self))]
    async fn find_active(
        &self,
        contact_id: Snowflake,
        channel_id: Snowflake,
    ) -> RepoResult<Option<Conversation>> {
        // At most one non-closed conversation should exist per pair; take the
        // newest if a race ever produced more than one.
        let result = sqlx::query_as::<_, ConversationModel>(
            r#"
            SELECT id, user_id, contact_id, channel_id, status, priority, assigned_agent_id,
                   assigned_team_id, last_message, last_activity_at, unread_count, labels,
                   created_at, updated_at
            FROM conversations
            WHERE contact_id = $1 AND channel_id = $2 AND status <> 'closed'
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(contact_id.into_inner())
        .bind(channel_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Conversation::from))
    }

    #[instrument(skip(self, query))]
    async fn find_by_user(
        &self,
        user_id: Snowflake,
        query: ConversationQuery,
    ) -> RepoResult<Vec<Conversation>> {
        let limit = query.limit.clamp(1, 100);

        let results = sqlx::query_as::<_, ConversationModel>(
            r#"
            SELECT id, user_id, contact_id, channel_id, status, priority, assigned_agent_id,
                   assigned_team_id, last_message, last_activity_at, unread_count, labels,
                   created_at, updated_at
            FROM conversations
            WHERE user_id = $1
              AND ($2::text IS NULL OR status = $2)
              AND ($3::bigint IS NULL OR assigned_agent_id = $3)
              AND ($4::bigint IS NULL OR assigned_team_id = $4)
              AND ($5::bigint IS NULL OR channel_id = $5)
              AND ($6::bigint IS NULL OR id < $6)
            ORDER BY last_activity_at DESC
            LIMIT $7
            "#,
        )
        .bind(user_id.into_inner())
        .bind(query.status.map(|s| s.as_str()))
        .bind(query.assigned_agent_id.map(Snowflake::into_inner))
        .bind(query.assigned_team_id.map(Snowflake::into_inner))
        .bind(query.channel_id.map(Snowflake::into_inner))
        .bind(query.before.map(Snowflake::into_inner))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Conversation::from).collect())
    }

    #[instrument(skip(self, conversation))]
    async fn create(&self, conversation: &Conversation) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO conversations
                (id, user_id, contact_id, channel_id, status, priority, assigned_agent_id,
                 assigned_team_id, last_message, last_activity_at, unread_count, labels,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(conversation.id.into_inner())
        .bind(conversation.user_id.into_inner())
        .bind(conversation.contact_id.into_inner())
        .bind(conversation.channel_id.into_inner())
        .bind(conversation.status.as_str())
        .bind(conversation.priority.as_str())
        .bind(conversation.assigned_agent_id.map(Snowflake::into_inner))
        .bind(conversation.assigned_team_id.map(Snowflake::into_inner))
        .bind(&conversation.last_message)
        .bind(conversation.last_activity_at)
        .bind(conversation.unread_count)
        .bind(&conversation.labels)
        .bind(conversation.created_at)
        .bind(conversation.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, conversation))]
    async fn update(&self, conversation: &Conversation) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE conversations
            SET status = $2, priority = $3, assigned_agent_id = $4, assigned_team_id = $5,
                last_message = $6, last_activity_at = $7, unread_count = $8, labels = $9,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(conversation.id.into_inner())
        .bind(conversation.status.as_str())
        .bind(conversation.priority.as_str())
        .bind(conversation.assigned_agent_id.map(Snowflake::into_inner))
        .bind(conversation.assigned_team_id.map(Snowflake::into_inner))
        .bind(&conversation.last_message)
        .bind(conversation.last_activity_at)
        .bind(conversation.unread_count)
        .bind(&conversation.labels)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(conversation_not_found(conversation.id));
        }

        Ok(())
    }

    #[instrument(skip(self, agent_ids))]
    async fn active_counts(&self, agent_ids: &[Snowflake]) -> RepoResult<Vec<(Snowflake, i64)>> {
        if agent_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = agent_ids.iter().map(|s| s.into_inner()).collect();

        let rows = sqlx::query(
            r#"
            SELECT assigned_agent_id, COUNT(*) AS active
            FROM conversations
            WHERE assigned_agent_id = ANY($1) AND status IN ('open', 'pending')
            GROUP BY assigned_agent_id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let agent_id: i64 = row.get("assigned_agent_id");
                let active: i64 = row.get("active");
                (Snowflake::new(agent_id), active)
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn count_active_by_contact(&self, contact_id: Snowflake) -> RepoResult<i64> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS active
            FROM conversations
            WHERE contact_id = $1 AND status <> 'closed'
            "#,
        )
        .bind(contact_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.get("active"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgConversationRepository>();
    }
}
