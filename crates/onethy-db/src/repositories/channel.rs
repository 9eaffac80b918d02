//! PostgreSQL implementation of ChannelRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use onethy_core::{Channel, ChannelRepository, ChannelStatus, RepoResult, Snowflake};

use crate::models::ChannelModel;

use super::error::{channel_not_found, map_db_error};

const CHANNEL_COLUMNS: &str = "id, user_id, name, channel_type, status, instance_name, \
     webhook_token, message_count, last_activity_at, created_at, updated_at";

/// PostgreSQL implementation of ChannelRepository
#[derive(Clone)]
pub struct PgChannelRepository {
    pool: PgPool,
}

impl PgChannelRepository {
    /// Create a new PgChannelRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChannelRepository for PgChannelRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Channel>> {
        let result = sqlx::query_as::<_, ChannelModel>(&format!(
            "SELECT {CHANNEL_COLUMNS} FROM channels WHERE id = $1 AND user_id = $2"
        ))
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Channel::from))
    }

    #[instrument(skip(self, token))]
    async fn find_by_webhook_token(&self, token: &str) -> RepoResult<Option<Channel>> {
        let result = sqlx::query_as::<_, ChannelModel>(&format!(
            "SELECT {CHANNEL_COLUMNS} FROM channels WHERE webhook_token = $1"
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Channel::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Channel>> {
        let results = sqlx::query_as::<_, ChannelModel>(&format!(
            "SELECT {CHANNEL_COLUMNS} FROM channels WHERE user_id = $1 ORDER BY created_at"
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Channel::from).collect())
    }

    #[instrument(skip(self, channel))]
    async fn create(&self, channel: &Channel) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO channels
                (id, user_id, name, channel_type, status, instance_name, webhook_token,
                 message_count, last_activity_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(channel.id.into_inner())
        .bind(channel.user_id.into_inner())
        .bind(&channel.name)
        .bind(channel.channel_type.as_str())
        .bind(channel.status.as_str())
        .bind(&channel.instance_name)
        .bind(&channel.webhook_token)
        .bind(channel.message_count)
        .bind(channel.last_activity_at)
        .bind(channel.created_at)
        .bind(channel.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: Snowflake, status: ChannelStatus) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE channels
            SET status = $2, last_activity_at = NOW(), updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(channel_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn record_message(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE channels
            SET message_count = message_count + 1, last_activity_at = NOW(), updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(channel_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self, name))]
    async fn update_name(&self, id: Snowflake, user_id: Snowflake, name: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE channels
            SET name = $3, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .bind(name)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(channel_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM channels WHERE id = $1 AND user_id = $2")
            .bind(id.into_inner())
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(channel_not_found(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgChannelRepository>();
    }
}
