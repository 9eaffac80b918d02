//! PostgreSQL implementation of AgentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use onethy_core::{Agent, AgentRepository, RepoResult, Snowflake};

use crate::models::AgentModel;

use super::error::{agent_not_found, map_db_error};

/// PostgreSQL implementation of AgentRepository
#[derive(Clone)]
pub struct PgAgentRepository {
    pool: PgPool,
}

impl PgAgentRepository {
    /// Create a new PgAgentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AgentRepository for PgAgentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Agent>> {
        let result = sqlx::query_as::<_, AgentModel>(
            r#"
            SELECT id, user_id, name, email, created_at, updated_at
            FROM agents
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Agent::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Agent>> {
        let results = sqlx::query_as::<_, AgentModel>(
            r#"
            SELECT id, user_id, name, email, created_at, updated_at
            FROM agents
            WHERE user_id = $1
            ORDER BY name
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Agent::from).collect())
    }

    #[instrument(skip(self, agent))]
    async fn create(&self, agent: &Agent) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO agents (id, user_id, name, email, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(agent.id.into_inner())
        .bind(agent.user_id.into_inner())
        .bind(&agent.name)
        .bind(&agent.email)
        .bind(agent.created_at)
        .bind(agent.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, agent))]
    async fn update(&self, agent: &Agent) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE agents
            SET name = $3, email = $4, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(agent.id.into_inner())
        .bind(agent.user_id.into_inner())
        .bind(&agent.name)
        .bind(&agent.email)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(agent_not_found(agent.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM agents WHERE id = $1 AND user_id = $2")
            .bind(id.into_inner())
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(agent_not_found(id));
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
        assert_send_sync::<PgAgentRepository>();
    }
}
