//! PostgreSQL implementation of TeamRepository

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::instrument;

use onethy_core::{RepoResult, Snowflake, Team, TeamRepository};

use crate::models::TeamModel;

use super::error::{map_db_error, team_not_found};

/// PostgreSQL implementation of TeamRepository
#[derive(Clone)]
pub struct PgTeamRepository {
    pool: PgPool,
}

impl PgTeamRepository {
    /// Create a new PgTeamRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PgTeamRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Team>> {
        let result = sqlx::query_as::<_, TeamModel>(
            r#"
            SELECT id, user_id, name, description, created_at, updated_at
            FROM teams
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Team::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Team>> {
        let results = sqlx::query_as::<_, TeamModel>(
            r#"
            SELECT id, user_id, name, description, created_at, updated_at
            FROM teams
            WHERE user_id = $1
            ORDER BY name
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Team::from).collect())
    }

    #[instrument(skip(self, team))]
    async fn create(&self, team: &Team) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO teams (id, user_id, name, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(team.id.into_inner())
        .bind(team.user_id.into_inner())
        .bind(&team.name)
        .bind(&team.description)
        .bind(team.created_at)
        .bind(team.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, team))]
    async fn update(&self, team: &Team) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE teams
            SET name = $3, description = $4, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(team.id.into_inner())
        .bind(team.user_id.into_inner())
        .bind(&team.name)
        .bind(&team.description)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(team_not_found(team.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1 AND user_id = $2")
            .bind(id.into_inner())
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(team_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn add_member(&self, team_id: Snowflake, agent_id: Snowflake) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO team_members (team_id, agent_id, joined_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (team_id, agent_id) DO NOTHING
            "#,
        )
        .bind(team_id.into_inner())
        .bind(agent_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_member(&self, team_id: Snowflake, agent_id: Snowflake) -> RepoResult<()> {
        sqlx::query("DELETE FROM team_members WHERE team_id = $1 AND agent_id = $2")
            .bind(team_id.into_inner())
            .bind(agent_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn member_ids(&self, team_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        // Join order is the assignment tie-break order
        let rows = sqlx::query(
            r#"
            SELECT agent_id
            FROM team_members
            WHERE team_id = $1
            ORDER BY joined_at, agent_id
            "#,
        )
        .bind(team_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| Snowflake::new(row.get("agent_id")))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgTeamRepository>();
    }
}
