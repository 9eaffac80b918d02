//! PostgreSQL implementation of MacroRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use onethy_core::{DomainError, Macro, MacroRepository, RepoResult, Snowflake};

use crate::models::MacroModel;

use super::error::{macro_not_found, map_db_error, map_unique_violation};

/// PostgreSQL implementation of MacroRepository
#[derive(Clone)]
pub struct PgMacroRepository {
    pool: PgPool,
}

impl PgMacroRepository {
    /// Create a new PgMacroRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MacroRepository for PgMacroRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Macro>> {
        let result = sqlx::query_as::<_, MacroModel>(
            r#"
            SELECT id, user_id, shortcut, content, created_at, updated_at
            FROM macros
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Macro::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Macro>> {
        let results = sqlx::query_as::<_, MacroModel>(
            r#"
            SELECT id, user_id, shortcut, content, created_at, updated_at
            FROM macros
            WHERE user_id = $1
            ORDER BY shortcut
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Macro::from).collect())
    }

    #[instrument(skip(self, r#macro))]
    async fn create(&self, r#macro: &Macro) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO macros (id, user_id, shortcut, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(r#macro.id.into_inner())
        .bind(r#macro.user_id.into_inner())
        .bind(&r#macro.shortcut)
        .bind(&r#macro.content)
        .bind(r#macro.created_at)
        .bind(r#macro.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::MacroShortcutExists))?;

        Ok(())
    }

    #[instrument(skip(self, r#macro))]
    async fn update(&self, r#macro: &Macro) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE macros
            SET shortcut = $3, content = $4, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(r#macro.id.into_inner())
        .bind(r#macro.user_id.into_inner())
        .bind(&r#macro.shortcut)
        .bind(&r#macro.content)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::MacroShortcutExists))?;

        if result.rows_affected() == 0 {
            return Err(macro_not_found(r#macro.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM macros WHERE id = $1 AND user_id = $2")
            .bind(id.into_inner())
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(macro_not_found(id));
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
        assert_send_sync::<PgMacroRepository>();
    }
}
