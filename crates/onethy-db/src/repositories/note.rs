//! PostgreSQL implementation of NoteRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use onethy_core::{Note, NoteRepository, RepoResult, Snowflake};

use crate::models::NoteModel;

use super::error::{map_db_error, note_not_found};

/// PostgreSQL implementation of NoteRepository
#[derive(Clone)]
pub struct PgNoteRepository {
    pool: PgPool,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    #[instrument(skip(self))]
    async fn find_by_conversation(&self, conversation_id: Snowflake) -> RepoResult<Vec<Note>> {
        let results = sqlx::query_as::<_, NoteModel>(
            r#"
            SELECT id, user_id, conversation_id, author_agent_id, content, created_at
            FROM notes
            WHERE conversation_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(conversation_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Note::from).collect())
    }

    #[instrument(skip(self, note))]
    async fn create(&self, note: &Note) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO notes (id, user_id, conversation_id, author_agent_id, content, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(note.id.into_inner())
        .bind(note.user_id.into_inner())
        .bind(note.conversation_id.into_inner())
        .bind(note.author_agent_id.map(Snowflake::into_inner))
        .bind(&note.content)
        .bind(note.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id.into_inner())
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(note_not_found(id));
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
        assert_send_sync::<PgNoteRepository>();
    }
}
