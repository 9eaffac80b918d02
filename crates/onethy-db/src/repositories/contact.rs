//! PostgreSQL implementation of ContactRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use onethy_core::{Contact, ContactRepository, DomainError, RepoResult, Snowflake};

use crate::models::ContactModel;

use super::error::{contact_not_found, map_db_error, map_unique_violation};

/// PostgreSQL implementation of ContactRepository
#[derive(Clone)]
pub struct PgContactRepository {
    pool: PgPool,
}

impl PgContactRepository {
    /// Create a new PgContactRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for PgContactRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Contact>> {
        let result = sqlx::query_as::<_, ContactModel>(
            r#"
            SELECT id, user_id, name, phone, email, notes, created_at, updated_at
            FROM contacts
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Contact::from))
    }

    #[instrument(skip(self, phone))]
    async fn find_by_phone(&self, user_id: Snowflake, phone: &str) -> RepoResult<Option<Contact>> {
        let result = sqlx::query_as::<_, ContactModel>(
            r#"
            SELECT id, user_id, name, phone, email, notes, created_at, updated_at
            FROM contacts
            WHERE user_id = $1 AND phone = $2
            "#,
        )
        .bind(user_id.into_inner())
        .bind(phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Contact::from))
    }

    #[instrument(skip(self, search))]
    async fn find_by_user(
        &self,
        user_id: Snowflake,
        search: Option<&str>,
    ) -> RepoResult<Vec<Contact>> {
        let pattern = search.map(|s| format!("%{s}%"));

        let results = sqlx::query_as::<_, ContactModel>(
            r#"
            SELECT id, user_id, name, phone, email, notes, created_at, updated_at
            FROM contacts
            WHERE user_id = $1
              AND ($2::text IS NULL OR name ILIKE $2 OR phone LIKE $2)
            ORDER BY name
            "#,
        )
        .bind(user_id.into_inner())
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Contact::from).collect())
    }

    #[instrument(skip(self, contact))]
    async fn create(&self, contact: &Contact) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO contacts (id, user_id, name, phone, email, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(contact.id.into_inner())
        .bind(contact.user_id.into_inner())
        .bind(&contact.name)
        .bind(&contact.phone)
        .bind(&contact.email)
        .bind(&contact.notes)
        .bind(contact.created_at)
        .bind(contact.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::PhoneAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self, contact))]
    async fn update(&self, contact: &Contact) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE contacts
            SET name = $3, phone = $4, email = $5, notes = $6, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(contact.id.into_inner())
        .bind(contact.user_id.into_inner())
        .bind(&contact.name)
        .bind(&contact.phone)
        .bind(&contact.email)
        .bind(&contact.notes)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::PhoneAlreadyExists))?;

        if result.rows_affected() == 0 {
            return Err(contact_not_found(contact.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1 AND user_id = $2")
            .bind(id.into_inner())
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(contact_not_found(id));
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
        assert_send_sync::<PgContactRepository>();
    }
}
