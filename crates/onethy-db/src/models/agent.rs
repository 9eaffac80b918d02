//! Agent database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for agents table
#[derive(Debug, Clone, FromRow)]
pub struct AgentModel {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
