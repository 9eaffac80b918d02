//! Note database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for notes table
#[derive(Debug, Clone, FromRow)]
pub struct NoteModel {
    pub id: i64,
    pub user_id: i64,
    pub conversation_id: i64,
    pub author_agent_id: Option<i64>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
