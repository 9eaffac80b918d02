//! Macro database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for macros table
#[derive(Debug, Clone, FromRow)]
pub struct MacroModel {
    pub id: i64,
    pub user_id: i64,
    pub shortcut: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
