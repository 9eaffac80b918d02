//! Contact database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for contacts table
#[derive(Debug, Clone, FromRow)]
pub struct ContactModel {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
