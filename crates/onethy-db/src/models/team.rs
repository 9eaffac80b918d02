//! Team and membership database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for teams table
#[derive(Debug, Clone, FromRow)]
pub struct TeamModel {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for team_members table
#[derive(Debug, Clone, FromRow)]
pub struct TeamMemberModel {
    pub team_id: i64,
    pub agent_id: i64,
    pub joined_at: DateTime<Utc>,
}
