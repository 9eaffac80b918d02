//! Conversation database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for conversations table
#[derive(Debug, Clone, FromRow)]
pub struct ConversationModel {
    pub id: i64,
    pub user_id: i64,
    pub contact_id: i64,
    pub channel_id: i64,
    pub status: String,
    pub priority: String,
    pub assigned_agent_id: Option<i64>,
    pub assigned_team_id: Option<i64>,
    pub last_message: Option<String>,
    pub last_activity_at: DateTime<Utc>,
    pub unread_count: i32,
    pub labels: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConversationModel {
    /// Check if the conversation counts toward an agent's active load
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status != "closed"
    }
}
