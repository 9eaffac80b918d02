//! Message database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for messages table
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub conversation_id: i64,
    pub from_me: bool,
    pub content: String,
    pub message_type: String,
    pub status: String,
    pub external_id: Option<String>,
    pub push_name: Option<String>,
    pub provider_timestamp: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl MessageModel {
    /// Check if this is an inbound message still unread by an agent
    #[inline]
    pub fn is_unread_inbound(&self) -> bool {
        !self.from_me && self.status != "read"
    }
}
