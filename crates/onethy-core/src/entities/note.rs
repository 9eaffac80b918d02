//! Note entity - an internal annotation on a conversation

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Note entity; never shown to the contact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub conversation_id: Snowflake,
    pub author_agent_id: Option<Snowflake>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Create a new Note
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        conversation_id: Snowflake,
        content: String,
    ) -> Self {
        Self {
            id,
            user_id,
            conversation_id,
            author_agent_id: None,
            content,
            created_at: Utc::now(),
        }
    }
}
