//! Macro entity - a canned reply with a per-tenant unique shortcut

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Macro entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Macro {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub shortcut: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Macro {
    /// Create a new Macro
    pub fn new(id: Snowflake, user_id: Snowflake, shortcut: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            shortcut,
            content,
            created_at: now,
            updated_at: now,
        }
    }
}
