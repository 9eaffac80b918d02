//! Agent entity - a human operator working a tenant's inbox

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Agent entity
///
/// Presence (online/away/offline) is volatile and lives in the cache tier,
/// not on this record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Agent {
    /// Create a new Agent
    pub fn new(id: Snowflake, user_id: Snowflake, name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            name,
            email,
            created_at: now,
            updated_at: now,
        }
    }
}
