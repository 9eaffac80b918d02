//! Team entity - an agent grouping used for conversation assignment

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Team entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    /// Create a new Team
    pub fn new(id: Snowflake, user_id: Snowflake, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            name,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Team membership record.
///
/// Join order doubles as the auto-assign tie-break order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    pub team_id: Snowflake,
    pub agent_id: Snowflake,
    pub joined_at: DateTime<Utc>,
}

impl TeamMember {
    pub fn new(team_id: Snowflake, agent_id: Snowflake) -> Self {
        Self {
            team_id,
            agent_id,
            joined_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_creation() {
        let team = Team::new(Snowflake::new(1), Snowflake::new(10), "Tier 1".to_string());
        assert_eq!(team.name, "Tier 1");
        assert!(team.description.is_none());
    }
}
