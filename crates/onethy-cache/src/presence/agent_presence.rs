//! Agent presence storage in Redis.
//!
//! Presence is volatile: entries carry a TTL and expire to offline when an
//! agent's client stops heartbeating. Auto-assign only considers agents whose
//! presence reads `online`.

use crate::pool::{RedisPool, RedisResult};
use onethy_core::Snowflake;
use serde::{Deserialize, Serialize};

/// Key prefix for agent presence
const PRESENCE_PREFIX: &str = "presence:agent:";

/// Presence TTL (5 minutes - refreshed by heartbeat)
const PRESENCE_TTL: u64 = 300;

/// Agent availability status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AgentPresence {
    /// Working the inbox, eligible for auto-assign
    Online,
    /// Signed in but stepped away
    Away,
    #[default]
    Offline,
}

impl AgentPresence {
    /// Only online agents receive auto-assigned conversations
    #[must_use]
    pub fn is_assignable(&self) -> bool {
        matches!(self, Self::Online)
    }
}

impl std::fmt::Display for AgentPresence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => write!(f, "online"),
            Self::Away => write!(f, "away"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

impl std::str::FromStr for AgentPresence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "online" => Ok(Self::Online),
            "away" => Ok(Self::Away),
            "offline" => Ok(Self::Offline),
            _ => Err(format!("Invalid presence: {s}")),
        }
    }
}

/// Stored presence record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceData {
    pub agent_id: Snowflake,
    pub status: AgentPresence,
    /// Last update timestamp
    pub updated_at: i64,
}

impl PresenceData {
    /// Create new presence data
    #[must_use]
    pub fn new(agent_id: Snowflake, status: AgentPresence) -> Self {
        Self {
            agent_id,
            status,
            updated_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Update timestamp
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().timestamp();
    }
}

/// Agent presence store
#[derive(Clone)]
pub struct AgentPresenceStore {
    pool: RedisPool,
}

impl AgentPresenceStore {
    /// Create a new presence store
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    fn presence_key(agent_id: Snowflake) -> String {
        format!("{PRESENCE_PREFIX}{agent_id}")
    }

    /// Set an agent's presence
    pub async fn set_presence(&self, agent_id: Snowflake, status: AgentPresence) -> RedisResult<()> {
        let key = Self::presence_key(agent_id);
        let mut data = PresenceData::new(agent_id, status);
        data.touch();
        self.pool.set(&key, &data, Some(PRESENCE_TTL)).await?;

        tracing::debug!(agent_id = %agent_id, status = %status, "Set agent presence");
        Ok(())
    }

    /// Get an agent's presence; a missing entry reads as offline
    pub async fn get_presence(&self, agent_id: Snowflake) -> RedisResult<AgentPresence> {
        let key = Self::presence_key(agent_id);
        let data: Option<PresenceData> = self.pool.get_value(&key).await?;
        Ok(data.map(|d| d.status).unwrap_or_default())
    }

    /// Remove an agent's presence (reads as offline afterwards)
    pub async fn clear_presence(&self, agent_id: Snowflake) -> RedisResult<bool> {
        self.pool.delete(&Self::presence_key(agent_id)).await
    }

    /// Filter the given agents down to those currently online.
    ///
    /// Preserves input order, which doubles as the assignment tie-break order.
    pub async fn filter_online(&self, agent_ids: &[Snowflake]) -> RedisResult<Vec<Snowflake>> {
        let mut online = Vec::new();
        for &agent_id in agent_ids {
            if self.get_presence(agent_id).await?.is_assignable() {
                online.push(agent_id);
            }
        }
        Ok(online)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_display() {
        assert_eq!(AgentPresence::Online.to_string(), "online");
        assert_eq!(AgentPresence::Away.to_string(), "away");
        assert_eq!(AgentPresence::Offline.to_string(), "offline");
    }

    #[test]
    fn test_presence_parse() {
        assert_eq!("online".parse::<AgentPresence>().unwrap(), AgentPresence::Online);
        assert_eq!("AWAY".parse::<AgentPresence>().unwrap(), AgentPresence::Away);
        assert!("busy".parse::<AgentPresence>().is_err());
    }

    #[test]
    fn test_only_online_is_assignable() {
        assert!(AgentPresence::Online.is_assignable());
        assert!(!AgentPresence::Away.is_assignable());
        assert!(!AgentPresence::Offline.is_assignable());
    }

    #[test]
    fn test_presence_key_format() {
        let key = AgentPresenceStore::presence_key(Snowflake::new(42));
        assert_eq!(key, "presence:agent:42");
    }
}
