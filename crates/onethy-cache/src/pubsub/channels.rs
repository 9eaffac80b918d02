//! Pub/Sub channel definitions.
//!
//! Naming conventions for the Redis channels the dashboard delivery tier
//! subscribes to.

use onethy_core::Snowflake;

/// Channel prefix for tenant-wide inbox events
pub const TENANT_CHANNEL_PREFIX: &str = "tenant:";
/// Channel prefix for conversation-scoped events
pub const CONVERSATION_CHANNEL_PREFIX: &str = "conversation:";

/// Pub/Sub channel types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PubSubChannel {
    /// Events for every dashboard session of one tenant
    Tenant(Snowflake),
    /// Events for viewers of a specific conversation
    Conversation(Snowflake),
    /// Custom channel name
    Custom(String),
}

impl PubSubChannel {
    /// Create a tenant channel
    #[must_use]
    pub fn tenant(user_id: Snowflake) -> Self {
        Self::Tenant(user_id)
    }

    /// Create a conversation channel
    #[must_use]
    pub fn conversation(conversation_id: Snowflake) -> Self {
        Self::Conversation(conversation_id)
    }

    /// Create a custom channel
    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// Redis channel name
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Tenant(id) => format!("{TENANT_CHANNEL_PREFIX}{id}"),
            Self::Conversation(id) => format!("{CONVERSATION_CHANNEL_PREFIX}{id}"),
            Self::Custom(name) => name.clone(),
        }
    }
}

impl std::fmt::Display for PubSubChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_names() {
        assert_eq!(PubSubChannel::tenant(Snowflake::new(1)).name(), "tenant:1");
        assert_eq!(
            PubSubChannel::conversation(Snowflake::new(2)).name(),
            "conversation:2"
        );
        assert_eq!(PubSubChannel::custom("broadcast").name(), "broadcast");
    }
}
