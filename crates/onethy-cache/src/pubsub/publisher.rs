//! Redis Pub/Sub publisher.
//!
//! Pushes inbox events to Redis channels; the dashboard delivery tier
//! subscribes on the other side. Publishing is best-effort everywhere it is
//! called.

use crate::pool::{RedisPool, RedisResult};
use crate::pubsub::PubSubChannel;
use serde::{Deserialize, Serialize};

/// Event wrapper for Pub/Sub messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubSubEvent {
    /// Event type name (e.g., "MESSAGE_CREATE", "CONVERSATION_UPDATE")
    pub event_type: String,
    /// Event payload
    pub data: serde_json::Value,
}

impl PubSubEvent {
    /// Create a new event
    #[must_use]
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }
}

/// Pub/Sub publisher
#[derive(Clone)]
pub struct Publisher {
    pool: RedisPool,
}

impl Publisher {
    /// Create a new publisher
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Publish an event to a channel
    pub async fn publish(&self, channel: &PubSubChannel, event: &PubSubEvent) -> RedisResult<()> {
        let payload = serde_json::to_string(event)?;
        self.pool.publish(&channel.name(), &payload).await?;

        tracing::debug!(
            channel = %channel,
            event_type = %event.event_type,
            "Published event"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_serialization() {
        let event = PubSubEvent::new("MESSAGE_CREATE", json!({"id": "1"}));
        let raw = serde_json::to_string(&event).unwrap();
        let parsed: PubSubEvent = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.event_type, "MESSAGE_CREATE");
        assert_eq!(parsed.data["id"], "1");
    }
}
