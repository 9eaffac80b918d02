//! Channel entity - a tenant-owned messaging endpoint (WhatsApp instance)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Channel type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChannelType {
    /// WhatsApp endpoint via the gateway provider
    #[default]
    Whatsapp,
}

impl ChannelType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Whatsapp => "whatsapp",
        }
    }
}

impl From<&str> for ChannelType {
    fn from(_value: &str) -> Self {
        Self::Whatsapp
    }
}

/// Connection status of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChannelStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Error,
}

impl ChannelStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for ChannelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ChannelStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disconnected" => Ok(Self::Disconnected),
            "connecting" => Ok(Self::Connecting),
            "connected" => Ok(Self::Connected),
            "error" => Ok(Self::Error),
            other => Err(format!("invalid channel status: {other}")),
        }
    }
}

/// Channel entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub name: String,
    pub channel_type: ChannelType,
    pub status: ChannelStatus,
    /// Provider-assigned instance name
    pub instance_name: String,
    /// Opaque token routing webhook deliveries to this channel
    pub webhook_token: String,
    pub message_count: i64,
    pub last_activity_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Channel {
    /// Create a new disconnected channel
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        name: String,
        instance_name: String,
        webhook_token: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            name,
            channel_type: ChannelType::Whatsapp,
            status: ChannelStatus::Disconnected,
            instance_name,
            webhook_token,
            message_count: 0,
            last_activity_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the channel is connected
    #[inline]
    pub fn is_connected(&self) -> bool {
        self.status == ChannelStatus::Connected
    }

    /// Apply a status change with an activity refresh
    pub fn set_status(&mut self, status: ChannelStatus) {
        self.status = status;
        self.last_activity_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Record one exchanged message against this channel
    pub fn record_message(&mut self) {
        self.message_count += 1;
        self.last_activity_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }
}

/// Generate an opaque webhook routing token
pub fn generate_webhook_token() -> String {
    use rand::Rng;

    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const TOKEN_LEN: usize = 32;

    let mut rng = rand::thread_rng();
    (0..TOKEN_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel() -> Channel {
        Channel::new(
            Snowflake::new(1),
            Snowflake::new(10),
            "Support".to_string(),
            "support-main".to_string(),
            generate_webhook_token(),
        )
    }

    #[test]
    fn test_new_channel_is_disconnected() {
        let ch = channel();
        assert_eq!(ch.status, ChannelStatus::Disconnected);
        assert_eq!(ch.message_count, 0);
        assert!(ch.last_activity_at.is_none());
    }

    #[test]
    fn test_set_status_refreshes_activity() {
        let mut ch = channel();
        ch.set_status(ChannelStatus::Connected);
        assert!(ch.is_connected());
        assert!(ch.last_activity_at.is_some());
    }

    #[test]
    fn test_record_message_increments_counter() {
        let mut ch = channel();
        ch.record_message();
        ch.record_message();
        assert_eq!(ch.message_count, 2);
        assert!(ch.last_activity_at.is_some());
    }

    #[test]
    fn test_status_parse_roundtrip() {
        for status in [
            ChannelStatus::Disconnected,
            ChannelStatus::Connecting,
            ChannelStatus::Connected,
            ChannelStatus::Error,
        ] {
            assert_eq!(status.as_str().parse::<ChannelStatus>().unwrap(), status);
        }
        assert!("open".parse::<ChannelStatus>().is_err());
    }

    #[test]
    fn test_generate_webhook_token() {
        let a = generate_webhook_token();
        let b = generate_webhook_token();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }
}
