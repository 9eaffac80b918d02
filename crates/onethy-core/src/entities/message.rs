//! Message entity - an immutable record of one exchanged message

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Message content type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    Text,
    Image,
    Video,
    Audio,
    Document,
    Unknown,
}

impl MessageType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Document => "document",
            Self::Unknown => "unknown",
        }
    }
}

impl std::str::FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            "audio" => Ok(Self::Audio),
            "document" => Ok(Self::Document),
            "unknown" => Ok(Self::Unknown),
            other => Err(format!("invalid message type: {other}")),
        }
    }
}

/// Delivery status; transitions are monotonic: sent -> delivered -> read
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    Delivered,
    Read,
}

impl DeliveryStatus {
    /// A transition is valid only when it moves forward
    #[must_use]
    pub fn can_advance_to(self, next: DeliveryStatus) -> bool {
        next > self
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Read => "read",
        }
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DeliveryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sent" => Ok(Self::Sent),
            "delivered" => Ok(Self::Delivered),
            "read" => Ok(Self::Read),
            other => Err(format!("invalid delivery status: {other}")),
        }
    }
}

/// Message entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub conversation_id: Snowflake,
    pub from_me: bool,
    pub content: String,
    pub message_type: MessageType,
    pub status: DeliveryStatus,
    /// Provider-side message id
    pub external_id: Option<String>,
    /// Sender push-name from the provider payload
    pub push_name: Option<String>,
    /// Provider-side Unix timestamp
    pub provider_timestamp: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create an inbound message; arrives already delivered to this side
    pub fn inbound(
        id: Snowflake,
        conversation_id: Snowflake,
        content: String,
        message_type: MessageType,
    ) -> Self {
        Self {
            id,
            conversation_id,
            from_me: false,
            content,
            message_type,
            status: DeliveryStatus::Delivered,
            external_id: None,
            push_name: None,
            provider_timestamp: None,
            created_at: Utc::now(),
        }
    }

    /// Create an outbound message in the sent state
    pub fn outbound(id: Snowflake, conversation_id: Snowflake, content: String) -> Self {
        Self {
            id,
            conversation_id,
            from_me: true,
            content,
            message_type: MessageType::Text,
            status: DeliveryStatus::Sent,
            external_id: None,
            push_name: None,
            provider_timestamp: None,
            created_at: Utc::now(),
        }
    }

    /// Attach provider metadata
    #[must_use]
    pub fn with_provider_meta(
        mut self,
        external_id: Option<String>,
        push_name: Option<String>,
        provider_timestamp: Option<i64>,
    ) -> Self {
        self.external_id = external_id;
        self.push_name = push_name;
        self.provider_timestamp = provider_timestamp;
        self
    }

    /// Advance delivery status; reverse transitions are rejected
    pub fn advance_status(&mut self, next: DeliveryStatus) -> bool {
        if self.status.can_advance_to(next) {
            self.status = next;
            true
        } else {
            false
        }
    }
}
