//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Acknowledgement body returned to the webhook provider
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub success: bool,
}

impl WebhookAck {
    #[must_use]
    pub fn ok() -> Self {
        Self { success: true }
    }
}

// ============================================================================
// Channel Responses
// ============================================================================

/// Channel response
#[derive(Debug, Clone, Serialize)]
pub struct ChannelResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub channel_type: String,
    pub status: String,
    pub instance_name: String,
    pub webhook_token: String,
    pub message_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_activity_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Pairing data returned by a connect call
#[derive(Debug, Clone, Serialize)]
pub struct QrCodeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
}

// ============================================================================
// Contact Responses
// ============================================================================

/// Contact response
#[derive(Debug, Clone, Serialize)]
pub struct ContactResponse {
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Conversation Responses
// ============================================================================

/// Conversation response
#[derive(Debug, Clone, Serialize)]
pub struct ConversationResponse {
    pub id: String,
    pub contact_id: String,
    pub channel_id: String,
    pub status: String,
    pub priority: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_agent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_team_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
    pub last_activity_at: DateTime<Utc>,
    pub unread_count: i32,
    pub labels: Vec<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Message Responses
// ============================================================================

/// Message response
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub conversation_id: String,
    pub from_me: bool,
    pub content: String,
    #[serde(rename = "type")]
    pub message_type: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Result of a mark-read call
#[derive(Debug, Clone, Serialize)]
pub struct MarkReadResponse {
    /// Messages transitioned to read by this call
    pub updated: u64,
}

// ============================================================================
// Team / Agent Responses
// ============================================================================

/// Team response
#[derive(Debug, Clone, Serialize)]
pub struct TeamResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub member_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Agent response with volatile presence attached
#[derive(Debug, Clone, Serialize)]
pub struct AgentResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub presence: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Macro / Note Responses
// ============================================================================

/// Macro response
#[derive(Debug, Clone, Serialize)]
pub struct MacroResponse {
    pub id: String,
    pub shortcut: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Note response
#[derive(Debug, Clone, Serialize)]
pub struct NoteResponse {
    pub id: String,
    pub conversation_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_agent_id: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    #[must_use]
    pub fn healthy() -> Self {
        Self { status: "ok" }
    }
}

/// Readiness response with dependency health
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub database: bool,
    pub cache: bool,
}

impl ReadinessResponse {
    #[must_use]
    pub fn ready(database: bool, cache: bool) -> Self {
        Self {
            ready: database && cache,
            database,
            cache,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_ack() {
        let ack = WebhookAck::ok();
        assert!(ack.success);
        assert_eq!(serde_json::to_string(&ack).unwrap(), r#"{"success":true}"#);
    }

    #[test]
    fn test_readiness_requires_both() {
        assert!(ReadinessResponse::ready(true, true).ready);
        assert!(!ReadinessResponse::ready(true, false).ready);
        assert!(!ReadinessResponse::ready(false, true).ready);
    }
}
