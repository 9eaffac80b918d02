//! Test fixtures and data generators
//!
//! Reusable request/response shapes and webhook payload builders for the
//! integration tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use onethy_core::{Snowflake, SnowflakeGenerator};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Process-wide id generator for seeded rows
static GENERATOR: OnceLock<SnowflakeGenerator> = OnceLock::new();

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Generate a fresh Snowflake for seeded rows and tenant ids
pub fn test_id() -> Snowflake {
    GENERATOR
        .get_or_init(|| SnowflakeGenerator::new(1023))
        .generate()
}

/// Unique phone number for a test contact
pub fn unique_phone() -> String {
    format!("55119{:08}", unique_suffix())
}

// ============================================================================
// Webhook payload builders
// ============================================================================

/// A `messages.upsert` delivery for an inbound text
pub fn messages_upsert(phone: &str, push_name: &str, text: &str) -> Value {
    json!({
        "event": "messages.upsert",
        "data": {
            "messages": [{
                "key": {
                    "fromMe": false,
                    "remoteJid": format!("{phone}@s.whatsapp.net"),
                    "id": format!("WAMID{}", unique_suffix())
                },
                "message": {"conversation": text},
                "pushName": push_name
            }]
        }
    })
}

/// A self-echo of an outbound send coming back through the webhook
pub fn messages_upsert_from_me(phone: &str, text: &str) -> Value {
    json!({
        "event": "messages.upsert",
        "data": {
            "messages": [{
                "key": {
                    "fromMe": true,
                    "remoteJid": format!("{phone}@s.whatsapp.net"),
                    "id": format!("WAMID{}", unique_suffix())
                },
                "message": {"conversation": text}
            }]
        }
    })
}

/// A `connection.update` delivery with the given gateway state
pub fn connection_update(state: &str) -> Value {
    json!({
        "event": "connection.update",
        "data": {"connection": {"state": state}}
    })
}

// ============================================================================
// Request fixtures
// ============================================================================

/// Create contact request
#[derive(Debug, Serialize)]
pub struct CreateContactRequest {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub notes: Option<String>,
}

impl CreateContactRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Test Contact {suffix}"),
            phone: unique_phone(),
            email: Some(format!("contact{suffix}@example.com")),
            notes: None,
        }
    }
}

/// Create team request
#[derive(Debug, Serialize)]
pub struct CreateTeamRequest {
    pub name: String,
    pub description: Option<String>,
}

impl CreateTeamRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Test Team {suffix}"),
            description: Some("A test team".to_string()),
        }
    }
}

/// Create agent request
#[derive(Debug, Serialize)]
pub struct CreateAgentRequest {
    pub name: String,
    pub email: String,
}

impl CreateAgentRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Test Agent {suffix}"),
            email: format!("agent{suffix}@example.com"),
        }
    }
}

/// Create macro request
#[derive(Debug, Serialize)]
pub struct CreateMacroRequest {
    pub shortcut: String,
    pub content: String,
}

impl CreateMacroRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            shortcut: format!("greet{suffix}"),
            content: "Hello! How can we help you today?".to_string(),
        }
    }
}

// ============================================================================
// Response fixtures
// ============================================================================

/// Contact response
#[derive(Debug, Deserialize)]
pub struct ContactResponse {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub notes: Option<String>,
}

/// Conversation response
#[derive(Debug, Deserialize)]
pub struct ConversationResponse {
    pub id: String,
    pub contact_id: String,
    pub channel_id: String,
    pub status: String,
    pub priority: String,
    pub assigned_agent_id: Option<String>,
    pub assigned_team_id: Option<String>,
    pub last_message: Option<String>,
    pub unread_count: i32,
}

/// Message response
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub conversation_id: String,
    pub from_me: bool,
    pub content: String,
    #[serde(rename = "type")]
    pub message_type: String,
    pub status: String,
    pub push_name: Option<String>,
}

/// Result of a mark-read call
#[derive(Debug, Deserialize)]
pub struct MarkReadResponse {
    pub updated: u64,
}

/// Channel response
#[derive(Debug, Deserialize)]
pub struct ChannelResponse {
    pub id: String,
    pub name: String,
    pub status: String,
    pub message_count: i64,
}

/// Team response
#[derive(Debug, Deserialize)]
pub struct TeamResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub member_ids: Vec<String>,
}

/// Agent response
#[derive(Debug, Deserialize)]
pub struct AgentResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub presence: String,
}

/// Macro response
#[derive(Debug, Deserialize)]
pub struct MacroResponse {
    pub id: String,
    pub shortcut: String,
    pub content: String,
}

/// Webhook acknowledgement
#[derive(Debug, Deserialize)]
pub struct WebhookAck {
    pub success: bool,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
