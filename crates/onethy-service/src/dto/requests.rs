//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; bodies with constraints also
//! implement `Validate` for input validation.

use onethy_cache::AgentPresence;
use onethy_core::{ConversationStatus, Priority};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Channel Requests
// ============================================================================

/// Create channel request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateChannelRequest {
    #[validate(length(min = 1, max = 100, message = "Channel name must be 1-100 characters"))]
    pub name: String,

    /// Provider instance name; derived from the channel name when omitted
    #[validate(length(min = 1, max = 100, message = "Instance name must be 1-100 characters"))]
    pub instance_name: Option<String>,
}

/// Update channel request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateChannelRequest {
    #[validate(length(min = 1, max = 100, message = "Channel name must be 1-100 characters"))]
    pub name: String,
}

// ============================================================================
// Contact Requests
// ============================================================================

/// Create contact request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContactRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 5, max = 20, message = "Phone must be 5-20 characters"))]
    pub phone: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

/// Update contact request (partial)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateContactRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 5, max = 20, message = "Phone must be 5-20 characters"))]
    pub phone: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

// ============================================================================
// Conversation Requests
// ============================================================================

/// Partial conversation update; omitted fields are left unchanged
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateConversationRequest {
    pub status: Option<ConversationStatus>,
    pub priority: Option<Priority>,
}

/// Manual assignment request; at least one target must be present
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AssignConversationRequest {
    /// Agent ID (Snowflake as string)
    pub agent_id: Option<String>,
    /// Team ID (Snowflake as string)
    pub team_id: Option<String>,
}

/// Round-robin auto-assignment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AutoAssignRequest {
    /// Team ID (Snowflake as string)
    #[validate(length(min = 1, message = "team_id is required"))]
    pub team_id: String,
}

// ============================================================================
// Message Requests
// ============================================================================

/// Send message request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 4096, message = "Message must be 1-4096 characters"))]
    pub content: String,
}

// ============================================================================
// Team Requests
// ============================================================================

/// Create team request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, max = 100, message = "Team name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
}

/// Update team request (partial)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTeamRequest {
    #[validate(length(min = 1, max = 100, message = "Team name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
}

/// Team membership request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TeamMemberRequest {
    /// Agent ID (Snowflake as string)
    #[validate(length(min = 1, message = "agent_id is required"))]
    pub agent_id: String,
}

// ============================================================================
// Agent Requests
// ============================================================================

/// Create agent request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAgentRequest {
    #[validate(length(min = 1, max = 100, message = "Agent name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Update agent request (partial)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAgentRequest {
    #[validate(length(min = 1, max = 100, message = "Agent name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// Presence update request
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePresenceRequest {
    pub status: AgentPresence,
}

// ============================================================================
// Macro Requests
// ============================================================================

/// Create macro request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMacroRequest {
    #[validate(length(min = 1, max = 32, message = "Shortcut must be 1-32 characters"))]
    pub shortcut: String,

    #[validate(length(min = 1, max = 4096, message = "Content must be 1-4096 characters"))]
    pub content: String,
}

/// Update macro request (partial)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMacroRequest {
    #[validate(length(min = 1, max = 32, message = "Shortcut must be 1-32 characters"))]
    pub shortcut: Option<String>,

    #[validate(length(min = 1, max = 4096, message = "Content must be 1-4096 characters"))]
    pub content: Option<String>,
}

// ============================================================================
// Note Requests
// ============================================================================

/// Create note request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNoteRequest {
    #[validate(length(min = 1, max = 4096, message = "Content must be 1-4096 characters"))]
    pub content: String,

    /// Authoring agent (Snowflake as string)
    pub author_agent_id: Option<String>,
}
