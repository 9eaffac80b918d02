//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Channel not found: {0}")]
    ChannelNotFound(Snowflake),

    #[error("Unknown webhook token")]
    UnknownWebhookToken,

    #[error("Contact not found: {0}")]
    ContactNotFound(Snowflake),

    #[error("Conversation not found: {0}")]
    ConversationNotFound(Snowflake),

    #[error("Message not found: {0}")]
    MessageNotFound(Snowflake),

    #[error("Team not found: {0}")]
    TeamNotFound(Snowflake),

    #[error("Agent not found: {0}")]
    AgentNotFound(Snowflake),

    #[error("Macro not found: {0}")]
    MacroNotFound(Snowflake),

    #[error("Note not found: {0}")]
    NoteNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Contact with this phone already exists")]
    PhoneAlreadyExists,

    #[error("Macro shortcut already in use")]
    MacroShortcutExists,

    #[error("Contact has open conversations")]
    ContactHasOpenConversations,

    #[error("No agent available for assignment")]
    NoAgentAvailable,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::ChannelNotFound(_) => "UNKNOWN_CHANNEL",
            Self::UnknownWebhookToken => "UNKNOWN_WEBHOOK_TOKEN",
            Self::ContactNotFound(_) => "UNKNOWN_CONTACT",
            Self::ConversationNotFound(_) => "UNKNOWN_CONVERSATION",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",
            Self::TeamNotFound(_) => "UNKNOWN_TEAM",
            Self::AgentNotFound(_) => "UNKNOWN_AGENT",
            Self::MacroNotFound(_) => "UNKNOWN_MACRO",
            Self::NoteNotFound(_) => "UNKNOWN_NOTE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidPhone(_) => "INVALID_PHONE",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            // Conflict
            Self::PhoneAlreadyExists => "PHONE_ALREADY_EXISTS",
            Self::MacroShortcutExists => "MACRO_SHORTCUT_EXISTS",
            Self::ContactHasOpenConversations => "CONTACT_HAS_OPEN_CONVERSATIONS",
            Self::NoAgentAvailable => "NO_AGENT_AVAILABLE",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ChannelNotFound(_)
                | Self::UnknownWebhookToken
                | Self::ContactNotFound(_)
                | Self::ConversationNotFound(_)
                | Self::MessageNotFound(_)
                | Self::TeamNotFound(_)
                | Self::AgentNotFound(_)
                | Self::MacroNotFound(_)
                | Self::NoteNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidPhone(_) | Self::ContentTooLong { .. }
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::PhoneAlreadyExists
                | Self::MacroShortcutExists
                | Self::ContactHasOpenConversations
                | Self::NoAgentAvailable
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::ChannelNotFound(Snowflake::new(1));
        assert_eq!(err.code(), "UNKNOWN_CHANNEL");

        let err = DomainError::NoAgentAvailable;
        assert_eq!(err.code(), "NO_AGENT_AVAILABLE");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::ContactNotFound(Snowflake::new(1)).is_not_found());
        assert!(DomainError::UnknownWebhookToken.is_not_found());
        assert!(!DomainError::PhoneAlreadyExists.is_not_found());
    }

    #[test]
    fn test_is_conflict() {
        assert!(DomainError::PhoneAlreadyExists.is_conflict());
        assert!(DomainError::MacroShortcutExists.is_conflict());
        assert!(DomainError::NoAgentAvailable.is_conflict());
        assert!(!DomainError::ValidationError("x".to_string()).is_conflict());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::ConversationNotFound(Snowflake::new(123));
        assert_eq!(err.to_string(), "Conversation not found: 123");

        let err = DomainError::ContentTooLong { max: 4096 };
        assert_eq!(err.to_string(), "Content too long: max 4096 characters");
    }
}
