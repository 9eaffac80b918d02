//! Error handling utilities for repositories

use onethy_core::{DomainError, Snowflake};
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create a "channel not found" error
pub fn channel_not_found(id: Snowflake) -> DomainError {
    DomainError::ChannelNotFound(id)
}

/// Create a "contact not found" error
pub fn contact_not_found(id: Snowflake) -> DomainError {
    DomainError::ContactNotFound(id)
}

/// Create a "conversation not found" error
pub fn conversation_not_found(id: Snowflake) -> DomainError {
    DomainError::ConversationNotFound(id)
}

/// Create a "team not found" error
pub fn team_not_found(id: Snowflake) -> DomainError {
    DomainError::TeamNotFound(id)
}

/// Create an "agent not found" error
pub fn agent_not_found(id: Snowflake) -> DomainError {
    DomainError::AgentNotFound(id)
}

/// Create a "macro not found" error
pub fn macro_not_found(id: Snowflake) -> DomainError {
    DomainError::MacroNotFound(id)
}

/// Create a "note not found" error
pub fn note_not_found(id: Snowflake) -> DomainError {
    DomainError::NoteNotFound(id)
}
