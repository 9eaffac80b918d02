//! Request handlers

pub mod agents;
pub mod channels;
pub mod contacts;
pub mod conversations;
pub mod health;
pub mod macros;
pub mod messages;
pub mod notes;
pub mod teams;
pub mod webhook;

use onethy_core::Snowflake;

use crate::response::ApiError;

/// Parse a Snowflake from a path segment
pub(crate) fn parse_id(raw: &str, what: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {what} format")))
}
