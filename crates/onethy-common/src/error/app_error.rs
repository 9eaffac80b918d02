//! Application error type
//!
//! The top of the error ladder: domain and service errors funnel into
//! `AppError` before they are shaped into HTTP responses.

use onethy_core::DomainError;
use serde::Serialize;
use std::fmt;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Missing authentication")]
    MissingAuth,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Gateway error: {0}")]
    Provider(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// HTTP status and stable error code, decided together
    fn meta(&self) -> (u16, &'static str) {
        match self {
            Self::InvalidToken => (401, "INVALID_TOKEN"),
            Self::TokenExpired => (401, "TOKEN_EXPIRED"),
            Self::MissingAuth => (401, "MISSING_AUTH"),
            Self::Validation(_) => (400, "VALIDATION_ERROR"),
            Self::InvalidInput(_) => (400, "INVALID_INPUT"),
            Self::NotFound(_) => (404, "NOT_FOUND"),
            Self::Conflict(_) => (409, "CONFLICT"),
            Self::RateLimitExceeded => (429, "RATE_LIMIT_EXCEEDED"),
            Self::Database(_) => (500, "DATABASE_ERROR"),
            Self::Cache(_) => (500, "CACHE_ERROR"),
            Self::Provider(_) => (500, "GATEWAY_ERROR"),
            Self::Internal(_) => (500, "INTERNAL_ERROR"),
            Self::Config(_) => (500, "CONFIG_ERROR"),
            Self::Domain(e) => {
                let status = if e.is_not_found() {
                    404
                } else if e.is_validation() {
                    400
                } else if e.is_conflict() {
                    409
                } else {
                    500
                };
                (status, e.code())
            }
        }
    }

    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.meta().0
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        self.meta().1
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Create a not found error for a resource type
    #[must_use]
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::NotFound(resource.to_string())
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Error body shape shared across API responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.error_code().to_string(),
            message: err.to_string(),
            details: None,
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_code_agree() {
        assert_eq!(AppError::InvalidToken.status_code(), 401);
        assert_eq!(AppError::InvalidToken.error_code(), "INVALID_TOKEN");
        assert_eq!(AppError::RateLimitExceeded.status_code(), 429);
        assert_eq!(AppError::Provider("timeout".into()).status_code(), 500);
        assert_eq!(AppError::Provider("timeout".into()).error_code(), "GATEWAY_ERROR");
    }

    #[test]
    fn test_domain_errors_keep_their_codes() {
        let err = AppError::Domain(DomainError::UnknownWebhookToken);
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "UNKNOWN_WEBHOOK_TOKEN");

        let err = AppError::Domain(DomainError::NoAgentAvailable);
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "NO_AGENT_AVAILABLE");
    }

    #[test]
    fn test_client_server_split() {
        assert!(AppError::not_found("contact").is_client_error());
        assert!(!AppError::not_found("contact").is_server_error());
        assert!(AppError::Database("down".into()).is_server_error());
    }

    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse::from(AppError::not_found("contact"));
        assert_eq!(response.code, "NOT_FOUND");
        assert_eq!(response.message, "Resource not found: contact");
        assert!(response.details.is_none());
    }
}
