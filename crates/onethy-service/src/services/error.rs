//! Service layer error type
//!
//! One error enum for every service operation; handlers map it onto HTTP via
//! `status_code`/`error_code`.

use onethy_common::AppError;
use onethy_core::DomainError;
use thiserror::Error;

/// Service layer error type
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Domain rule violation
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Application error (auth, validation, etc.)
    #[error(transparent)]
    App(#[from] AppError),

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    /// Duplicate resource or state-dependent rejection
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Upstream WhatsApp gateway failure
    #[error("Gateway error: {0}")]
    Provider(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create an upstream gateway error
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_validation() {
                    400
                } else if e.is_conflict() {
                    409
                } else {
                    500
                }
            }
            Self::App(e) => e.status_code(),
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Provider(_) | Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Provider(_) => "GATEWAY_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<onethy_provider::ProviderError> for ServiceError {
    fn from(err: onethy_provider::ProviderError) -> Self {
        Self::Provider(err.to_string())
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::NotFound { resource, id } => {
                AppError::NotFound(format!("{resource} {id}"))
            }
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Conflict(msg) => AppError::Conflict(msg),
            ServiceError::Provider(msg) => AppError::Provider(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_shape() {
        let err = ServiceError::not_found("Conversation", "123");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert_eq!(err.to_string(), "Conversation not found: 123");
    }

    #[test]
    fn test_provider_is_server_error() {
        let err = ServiceError::provider("connection refused");
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "GATEWAY_ERROR");
    }

    #[test]
    fn test_domain_codes_pass_through() {
        let err = ServiceError::from(DomainError::NoAgentAvailable);
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "NO_AGENT_AVAILABLE");

        let err = ServiceError::from(DomainError::UnknownWebhookToken);
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_app_error_conversion_keeps_status() {
        let app_err: AppError = ServiceError::not_found("Team", "456").into();
        assert_eq!(app_err.status_code(), 404);
    }
}
