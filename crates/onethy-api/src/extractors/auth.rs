//! Bearer-token authentication extractor
//!
//! The subject of a valid token is the tenant's user id; every handler
//! scopes its queries to it. Token issuance lives with the identity
//! collaborator, so this side only validates.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use onethy_core::Snowflake;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated tenant extracted from the bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Tenant user ID from the JWT token
    pub user_id: Snowflake,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(user_id: Snowflake) -> Self {
        Self { user_id }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);
        let user_id = app_state
            .jwt_service()
            .validate_access_token(bearer.token())
            .and_then(|claims| claims.user_id())
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected bearer token");
                ApiError::InvalidAuthFormat
            })?;

        Ok(AuthUser::new(user_id))
    }
}
