//! Health probes
//!
//! Liveness answers unconditionally; readiness pings PostgreSQL and Redis.

use axum::{extract::State, http::StatusCode, Json};
use onethy_service::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// Liveness probe
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness probe with dependency health
///
/// GET /health/ready
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let ctx = state.service_context();

    let database = ctx.pool().acquire().await.is_ok();
    let cache = ctx.redis_pool().health_check().await.is_ok();

    let response = ReadinessResponse::ready(database, cache);
    let status = if response.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
