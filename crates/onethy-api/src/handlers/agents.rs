//! Agent handlers
//!
//! Agent CRUD and presence updates.

use axum::{
    extract::{Path, State},
    Json,
};
use onethy_service::{
    AgentResponse, AgentService, CreateAgentRequest, UpdateAgentRequest, UpdatePresenceRequest,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

use super::parse_id;

/// List agents
///
/// GET /agents
pub async fn list_agents(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<AgentResponse>>> {
    let service = AgentService::new(state.service_context());
    let agents = service.list(auth.user_id).await?;
    Ok(Json(agents))
}

/// Create agent
///
/// POST /agents
pub async fn create_agent(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateAgentRequest>,
) -> ApiResult<Created<Json<AgentResponse>>> {
    let service = AgentService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Get agent by ID
///
/// GET /agents/{agent_id}
pub async fn get_agent(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(agent_id): Path<String>,
) -> ApiResult<Json<AgentResponse>> {
    let agent_id = parse_id(&agent_id, "agent_id")?;

    let service = AgentService::new(state.service_context());
    let response = service.get(agent_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Update agent
///
/// PATCH /agents/{agent_id}
pub async fn update_agent(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(agent_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateAgentRequest>,
) -> ApiResult<Json<AgentResponse>> {
    let agent_id = parse_id(&agent_id, "agent_id")?;

    let service = AgentService::new(state.service_context());
    let response = service.update(agent_id, auth.user_id, request).await?;
    Ok(Json(response))
}

/// Delete agent
///
/// DELETE /agents/{agent_id}
pub async fn delete_agent(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(agent_id): Path<String>,
) -> ApiResult<NoContent> {
    let agent_id = parse_id(&agent_id, "agent_id")?;

    let service = AgentService::new(state.service_context());
    service.delete(agent_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Set agent presence
///
/// PUT /agents/{agent_id}/presence
pub async fn update_presence(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(agent_id): Path<String>,
    Json(request): Json<UpdatePresenceRequest>,
) -> ApiResult<Json<AgentResponse>> {
    let agent_id = parse_id(&agent_id, "agent_id")?;

    let service = AgentService::new(state.service_context());
    let response = service
        .set_presence(agent_id, auth.user_id, request.status)
        .await?;
    Ok(Json(response))
}
