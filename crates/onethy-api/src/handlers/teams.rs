//! Team handlers
//!
//! Team CRUD and membership management.

use axum::{
    extract::{Path, State},
    Json,
};
use onethy_service::{CreateTeamRequest, TeamMemberRequest, TeamResponse, TeamService, UpdateTeamRequest};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

use super::parse_id;

/// List teams
///
/// GET /teams
pub async fn list_teams(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<TeamResponse>>> {
    let service = TeamService::new(state.service_context());
    let teams = service.list(auth.user_id).await?;
    Ok(Json(teams))
}

/// Create team
///
/// POST /teams
pub async fn create_team(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateTeamRequest>,
) -> ApiResult<Created<Json<TeamResponse>>> {
    let service = TeamService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Get team by ID
///
/// GET /teams/{team_id}
pub async fn get_team(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(team_id): Path<String>,
) -> ApiResult<Json<TeamResponse>> {
    let team_id = parse_id(&team_id, "team_id")?;

    let service = TeamService::new(state.service_context());
    let response = service.get(team_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Update team
///
/// PATCH /teams/{team_id}
pub async fn update_team(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(team_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateTeamRequest>,
) -> ApiResult<Json<TeamResponse>> {
    let team_id = parse_id(&team_id, "team_id")?;

    let service = TeamService::new(state.service_context());
    let response = service.update(team_id, auth.user_id, request).await?;
    Ok(Json(response))
}

/// Delete team
///
/// DELETE /teams/{team_id}
pub async fn delete_team(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(team_id): Path<String>,
) -> ApiResult<NoContent> {
    let team_id = parse_id(&team_id, "team_id")?;

    let service = TeamService::new(state.service_context());
    service.delete(team_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Add a team member
///
/// POST /teams/{team_id}/members
pub async fn add_team_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(team_id): Path<String>,
    ValidatedJson(request): ValidatedJson<TeamMemberRequest>,
) -> ApiResult<Json<TeamResponse>> {
    let team_id = parse_id(&team_id, "team_id")?;
    let agent_id = parse_id(&request.agent_id, "agent_id")?;

    let service = TeamService::new(state.service_context());
    let response = service.add_member(team_id, auth.user_id, agent_id).await?;
    Ok(Json(response))
}

/// Remove a team member
///
/// DELETE /teams/{team_id}/members/{agent_id}
pub async fn remove_team_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((team_id, agent_id)): Path<(String, String)>,
) -> ApiResult<Json<TeamResponse>> {
    let team_id = parse_id(&team_id, "team_id")?;
    let agent_id = parse_id(&agent_id, "agent_id")?;

    let service = TeamService::new(state.service_context());
    let response = service
        .remove_member(team_id, auth.user_id, agent_id)
        .await?;
    Ok(Json(response))
}
