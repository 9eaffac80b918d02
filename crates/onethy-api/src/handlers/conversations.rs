//! Conversation handlers
//!
//! Inbox listing, status/priority updates, and assignment.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use onethy_core::{ConversationQuery, ConversationStatus, Snowflake};
use onethy_service::{
    AssignConversationRequest, AutoAssignRequest, ConversationResponse, ConversationService,
    UpdateConversationRequest,
};
use serde::Deserialize;

use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

use super::parse_id;

/// Conversation listing filters
#[derive(Debug, Deserialize)]
pub struct ConversationFilters {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
}

impl ConversationFilters {
    fn into_query(self, pagination: Pagination) -> Result<ConversationQuery, ApiError> {
        let status = self
            .status
            .map(|s| {
                s.parse::<ConversationStatus>()
                    .map_err(|_| ApiError::invalid_query("Invalid 'status' filter"))
            })
            .transpose()?;

        let parse = |raw: Option<String>, what: &str| -> Result<Option<Snowflake>, ApiError> {
            raw.map(|s| {
                s.parse::<Snowflake>()
                    .map_err(|_| ApiError::invalid_query(format!("Invalid '{what}' filter")))
            })
            .transpose()
        };

        Ok(ConversationQuery {
            status,
            assigned_agent_id: parse(self.agent_id, "agent_id")?,
            assigned_team_id: parse(self.team_id, "team_id")?,
            channel_id: parse(self.channel_id, "channel_id")?,
            before: pagination.before,
            limit: i64::from(pagination.limit),
        })
    }
}

/// List conversations
///
/// GET /conversations
pub async fn list_conversations(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filters): Query<ConversationFilters>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<ConversationResponse>>> {
    let query = filters.into_query(pagination)?;

    let service = ConversationService::new(state.service_context());
    let conversations = service.list(auth.user_id, query).await?;
    Ok(Json(conversations))
}

/// Get conversation by ID
///
/// GET /conversations/{conversation_id}
pub async fn get_conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(conversation_id): Path<String>,
) -> ApiResult<Json<ConversationResponse>> {
    let conversation_id = parse_id(&conversation_id, "conversation_id")?;

    let service = ConversationService::new(state.service_context());
    let response = service.get(conversation_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Partial status/priority update
///
/// PATCH /conversations/{conversation_id}
pub async fn update_conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(conversation_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateConversationRequest>,
) -> ApiResult<Json<ConversationResponse>> {
    let conversation_id = parse_id(&conversation_id, "conversation_id")?;

    let service = ConversationService::new(state.service_context());
    let response = service
        .update(conversation_id, auth.user_id, request)
        .await?;
    Ok(Json(response))
}

/// Manual assignment (implicitly reopens)
///
/// POST /conversations/{conversation_id}/assign
pub async fn assign_conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(conversation_id): Path<String>,
    ValidatedJson(request): ValidatedJson<AssignConversationRequest>,
) -> ApiResult<Json<ConversationResponse>> {
    let conversation_id = parse_id(&conversation_id, "conversation_id")?;
    let agent_id = request
        .agent_id
        .as_deref()
        .map(|raw| parse_id(raw, "agent_id"))
        .transpose()?;
    let team_id = request
        .team_id
        .as_deref()
        .map(|raw| parse_id(raw, "team_id"))
        .transpose()?;

    let service = ConversationService::new(state.service_context());
    let response = service
        .assign(conversation_id, auth.user_id, agent_id, team_id)
        .await?;
    Ok(Json(response))
}

/// Least-loaded auto-assignment within a team
///
/// POST /conversations/{conversation_id}/auto-assign
pub async fn auto_assign_conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(conversation_id): Path<String>,
    ValidatedJson(request): ValidatedJson<AutoAssignRequest>,
) -> ApiResult<Json<ConversationResponse>> {
    let conversation_id = parse_id(&conversation_id, "conversation_id")?;
    let team_id = parse_id(&request.team_id, "team_id")?;

    let service = ConversationService::new(state.service_context());
    let response = service
        .auto_assign(conversation_id, auth.user_id, team_id)
        .await?;
    Ok(Json(response))
}
