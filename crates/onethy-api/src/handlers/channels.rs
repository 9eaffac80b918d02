//! Channel handlers
//!
//! Endpoints for channel provisioning and lifecycle.

use axum::{
    extract::{Path, State},
    Json,
};
use onethy_service::{
    ChannelResponse, ChannelService, CreateChannelRequest, QrCodeResponse, UpdateChannelRequest,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

use super::parse_id;

/// List channels
///
/// GET /channels
pub async fn list_channels(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ChannelResponse>>> {
    let service = ChannelService::new(state.service_context());
    let channels = service.list(auth.user_id).await?;
    Ok(Json(channels))
}

/// Provision a channel
///
/// POST /channels
pub async fn create_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateChannelRequest>,
) -> ApiResult<Created<Json<ChannelResponse>>> {
    let service = ChannelService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Get channel by ID
///
/// GET /channels/{channel_id}
pub async fn get_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(channel_id): Path<String>,
) -> ApiResult<Json<ChannelResponse>> {
    let channel_id = parse_id(&channel_id, "channel_id")?;

    let service = ChannelService::new(state.service_context());
    let response = service.get(channel_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Rename a channel
///
/// PATCH /channels/{channel_id}
pub async fn update_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(channel_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateChannelRequest>,
) -> ApiResult<Json<ChannelResponse>> {
    let channel_id = parse_id(&channel_id, "channel_id")?;

    let service = ChannelService::new(state.service_context());
    let response = service.update(channel_id, auth.user_id, request).await?;
    Ok(Json(response))
}

/// Delete a channel (cascades the gateway instance)
///
/// DELETE /channels/{channel_id}
pub async fn delete_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(channel_id): Path<String>,
) -> ApiResult<NoContent> {
    let channel_id = parse_id(&channel_id, "channel_id")?;

    let service = ChannelService::new(state.service_context());
    service.delete(channel_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Start pairing
///
/// POST /channels/{channel_id}/connect
pub async fn connect_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(channel_id): Path<String>,
) -> ApiResult<Json<QrCodeResponse>> {
    let channel_id = parse_id(&channel_id, "channel_id")?;

    let service = ChannelService::new(state.service_context());
    let response = service.connect(channel_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Restart the gateway session
///
/// POST /channels/{channel_id}/restart
pub async fn restart_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(channel_id): Path<String>,
) -> ApiResult<Json<ChannelResponse>> {
    let channel_id = parse_id(&channel_id, "channel_id")?;

    let service = ChannelService::new(state.service_context());
    let response = service.restart(channel_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Log the channel out of WhatsApp
///
/// POST /channels/{channel_id}/logout
pub async fn logout_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(channel_id): Path<String>,
) -> ApiResult<Json<ChannelResponse>> {
    let channel_id = parse_id(&channel_id, "channel_id")?;

    let service = ChannelService::new(state.service_context());
    let response = service.logout(channel_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Reconcile channel statuses against the gateway
///
/// POST /channels/sync
pub async fn sync_channels(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ChannelResponse>>> {
    let service = ChannelService::new(state.service_context());
    let channels = service.sync_statuses(auth.user_id).await?;
    Ok(Json(channels))
}
