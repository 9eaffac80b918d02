//! Message handlers
//!
//! Ledger endpoints: list, send, mark-read.

use axum::{
    extract::{Path, State},
    Json,
};
use onethy_core::MessageQuery;
use onethy_service::{MarkReadResponse, MessageResponse, MessageService, SendMessageRequest};

use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

use super::parse_id;

/// List messages in a conversation
///
/// GET /conversations/{conversation_id}/messages
pub async fn get_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(conversation_id): Path<String>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let conversation_id = parse_id(&conversation_id, "conversation_id")?;

    let query = MessageQuery {
        before: pagination.before,
        after: pagination.after,
        limit: i64::from(pagination.limit),
    };

    let service = MessageService::new(state.service_context());
    let messages = service.list(conversation_id, auth.user_id, query).await?;
    Ok(Json(messages))
}

/// Send a message through the gateway
///
/// POST /conversations/{conversation_id}/messages
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(conversation_id): Path<String>,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let conversation_id = parse_id(&conversation_id, "conversation_id")?;

    let service = MessageService::new(state.service_context());
    let response = service
        .send(conversation_id, auth.user_id, request.content)
        .await?;
    Ok(Created(Json(response)))
}

/// Mark every inbound message read (idempotent)
///
/// POST /conversations/{conversation_id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(conversation_id): Path<String>,
) -> ApiResult<Json<MarkReadResponse>> {
    let conversation_id = parse_id(&conversation_id, "conversation_id")?;

    let service = MessageService::new(state.service_context());
    let response = service.mark_read(conversation_id, auth.user_id).await?;
    Ok(Json(response))
}
