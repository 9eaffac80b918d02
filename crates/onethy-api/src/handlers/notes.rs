//! Note handlers
//!
//! Internal annotations on conversations.

use axum::{
    extract::{Path, State},
    Json,
};
use onethy_service::{CreateNoteRequest, NoteResponse, NoteService};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

use super::parse_id;

/// List notes on a conversation
///
/// GET /conversations/{conversation_id}/notes
pub async fn list_notes(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(conversation_id): Path<String>,
) -> ApiResult<Json<Vec<NoteResponse>>> {
    let conversation_id = parse_id(&conversation_id, "conversation_id")?;

    let service = NoteService::new(state.service_context());
    let notes = service.list(conversation_id, auth.user_id).await?;
    Ok(Json(notes))
}

/// Create a note on a conversation
///
/// POST /conversations/{conversation_id}/notes
pub async fn create_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(conversation_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateNoteRequest>,
) -> ApiResult<Created<Json<NoteResponse>>> {
    let conversation_id = parse_id(&conversation_id, "conversation_id")?;

    let service = NoteService::new(state.service_context());
    let response = service
        .create(conversation_id, auth.user_id, request)
        .await?;
    Ok(Created(Json(response)))
}

/// Delete a note
///
/// DELETE /notes/{note_id}
pub async fn delete_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(note_id): Path<String>,
) -> ApiResult<NoContent> {
    let note_id = parse_id(&note_id, "note_id")?;

    let service = NoteService::new(state.service_context());
    service.delete(note_id, auth.user_id).await?;
    Ok(NoContent)
}
