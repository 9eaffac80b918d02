//! Macro handlers
//!
//! Canned reply endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use onethy_service::{CreateMacroRequest, MacroResponse, MacroService, UpdateMacroRequest};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

use super::parse_id;

/// List macros
///
/// GET /macros
pub async fn list_macros(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<MacroResponse>>> {
    let service = MacroService::new(state.service_context());
    let macros = service.list(auth.user_id).await?;
    Ok(Json(macros))
}

/// Create macro
///
/// POST /macros
pub async fn create_macro(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateMacroRequest>,
) -> ApiResult<Created<Json<MacroResponse>>> {
    let service = MacroService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Get macro by ID
///
/// GET /macros/{macro_id}
pub async fn get_macro(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(macro_id): Path<String>,
) -> ApiResult<Json<MacroResponse>> {
    let macro_id = parse_id(&macro_id, "macro_id")?;

    let service = MacroService::new(state.service_context());
    let response = service.get(macro_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Update macro
///
/// PATCH /macros/{macro_id}
pub async fn update_macro(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(macro_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateMacroRequest>,
) -> ApiResult<Json<MacroResponse>> {
    let macro_id = parse_id(&macro_id, "macro_id")?;

    let service = MacroService::new(state.service_context());
    let response = service.update(macro_id, auth.user_id, request).await?;
    Ok(Json(response))
}

/// Delete macro
///
/// DELETE /macros/{macro_id}
pub async fn delete_macro(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(macro_id): Path<String>,
) -> ApiResult<NoContent> {
    let macro_id = parse_id(&macro_id, "macro_id")?;

    let service = MacroService::new(state.service_context());
    service.delete(macro_id, auth.user_id).await?;
    Ok(NoContent)
}
