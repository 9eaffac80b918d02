//! Contact handlers
//!
//! CRM endpoints for tenant-scoped contacts.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use onethy_service::{
    ContactResponse, ContactService, CreateContactRequest, UpdateContactRequest,
};
use serde::Deserialize;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

use super::parse_id;

/// Contact listing filters
#[derive(Debug, Deserialize)]
pub struct ContactFilters {
    /// Substring match against name or phone
    #[serde(default)]
    pub search: Option<String>,
}

/// List contacts
///
/// GET /contacts
pub async fn list_contacts(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filters): Query<ContactFilters>,
) -> ApiResult<Json<Vec<ContactResponse>>> {
    let service = ContactService::new(state.service_context());
    let contacts = service.list(auth.user_id, filters.search.as_deref()).await?;
    Ok(Json(contacts))
}

/// Create contact
///
/// POST /contacts
pub async fn create_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateContactRequest>,
) -> ApiResult<Created<Json<ContactResponse>>> {
    let service = ContactService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Get contact by ID
///
/// GET /contacts/{contact_id}
pub async fn get_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(contact_id): Path<String>,
) -> ApiResult<Json<ContactResponse>> {
    let contact_id = parse_id(&contact_id, "contact_id")?;

    let service = ContactService::new(state.service_context());
    let response = service.get(contact_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Update contact
///
/// PATCH /contacts/{contact_id}
pub async fn update_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(contact_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateContactRequest>,
) -> ApiResult<Json<ContactResponse>> {
    let contact_id = parse_id(&contact_id, "contact_id")?;

    let service = ContactService::new(state.service_context());
    let response = service.update(contact_id, auth.user_id, request).await?;
    Ok(Json(response))
}

/// Delete contact (blocked while it has open conversations)
///
/// DELETE /contacts/{contact_id}
pub async fn delete_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(contact_id): Path<String>,
) -> ApiResult<NoContent> {
    let contact_id = parse_id(&contact_id, "contact_id")?;

    let service = ContactService::new(state.service_context());
    service.delete(contact_id, auth.user_id).await?;
    Ok(NoContent)
}
