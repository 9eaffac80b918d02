//! Webhook handler
//!
//! Receives event deliveries from the WhatsApp gateway. The path token routes
//! to a channel; unknown tokens are the only non-success response besides an
//! unexpected internal failure.

use axum::{
    extract::{Path, State},
    Json,
};
use onethy_service::{WebhookAck, WebhookService};

use crate::response::ApiResult;
use crate::state::AppState;

/// Receive a gateway event
///
/// POST /webhook/{webhook_token}
pub async fn receive_event(
    State(state): State<AppState>,
    Path(webhook_token): Path<String>,
    Json(payload): Json<serde_json::Value>,
) -> ApiResult<Json<WebhookAck>> {
    let service = WebhookService::new(state.service_context());
    service.handle_event(&webhook_token, payload).await?;
    Ok(Json(WebhookAck::ok()))
}
