//! Webhook dispatcher
//!
//! Entry point for gateway event deliveries. The only hard failure is an
//! unknown webhook token; once the channel is resolved, processing errors are
//! logged and swallowed so one malformed payload never turns into a retry
//! storm from the provider.

use onethy_core::{bare_phone, Channel, DomainError};
use onethy_provider::{
    map_connection_state, EventData, WebhookEnvelope, EVENT_CONNECTION_UPDATE,
    EVENT_MESSAGES_UPSERT,
};
use tracing::{debug, instrument, warn};

use super::contact::ContactService;
use super::context::ServiceContext;
use super::conversation::ConversationService;
use super::error::ServiceResult;
use super::message::MessageService;

/// Webhook dispatcher
pub struct WebhookService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> WebhookService<'a> {
    /// Create a new WebhookService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Handle one gateway event delivery.
    ///
    /// Resolves the channel by its opaque token (the only not-found path),
    /// then dispatches on the event name. Returns Ok for every recognized or
    /// unrecognized event once the channel is known.
    #[instrument(skip(self, payload))]
    pub async fn handle_event(
        &self,
        webhook_token: &str,
        payload: serde_json::Value,
    ) -> ServiceResult<()> {
        let channel = self
            .ctx
            .channel_repo()
            .find_by_webhook_token(webhook_token)
            .await?
            .ok_or(DomainError::UnknownWebhookToken)?;

        let envelope: WebhookEnvelope = match serde_json::from_value(payload) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(channel_id = %channel.id, error = %e, "Discarding malformed webhook payload");
                return Ok(());
            }
        };

        match envelope.event.as_str() {
            EVENT_MESSAGES_UPSERT => {
                if let Err(e) = self.process_messages(&channel, &envelope.data).await {
                    warn!(channel_id = %channel.id, error = %e, "Inbound message processing failed");
                }
            }
            EVENT_CONNECTION_UPDATE => {
                if let Err(e) = self.process_connection(&channel, &envelope.data).await {
                    warn!(channel_id = %channel.id, error = %e, "Connection update failed");
                }
            }
            other => {
                debug!(channel_id = %channel.id, event = other, "Ignoring webhook event");
            }
        }

        Ok(())
    }

    /// Drive the inbound pipeline: resolve contact, find-or-open the
    /// conversation, append to the ledger.
    async fn process_messages(&self, channel: &Channel, data: &EventData) -> ServiceResult<()> {
        let Some(incoming) = data.messages.first() else {
            return Ok(());
        };

        // Self-echoes of our own outbound sends come back through the same
        // webhook; skipping them is the no-op, not an error.
        if incoming.key.from_me {
            debug!(channel_id = %channel.id, "Skipping self-echo");
            return Ok(());
        }

        let phone = bare_phone(&incoming.key.remote_jid);
        let contact = ContactService::new(self.ctx)
            .resolve(channel.user_id, phone, incoming.push_name.as_deref())
            .await?;

        let conversation = ConversationService::new(self.ctx)
            .find_or_open(channel, &contact)
            .await?;

        let (content, message_type) = incoming.content_and_type();
        MessageService::new(self.ctx)
            .append_inbound(
                channel,
                conversation,
                content,
                message_type,
                incoming.key.id.clone(),
                incoming.push_name.clone(),
                incoming.message_timestamp,
            )
            .await?;

        Ok(())
    }

    /// Map the provider connection state onto the channel status vocabulary
    async fn process_connection(&self, channel: &Channel, data: &EventData) -> ServiceResult<()> {
        let Some(connection) = &data.connection else {
            return Ok(());
        };

        let status = map_connection_state(&connection.state);
        self.ctx
            .channel_repo()
            .update_status(channel.id, status)
            .await?;

        debug!(channel_id = %channel.id, status = %status, "Channel status updated from webhook");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    // Envelope parsing and state mapping are unit-tested in onethy-provider;
    // the dispatcher's isolation property runs in the integration test crate.
}
