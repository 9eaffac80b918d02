//! Message service
//!
//! The ledger: appends inbound/outbound messages, keeps the conversation's
//! denormalized preview/unread fields current, and handles mark-read.
//!
//! Append sequences are deliberately not transactional: message insert,
//! conversation update, and channel counter update are separate writes, and a
//! crash between them leaves the denormalized fields briefly out of sync.

use onethy_cache::{PubSubChannel, PubSubEvent};
use onethy_core::{
    Channel, Conversation, Message, MessageQuery, MessageType, Snowflake,
};
use serde_json::json;
use tracing::{info, instrument};

use crate::dto::responses::{MarkReadResponse, MessageResponse};

use super::context::ServiceContext;
use super::conversation::ConversationService;
use super::error::{ServiceError, ServiceResult};

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Append an inbound message to a conversation.
    ///
    /// Creates the message as delivered, bumps the conversation preview and
    /// unread counter, and records the exchange on the owning channel.
    #[instrument(skip(self, channel, conversation, content, external_id, push_name), fields(conversation_id = %conversation.id))]
    pub async fn append_inbound(
        &self,
        channel: &Channel,
        mut conversation: Conversation,
        content: String,
        message_type: MessageType,
        external_id: Option<String>,
        push_name: Option<String>,
        provider_timestamp: Option<i64>,
    ) -> ServiceResult<Message> {
        let message = Message::inbound(
            self.ctx.generate_id(),
            conversation.id,
            content,
            message_type,
        )
        .with_provider_meta(external_id, push_name, provider_timestamp);

        self.ctx.message_repo().create(&message).await?;

        conversation.record_inbound(&message.content);
        self.ctx.conversation_repo().update(&conversation).await?;

        self.ctx.channel_repo().record_message(channel.id).await?;

        info!(message_id = %message.id, "Inbound message appended");
        self.publish_message(&conversation, &message).await;

        Ok(message)
    }

    /// Send an outbound message: deliver via the gateway, then append.
    ///
    /// A gateway failure surfaces to the caller and nothing is recorded.
    #[instrument(skip(self, content))]
    pub async fn send(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
        content: String,
    ) -> ServiceResult<MessageResponse> {
        let mut conversation = ConversationService::new(self.ctx)
            .load(conversation_id, user_id)
            .await?;

        let channel = self
            .ctx
            .channel_repo()
            .find_by_id(conversation.channel_id, user_id)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found("Channel", conversation.channel_id.to_string())
            })?;

        let contact = self
            .ctx
            .contact_repo()
            .find_by_id(conversation.contact_id, user_id)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found("Contact", conversation.contact_id.to_string())
            })?;

        let receipt = self
            .ctx
            .provider()
            .send_text(&channel.instance_name, &contact.phone, &content)
            .await?;

        let message = Message::outbound(self.ctx.generate_id(), conversation.id, content)
            .with_provider_meta(receipt.external_id, None, None);
        self.ctx.message_repo().create(&message).await?;

        conversation.record_outbound(&message.content);
        self.ctx.conversation_repo().update(&conversation).await?;

        self.ctx.channel_repo().record_message(channel.id).await?;

        info!(message_id = %message.id, conversation_id = %conversation_id, "Message sent");
        self.publish_message(&conversation, &message).await;

        Ok(MessageResponse::from(&message))
    }

    /// List messages in a conversation with pagination
    #[instrument(skip(self, query))]
    pub async fn list(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
        query: MessageQuery,
    ) -> ServiceResult<Vec<MessageResponse>> {
        // Verify tenant ownership before touching the ledger
        ConversationService::new(self.ctx)
            .load(conversation_id, user_id)
            .await?;

        let messages = self
            .ctx
            .message_repo()
            .find_by_conversation(conversation_id, query)
            .await?;

        Ok(messages.iter().map(MessageResponse::from).collect())
    }

    /// Mark every inbound message in the conversation as read and reset the
    /// unread counter. Idempotent.
    #[instrument(skip(self))]
    pub async fn mark_read(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<MarkReadResponse> {
        let mut conversation = ConversationService::new(self.ctx)
            .load(conversation_id, user_id)
            .await?;

        let updated = self.ctx.message_repo().mark_read(conversation_id).await?;

        if conversation.unread_count != 0 {
            conversation.clear_unread();
            self.ctx.conversation_repo().update(&conversation).await?;
        }

        info!(conversation_id = %conversation_id, updated, "Conversation marked read");
        Ok(MarkReadResponse { updated })
    }

    /// Best-effort MESSAGE_CREATE event for the dashboard
    async fn publish_message(&self, conversation: &Conversation, message: &Message) {
        let data = json!({
            "id": message.id.to_string(),
            "conversation_id": conversation.id.to_string(),
            "from_me": message.from_me,
            "content": message.content,
            "type": message.message_type.as_str(),
            "status": message.status.as_str(),
            "timestamp": message.created_at.to_rfc3339(),
        });

        let event = PubSubEvent::new("MESSAGE_CREATE", data);
        self.ctx
            .publisher()
            .publish(&PubSubChannel::tenant(conversation.user_id), &event)
            .await
            .ok();
        self.ctx
            .publisher()
            .publish(&PubSubChannel::conversation(conversation.id), &event)
            .await
            .ok();
    }
}

#[cfg(test)]
mod tests {
    // The unread/preview bookkeeping is unit-tested on the Conversation
    // entity; the full append paths run in the integration test crate.
}
