//! Channel service
//!
//! Channel provisioning and lifecycle against the WhatsApp gateway:
//! create (instance + webhook registration), connect, restart, logout,
//! delete, and status reconciliation.

use onethy_cache::{PubSubChannel, PubSubEvent};
use onethy_core::{generate_webhook_token, Channel, ChannelStatus, Snowflake};
use onethy_provider::map_connection_state;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::dto::requests::{CreateChannelRequest, UpdateChannelRequest};
use crate::dto::responses::{ChannelResponse, QrCodeResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Channel service
pub struct ChannelService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChannelService<'a> {
    /// Create a new ChannelService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Provision a channel: create the gateway instance, register our webhook
    /// URL, persist the record disconnected.
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        user_id: Snowflake,
        request: CreateChannelRequest,
    ) -> ServiceResult<ChannelResponse> {
        let webhook_token = generate_webhook_token();
        let instance_name = request
            .instance_name
            .unwrap_or_else(|| instance_slug(&request.name, user_id));

        let instance = self.ctx.provider().create_instance(&instance_name).await?;

        let webhook_url = self.ctx.webhook_url(&webhook_token);
        self.ctx
            .provider()
            .set_webhook(&instance.instance_name, &webhook_url)
            .await?;

        let channel = Channel::new(
            self.ctx.generate_id(),
            user_id,
            request.name,
            instance.instance_name,
            webhook_token,
        );
        self.ctx.channel_repo().create(&channel).await?;

        info!(channel_id = %channel.id, instance = %channel.instance_name, "Channel provisioned");
        Ok(ChannelResponse::from(&channel))
    }

    /// List channels for a tenant
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: Snowflake) -> ServiceResult<Vec<ChannelResponse>> {
        let channels = self.ctx.channel_repo().find_by_user(user_id).await?;
        Ok(channels.iter().map(ChannelResponse::from).collect())
    }

    /// Get a channel by ID
    #[instrument(skip(self))]
    pub async fn get(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<ChannelResponse> {
        let channel = self.load(id, user_id).await?;
        Ok(ChannelResponse::from(&channel))
    }

    /// Rename a channel
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: Snowflake,
        user_id: Snowflake,
        request: UpdateChannelRequest,
    ) -> ServiceResult<ChannelResponse> {
        self.load(id, user_id).await?;
        self.ctx
            .channel_repo()
            .update_name(id, user_id, &request.name)
            .await?;

        let channel = self.load(id, user_id).await?;
        Ok(ChannelResponse::from(&channel))
    }

    /// Start pairing; the channel goes connecting until the webhook reports
    /// the session open.
    #[instrument(skip(self))]
    pub async fn connect(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<QrCodeResponse> {
        let channel = self.load(id, user_id).await?;

        let qr = self
            .ctx
            .provider()
            .connect_instance(&channel.instance_name)
            .await?;

        self.set_status(&channel, ChannelStatus::Connecting).await?;

        info!(channel_id = %id, "Channel connecting");
        Ok(QrCodeResponse::from(qr))
    }

    /// Restart the gateway session
    #[instrument(skip(self))]
    pub async fn restart(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<ChannelResponse> {
        let channel = self.load(id, user_id).await?;

        self.ctx
            .provider()
            .restart_instance(&channel.instance_name)
            .await?;

        self.set_status(&channel, ChannelStatus::Connecting).await?;

        let channel = self.load(id, user_id).await?;
        info!(channel_id = %id, "Channel restarting");
        Ok(ChannelResponse::from(&channel))
    }

    /// Log the instance out. The gateway call is best-effort so a dead
    /// instance can still be disconnected locally.
    #[instrument(skip(self))]
    pub async fn logout(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<ChannelResponse> {
        let channel = self.load(id, user_id).await?;

        if let Err(e) = self
            .ctx
            .provider()
            .logout_instance(&channel.instance_name)
            .await
        {
            warn!(channel_id = %id, error = %e, "Gateway logout failed");
        }

        self.set_status(&channel, ChannelStatus::Disconnected).await?;

        let channel = self.load(id, user_id).await?;
        info!(channel_id = %id, "Channel logged out");
        Ok(ChannelResponse::from(&channel))
    }

    /// Delete a channel, cascading the provider-side instance deletion.
    /// The gateway call is best-effort for the same reason as logout.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let channel = self.load(id, user_id).await?;

        if let Err(e) = self
            .ctx
            .provider()
            .delete_instance(&channel.instance_name)
            .await
        {
            warn!(channel_id = %id, error = %e, "Gateway instance deletion failed");
        }

        self.ctx.channel_repo().delete(id, user_id).await?;

        info!(channel_id = %id, "Channel deleted");
        Ok(())
    }

    /// Reconcile channel statuses against the gateway's instance list
    #[instrument(skip(self))]
    pub async fn sync_statuses(&self, user_id: Snowflake) -> ServiceResult<Vec<ChannelResponse>> {
        let instances = self.ctx.provider().fetch_instances().await?;
        let channels = self.ctx.channel_repo().find_by_user(user_id).await?;

        let mut responses = Vec::with_capacity(channels.len());
        for mut channel in channels {
            let reported = instances
                .iter()
                .find(|i| i.instance_name == channel.instance_name)
                .and_then(|i| i.status.as_deref());

            if let Some(state) = reported {
                let status = map_connection_state(state);
                if status != channel.status {
                    self.ctx.channel_repo().update_status(channel.id, status).await?;
                    channel.status = status;
                }
            }
            responses.push(ChannelResponse::from(&channel));
        }

        Ok(responses)
    }

    async fn load(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<Channel> {
        self.ctx
            .channel_repo()
            .find_by_id(id, user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Channel", id.to_string()))
    }

    async fn set_status(&self, channel: &Channel, status: ChannelStatus) -> ServiceResult<()> {
        self.ctx.channel_repo().update_status(channel.id, status).await?;

        let event = PubSubEvent::new(
            "CHANNEL_STATUS",
            json!({
                "id": channel.id.to_string(),
                "status": status.as_str(),
            }),
        );
        self.ctx
            .publisher()
            .publish(&PubSubChannel::tenant(channel.user_id), &event)
            .await
            .ok();

        Ok(())
    }
}

/// Derive a provider instance name from the channel display name
fn instance_slug(name: &str, user_id: Snowflake) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let slug = slug.trim_matches('-').to_string();
    format!("{}-{}", if slug.is_empty() { "channel" } else { &slug }, user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_slug() {
        let slug = instance_slug("Support Line #1", Snowflake::new(42));
        assert_eq!(slug, "support-line--1-42");
    }

    #[test]
    fn test_instance_slug_empty_name() {
        let slug = instance_slug("!!!", Snowflake::new(7));
        assert_eq!(slug, "channel-7");
    }
}
