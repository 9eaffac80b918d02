//! HTTP client for the WhatsApp gateway (Evolution API)
//!
//! Instance lifecycle, webhook registration, and text delivery. Every call
//! authenticates with the shared `apikey` header.

use std::time::Duration;

use async_trait::async_trait;
use onethy_common::ProviderConfig;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

/// Error type for gateway operations
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Gateway request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gateway returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected gateway response: {0}")]
    InvalidResponse(String),
}

/// Result type for gateway operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Provider-side instance descriptor
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceInfo {
    pub instance_name: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Pairing information returned by a connect call
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub base64: Option<String>,
}

/// Delivery receipt for an outbound text
#[derive(Debug, Clone, Default)]
pub struct SentMessage {
    /// Provider-side message id, when the gateway reported one
    pub external_id: Option<String>,
}

/// Operations the rest of the system needs from the gateway
#[async_trait]
pub trait ProviderApi: Send + Sync {
    /// Create a provider-side instance for a channel
    async fn create_instance(&self, instance_name: &str) -> ProviderResult<InstanceInfo>;

    /// Start pairing; returns QR/pairing data for the dashboard
    async fn connect_instance(&self, instance_name: &str) -> ProviderResult<QrCode>;

    /// Restart a session without dropping the pairing
    async fn restart_instance(&self, instance_name: &str) -> ProviderResult<()>;

    /// Log the instance out of WhatsApp
    async fn logout_instance(&self, instance_name: &str) -> ProviderResult<()>;

    /// Delete the provider-side instance entirely
    async fn delete_instance(&self, instance_name: &str) -> ProviderResult<()>;

    /// Point the instance's webhook at our ingestion endpoint
    async fn set_webhook(&self, instance_name: &str, url: &str) -> ProviderResult<()>;

    /// List all instances known to the gateway
    async fn fetch_instances(&self) -> ProviderResult<Vec<InstanceInfo>>;

    /// Deliver a text message to a bare phone number
    async fn send_text(
        &self,
        instance_name: &str,
        number: &str,
        text: &str,
    ) -> ProviderResult<SentMessage>;
}

/// Evolution API client
#[derive(Clone)]
pub struct EvolutionClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl EvolutionClient {
    /// Create a client from provider configuration
    pub fn new(config: &ProviderConfig) -> ProviderResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> ProviderResult<reqwest::Response> {
        let response = request.header("apikey", &self.api_key).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ProviderError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn json<T: for<'de> Deserialize<'de>>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> ProviderResult<T> {
        let response = self.execute(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }
}

impl std::fmt::Debug for EvolutionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvolutionClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Instance shape inside create/fetch responses
#[derive(Debug, Deserialize)]
struct InstanceEnvelope {
    instance: InstanceInfo,
}

/// Response shape of sendText
#[derive(Debug, Default, Deserialize)]
struct SendTextResponse {
    #[serde(default)]
    key: Option<SendTextKey>,
}

#[derive(Debug, Deserialize)]
struct SendTextKey {
    #[serde(default)]
    id: Option<String>,
}

/// Request body for webhook registration
#[derive(Debug, Serialize)]
struct SetWebhookRequest<'a> {
    url: &'a str,
    enabled: bool,
    events: &'a [&'a str],
}

#[async_trait]
impl ProviderApi for EvolutionClient {
    #[instrument(skip(self))]
    async fn create_instance(&self, instance_name: &str) -> ProviderResult<InstanceInfo> {
        let body = json!({
            "instanceName": instance_name,
            "qrcode": true,
            "integration": "WHATSAPP-BAILEYS",
        });

        let envelope: InstanceEnvelope = self
            .json(self.http.post(self.url("instance/create")).json(&body))
            .await?;
        Ok(envelope.instance)
    }

    #[instrument(skip(self))]
    async fn connect_instance(&self, instance_name: &str) -> ProviderResult<QrCode> {
        self.json(
            self.http
                .get(self.url(&format!("instance/connect/{instance_name}"))),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn restart_instance(&self, instance_name: &str) -> ProviderResult<()> {
        self.execute(
            self.http
                .put(self.url(&format!("instance/restart/{instance_name}"))),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn logout_instance(&self, instance_name: &str) -> ProviderResult<()> {
        self.execute(
            self.http
                .delete(self.url(&format!("instance/logout/{instance_name}"))),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_instance(&self, instance_name: &str) -> ProviderResult<()> {
        self.execute(
            self.http
                .delete(self.url(&format!("instance/delete/{instance_name}"))),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self, url))]
    async fn set_webhook(&self, instance_name: &str, url: &str) -> ProviderResult<()> {
        let body = SetWebhookRequest {
            url,
            enabled: true,
            events: &["MESSAGES_UPSERT", "CONNECTION_UPDATE"],
        };

        self.execute(
            self.http
                .post(self.url(&format!("webhook/set/{instance_name}")))
                .json(&body),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch_instances(&self) -> ProviderResult<Vec<InstanceInfo>> {
        let envelopes: Vec<InstanceEnvelope> = self
            .json(self.http.get(self.url("instance/fetchInstances")))
            .await?;
        Ok(envelopes.into_iter().map(|e| e.instance).collect())
    }

    #[instrument(skip(self, text))]
    async fn send_text(
        &self,
        instance_name: &str,
        number: &str,
        text: &str,
    ) -> ProviderResult<SentMessage> {
        let body = json!({
            "number": number,
            "text": text,
        });

        let response: SendTextResponse = self
            .json(
                self.http
                    .post(self.url(&format!("message/sendText/{instance_name}")))
                    .json(&body),
            )
            .await?;

        Ok(SentMessage {
            external_id: response.key.and_then(|k| k.id),
        })
    }
}
