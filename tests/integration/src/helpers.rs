//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, minting bearer tokens,
//! seeding channels, and making HTTP requests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::Duration;

use anyhow::Result;
use onethy_api::{create_app, create_app_state};
use onethy_common::{AppConfig, JwtService};
use onethy_core::{generate_webhook_token, Channel, ChannelRepository, Snowflake};
use onethy_db::{create_pool_from_env, PgChannelRepository};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{test_id, unique_suffix};

/// Counter for unique test ports
static PORT_COUNTER: AtomicU16 = AtomicU16::new(19000);

/// Get a unique port for testing
pub fn get_test_port() -> u16 {
    PORT_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    jwt_service: JwtService,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let port = get_test_port();
        let addr = SocketAddr::from(([127, 0, 0, 1], port));

        let jwt_service = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry);

        // Create app state
        let state = create_app_state(config).await?;

        // Build application
        let app = create_app(state);

        // Bind to port
        let listener = TcpListener::bind(addr).await?;
        let actual_addr = listener.local_addr()?;

        // Spawn server task
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Create HTTP client
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr: actual_addr,
            client,
            jwt_service,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Mint a bearer token for a tenant (token issuance itself is an
    /// external collaborator, so tests sign their own)
    pub fn issue_token(&self, user_id: Snowflake) -> Result<String> {
        self.jwt_service
            .issue_token(user_id)
            .map_err(|e| anyhow::anyhow!("Failed to issue token: {e}"))
    }

    fn request(&self, method: reqwest::Method, path: &str, token: Option<&str>) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url(), path));
        match token {
            Some(token) => builder.header("Authorization", format!("Bearer {token}")),
            None => builder,
        }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.request(reqwest::Method::GET, path, None).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .request(reqwest::Method::GET, path, Some(token))
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self
            .request(reqwest::Method::POST, path, None)
            .json(body)
            .send()
            .await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .request(reqwest::Method::POST, path, Some(token))
            .json(body)
            .send()
            .await?)
    }

    /// Make a PATCH request with auth token
    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .request(reqwest::Method::PATCH, path, Some(token))
            .json(body)
            .send()
            .await?)
    }

    /// Make a PUT request with auth token
    pub async fn put_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .request(reqwest::Method::PUT, path, Some(token))
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .request(reqwest::Method::DELETE, path, Some(token))
            .send()
            .await?)
    }
}

/// Create a test configuration
///
/// Infrastructure endpoints come from the environment; everything else falls
/// back to test defaults so a plain `DATABASE_URL` + `REDIS_URL` is enough.
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    for (key, value) in [
        ("API_PORT", "0"),
        ("JWT_SECRET", "integration-test-secret"),
        ("EVOLUTION_API_URL", "http://127.0.0.1:18080"),
        ("EVOLUTION_API_KEY", "test-api-key"),
    ] {
        if std::env::var(key).is_err() {
            std::env::set_var(key, value);
        }
    }

    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    Ok(config)
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    if std::env::var("REDIS_URL").is_err() {
        eprintln!("Skipping test: REDIS_URL not set");
        return false;
    }

    true
}

/// Insert a channel row directly through the repository layer.
///
/// Channel provisioning over HTTP talks to the WhatsApp gateway, which tests
/// do not run; the webhook ingestion tests only need a row with a routable
/// token.
pub async fn seed_channel(user_id: Snowflake) -> Result<Channel> {
    let pool = create_pool_from_env().await?;
    let repo = PgChannelRepository::new(pool);

    let suffix = unique_suffix();
    let channel = Channel::new(
        test_id(),
        user_id,
        format!("Test Channel {suffix}"),
        format!("test-instance-{suffix}"),
        generate_webhook_token(),
    );
    repo.create(&channel).await?;

    Ok(channel)
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
