//! Application configuration structs
//!
//! Loads configuration from environment variables.

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub provider: ProviderConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub snowflake: SnowflakeConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
    /// Publicly reachable base URL, used to build per-channel webhook URLs
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
}

/// WhatsApp gateway provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
    #[serde(default = "default_provider_timeout")]
    pub timeout_seconds: u64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "onethy-server".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_public_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_access_token_expiry() -> i64 {
    86400 // 24 hours
}

fn default_provider_timeout() -> u64 {
    30
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

/// Read a required environment variable
fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingVar(key))
}

/// Read an optional environment variable with a fallback
fn string_or(key: &str, fallback: impl FnOnce() -> String) -> String {
    env::var(key).unwrap_or_else(|_| fallback())
}

/// Read and parse an optional environment variable with a fallback
fn parsed_or<T: std::str::FromStr>(key: &str, fallback: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(fallback)
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Pull in a .env file when one exists
        let _ = dotenvy::dotenv();

        let env = match string_or("APP_ENV", || "development".into()).to_lowercase().as_str() {
            "production" => Environment::Production,
            "staging" => Environment::Staging,
            _ => Environment::Development,
        };

        Ok(Self {
            app: AppSettings {
                name: string_or("APP_NAME", default_app_name),
                env,
                public_url: string_or("PUBLIC_URL", default_public_url),
            },
            api: ServerConfig {
                host: string_or("API_HOST", default_host),
                port: env::var("API_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .ok_or(ConfigError::MissingVar("API_PORT"))?,
            },
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: parsed_or("DATABASE_MAX_CONNECTIONS", default_max_connections()),
                min_connections: parsed_or("DATABASE_MIN_CONNECTIONS", default_min_connections()),
            },
            redis: RedisConfig {
                url: required("REDIS_URL")?,
                max_connections: parsed_or(
                    "REDIS_MAX_CONNECTIONS",
                    default_redis_max_connections(),
                ),
            },
            jwt: JwtConfig {
                secret: required("JWT_SECRET")?,
                access_token_expiry: parsed_or(
                    "JWT_ACCESS_TOKEN_EXPIRY",
                    default_access_token_expiry(),
                ),
            },
            provider: ProviderConfig {
                base_url: required("EVOLUTION_API_URL")?,
                api_key: required("EVOLUTION_API_KEY")?,
                timeout_seconds: parsed_or("EVOLUTION_API_TIMEOUT", default_provider_timeout()),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parsed_or(
                    "RATE_LIMIT_REQUESTS_PER_SECOND",
                    default_requests_per_second(),
                ),
                burst: parsed_or("RATE_LIMIT_BURST", default_burst()),
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| s.split(',').map(str::trim).map(String::from).collect())
                    .unwrap_or_default(),
            },
            snowflake: SnowflakeConfig {
                worker_id: parsed_or("WORKER_ID", 0),
            },
        })
    }

    /// Webhook callback URL for a channel token
    #[must_use]
    pub fn webhook_url(&self, webhook_token: &str) -> String {
        format!(
            "{}/webhook/{webhook_token}",
            self.app.public_url.trim_end_matches('/')
        )
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_is_production() {
        assert!(!Environment::Development.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 3001,
        };
        assert_eq!(config.address(), "0.0.0.0:3001");
    }

    #[test]
    fn test_webhook_url_trims_trailing_slash() {
        let config = AppConfig {
            app: AppSettings {
                name: default_app_name(),
                env: Environment::Development,
                public_url: "https://api.example.com/".to_string(),
            },
            api: ServerConfig {
                host: default_host(),
                port: 3001,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 1,
                min_connections: 1,
            },
            redis: RedisConfig {
                url: String::new(),
                max_connections: 1,
            },
            jwt: JwtConfig {
                secret: "secret".to_string(),
                access_token_expiry: 60,
            },
            provider: ProviderConfig {
                base_url: String::new(),
                api_key: String::new(),
                timeout_seconds: 5,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: 1,
                burst: 1,
            },
            cors: CorsConfig {
                allowed_origins: vec![],
            },
            snowflake: SnowflakeConfig { worker_id: 0 },
        };
        assert_eq!(
            config.webhook_url("abc123"),
            "https://api.example.com/webhook/abc123"
        );
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_app_name(), "onethy-server");
        assert_eq!(default_host(), "127.0.0.1");
        assert_eq!(default_max_connections(), 20);
        assert_eq!(default_access_token_expiry(), 86400);
    }
}
