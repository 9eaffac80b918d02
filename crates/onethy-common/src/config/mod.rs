//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    ProviderConfig, RateLimitConfig, RedisConfig, ServerConfig, SnowflakeConfig,
};
