//! Shared application state
//!
//! One `AppState` clone per request: the service context (repositories,
//! cache, gateway client) plus the loaded configuration.

use std::sync::Arc;

use onethy_common::{AppConfig, JwtService};
use onethy_service::ServiceContext;

/// State handed to every handler
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    config: Arc<AppConfig>,
}

impl AppState {
    /// Wrap the service context and configuration for sharing
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
        }
    }

    /// The service dependency container
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// The loaded configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Bearer-token validator, shared with the service context
    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config.app.name)
            .finish()
    }
}
