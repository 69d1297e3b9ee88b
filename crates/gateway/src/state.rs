//! Application state for dependency injection.

use std::sync::Arc;
use std::time::Instant;

use credential_service_lib::CredentialService;

use crate::config::GatewayConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<dyn CredentialService>,
    pub config: GatewayConfig,
    pub started_at: Instant,
}

impl AppState {
    /// Create new app state.
    pub fn new(credentials: Arc<dyn CredentialService>, config: GatewayConfig) -> Self {
        Self {
            credentials,
            config,
            started_at: Instant::now(),
        }
    }
}
