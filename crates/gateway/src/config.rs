//! Gateway configuration.

use common::ServiceConfig;
use credential_service_lib::CredentialServiceConfig;

/// Default log filter when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Bind address and service identity
    pub service: ServiceConfig,
    /// Work factor and worker pool for credential hashing
    pub credentials: CredentialServiceConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut service = ServiceConfig::from_env("gateway", "GATEWAY");
        if std::env::var("RUST_LOG").is_err() {
            service.log_level = DEFAULT_LOG_FILTER.to_string();
        }
        Self {
            service,
            credentials: CredentialServiceConfig::from_env(),
        }
    }

    /// Apply command line overrides.
    pub fn with_bind(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.service.host = host;
        }
        if let Some(port) = port {
            self.service.port = port;
        }
        self
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "gateway".to_string(),
                log_level: DEFAULT_LOG_FILTER.to_string(),
                ..ServiceConfig::default()
            },
            credentials: CredentialServiceConfig::default(),
        }
    }
}
