//! Shared configuration structures.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Base service configuration shared by all services.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    /// Host address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
}

impl ServiceConfig {
    /// Load configuration from `{PREFIX}_HOST`, `{PREFIX}_PORT` and `RUST_LOG`.
    pub fn from_env(service_name: &str, prefix: &str) -> Self {
        let defaults = Self::default();
        Self {
            service_name: service_name.to_string(),
            host: env::var(format!("{}_HOST", prefix)).unwrap_or(defaults.host),
            port: env_parse(&format!("{}_PORT", prefix)).unwrap_or(defaults.port),
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }

    /// Socket address string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "service".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
        }
    }
}

/// Read and parse an environment variable, `None` when unset or unparseable.
pub fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_env_parse_rejects_garbage() {
        env::set_var("COMMON_TEST_GARBAGE_PORT", "not-a-port");
        assert_eq!(env_parse::<u16>("COMMON_TEST_GARBAGE_PORT"), None);
        env::set_var("COMMON_TEST_VALID_PORT", " 8080 ");
        assert_eq!(env_parse::<u16>("COMMON_TEST_VALID_PORT"), Some(8080));
        assert_eq!(env_parse::<u16>("COMMON_TEST_UNSET_PORT"), None);
    }

    #[test]
    fn test_from_env_with_prefix() {
        env::set_var("COMMONTEST_HOST", "127.0.0.1");
        env::set_var("COMMONTEST_PORT", "9100");
        let config = ServiceConfig::from_env("lab", "COMMONTEST");
        assert_eq!(config.service_name, "lab");
        assert_eq!(config.bind_addr(), "127.0.0.1:9100");
    }
}
