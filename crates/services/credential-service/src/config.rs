//! Credential service configuration.

use common::env_parse;
use domain::WorkFactor;

/// Credential service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialServiceConfig {
    /// Cost parameters for newly produced hashes
    pub work_factor: WorkFactor,
    /// Maximum number of hash/verify operations running at once
    pub max_concurrent: usize,
}

impl CredentialServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            work_factor: WorkFactor {
                memory_kib: env_parse("CREDENTIAL_MEMORY_KIB")
                    .unwrap_or(defaults.work_factor.memory_kib),
                iterations: env_parse("CREDENTIAL_ITERATIONS")
                    .unwrap_or(defaults.work_factor.iterations),
                parallelism: env_parse("CREDENTIAL_PARALLELISM")
                    .unwrap_or(defaults.work_factor.parallelism),
            },
            max_concurrent: env_parse::<usize>("CREDENTIAL_MAX_CONCURRENT")
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_concurrent),
        }
    }
}

impl Default for CredentialServiceConfig {
    fn default() -> Self {
        Self {
            work_factor: WorkFactor::default(),
            max_concurrent: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
        }
    }
}
