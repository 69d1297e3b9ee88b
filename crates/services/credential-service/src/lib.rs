//! Credential Service Library
//!
//! Async credential verifier used by the gateway. Hashing is CPU bound, so
//! every call runs on tokio's blocking pool behind a concurrency limit.

pub mod config;
pub mod service;

pub use config::CredentialServiceConfig;
pub use service::{CredentialService, CredentialVerifier, PoolStatus};
