//! Credential hashing and verification.

mod credential_service;

#[cfg(any(test, feature = "mock"))]
pub use credential_service::MockCredentialService;
pub use credential_service::{CredentialService, CredentialVerifier, PoolStatus};
