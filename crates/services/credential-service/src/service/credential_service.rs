//! Credential service - Hashes and verifies plaintext credentials.
//!
//! SOLID (SRP): Handles credential concerns only.
//! DDD: Delegates the algorithm to the domain `CredentialHasher`.

use async_trait::async_trait;
use secrecy::SecretString;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, error};

use crate::config::CredentialServiceConfig;
use domain::{CredentialHasher, DomainError, DomainResult, Password};

/// Snapshot of the blocking worker pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolStatus {
    /// Maximum concurrent hash/verify operations
    pub capacity: usize,
    /// Slots free right now
    pub available: usize,
}

/// Credential service trait for dependency injection.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait CredentialService: Send + Sync {
    /// Hash a plaintext credential with a fresh salt
    async fn hash(&self, plaintext: SecretString) -> DomainResult<String>;

    /// Verify a plaintext candidate against a stored hash; never fails
    async fn verify(&self, plaintext: SecretString, hashed: String) -> bool;

    /// Whether the stored hash should be upgraded to the current work factor
    fn needs_rehash(&self, hashed: &str) -> bool;

    /// Current worker pool occupancy
    fn pool_status(&self) -> PoolStatus;
}

/// Concrete implementation running the domain hasher on tokio's blocking pool.
pub struct CredentialVerifier {
    hasher: Arc<CredentialHasher>,
    permits: Arc<Semaphore>,
    capacity: usize,
}

impl CredentialVerifier {
    /// Create a verifier allowing at most `max_concurrent` operations at once.
    pub fn new(hasher: CredentialHasher, max_concurrent: usize) -> Self {
        let capacity = max_concurrent.max(1);
        Self {
            hasher: Arc::new(hasher),
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Build from configuration.
    ///
    /// # Errors
    /// Returns a validation error if the configured work factor is rejected.
    pub fn from_config(config: &CredentialServiceConfig) -> DomainResult<Self> {
        let hasher = CredentialHasher::new(config.work_factor)?;
        Ok(Self::new(hasher, config.max_concurrent))
    }

    /// The synchronous hasher backing this service
    pub fn hasher(&self) -> &CredentialHasher {
        &self.hasher
    }

    /// Stop accepting work; later hashes fail with `CryptoUnavailable`.
    pub fn close(&self) {
        self.permits.close();
    }

    /// Run `op` on the blocking pool while holding a worker permit.
    async fn run_blocking<T, F>(&self, operation: &'static str, op: F) -> DomainResult<T>
    where
        F: FnOnce(&CredentialHasher) -> T + Send + 'static,
        T: Send + 'static,
    {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| {
                error!(operation, "Credential worker pool is closed");
                DomainError::crypto_unavailable("credential worker pool is closed")
            })?;
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            op(&hasher)
        })
        .await
        .map_err(|e| {
            error!(operation, "Credential worker failed: {}", e);
            DomainError::crypto_unavailable(format!("credential worker failed during {}", operation))
        })
    }
}

#[async_trait]
impl CredentialService for CredentialVerifier {
    async fn hash(&self, plaintext: SecretString) -> DomainResult<String> {
        let started = Instant::now();
        let hash = self
            .run_blocking("hash", move |hasher| {
                hasher.hash(&plaintext).map(Password::into_string)
            })
            .await??;

        debug!(elapsed_ms = started.elapsed().as_millis() as u64, "Credential hashed");
        Ok(hash)
    }

    async fn verify(&self, plaintext: SecretString, hashed: String) -> bool {
        let started = Instant::now();
        match self
            .run_blocking("verify", move |hasher| hasher.verify(&plaintext, &hashed))
            .await
        {
            Ok(valid) => {
                debug!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    valid, "Credential verified"
                );
                valid
            }
            Err(e) => {
                error!("Credential verification could not run: {}", e);
                false
            }
        }
    }

    fn needs_rehash(&self, hashed: &str) -> bool {
        self.hasher.needs_rehash(hashed)
    }

    fn pool_status(&self) -> PoolStatus {
        PoolStatus {
            capacity: self.capacity,
            available: self.permits.available_permits(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use domain::WorkFactor;

    fn secret(plain: &str) -> SecretString {
        SecretString::from(plain.to_string())
    }

    fn verifier(work_factor: WorkFactor, max_concurrent: usize) -> CredentialVerifier {
        CredentialVerifier::new(CredentialHasher::new(work_factor).unwrap(), max_concurrent)
    }

    fn fast_verifier() -> CredentialVerifier {
        verifier(WorkFactor::new(64, 1, 1), 2)
    }

    #[tokio::test]
    async fn test_hash_then_verify() {
        let service = fast_verifier();
        let hash = service.hash(secret("lab-tech-pass")).await.unwrap();

        assert!(service.verify(secret("lab-tech-pass"), hash.clone()).await);
        assert!(!service.verify(secret("lab-tech-pas"), hash).await);
    }

    #[tokio::test]
    async fn test_fresh_salt_per_hash() {
        let service = fast_verifier();
        let first = service.hash(secret("same")).await.unwrap();
        let second = service.hash(secret("same")).await.unwrap();

        assert_ne!(first, second);
        assert!(service.verify(secret("same"), first).await);
        assert!(service.verify(secret("same"), second).await);
    }

    #[tokio::test]
    async fn test_malformed_hash_is_false() {
        let service = fast_verifier();
        assert!(!service.verify(secret("x"), "$argon2id$broken".to_string()).await);
        assert!(!service.verify(secret("x"), String::new()).await);
    }

    #[tokio::test]
    async fn test_empty_plaintext_is_validation_error() {
        let service = fast_verifier();
        let result = service.hash(secret("")).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_closed_pool_is_crypto_unavailable() {
        let service = fast_verifier();
        let hash = service.hash(secret("before-close")).await.unwrap();
        service.close();

        let result = service.hash(secret("after-close")).await;
        assert!(matches!(result, Err(DomainError::CryptoUnavailable(_))));
        assert!(!service.verify(secret("before-close"), hash).await);
    }

    #[tokio::test]
    async fn test_panicked_worker_is_crypto_unavailable() {
        let service = fast_verifier();

        let result = service
            .run_blocking::<String, _>("hash", |_| panic!("argon2 worker crashed"))
            .await;
        match result {
            Err(DomainError::CryptoUnavailable(msg)) => assert!(msg.contains("hash")),
            other => panic!("expected CryptoUnavailable, got {:?}", other),
        }

        // The permit is returned during unwinding and the pool keeps serving
        assert_eq!(service.pool_status().available, 2);
        let hash = service.hash(secret("after-panic")).await.unwrap();
        assert!(service.verify(secret("after-panic"), hash).await);
    }

    #[tokio::test]
    async fn test_inflated_cost_hash_is_refused() {
        let service = fast_verifier();
        let hash = service.hash(secret("night-shift")).await.unwrap();
        let inflated = hash.replace("m=64,t=1,p=1", "m=4194304,t=64,p=1");

        assert!(!service.verify(secret("night-shift"), inflated).await);
        assert_eq!(service.pool_status().available, 2);
    }

    #[tokio::test]
    async fn test_permits_released_after_use() {
        let service = fast_verifier();
        assert_eq!(
            service.pool_status(),
            PoolStatus {
                capacity: 2,
                available: 2
            }
        );

        let (a, b, c) = tokio::join!(
            service.hash(secret("one")),
            service.hash(secret("two")),
            service.hash(secret("three")),
        );
        assert!(a.is_ok() && b.is_ok() && c.is_ok());
        assert_eq!(service.pool_status().available, 2);
    }

    #[tokio::test]
    async fn test_zero_capacity_is_clamped() {
        let service = verifier(WorkFactor::new(64, 1, 1), 0);
        assert_eq!(service.pool_status().capacity, 1);
        assert!(service.hash(secret("still-works")).await.is_ok());
    }

    #[tokio::test]
    async fn test_hashing_does_not_block_the_runtime() {
        // current_thread runtime: the ticker only advances if hashing is offloaded
        let service = verifier(WorkFactor::new(4096, 3, 1), 1);
        let ticks = Arc::new(AtomicUsize::new(0));

        let ticker = {
            let ticks = Arc::clone(&ticks);
            tokio::spawn(async move {
                loop {
                    tokio::time::sleep(Duration::from_millis(1)).await;
                    ticks.fetch_add(1, Ordering::SeqCst);
                }
            })
        };

        service.hash(secret("slow-enough")).await.unwrap();
        ticker.abort();
        assert!(ticks.load(Ordering::SeqCst) > 0);
    }

    #[tokio::test]
    async fn test_rehash_flag_follows_work_factor() {
        let old = fast_verifier();
        let hash = old.hash(secret("upgrade-me")).await.unwrap();
        assert!(!old.needs_rehash(&hash));

        let raised = verifier(WorkFactor::new(256, 2, 1), 2);
        assert!(raised.verify(secret("upgrade-me"), hash.clone()).await);
        assert!(raised.needs_rehash(&hash));
    }

    #[test]
    fn test_from_config_rejects_bad_work_factor() {
        let config = CredentialServiceConfig {
            work_factor: WorkFactor::new(1, 1, 1),
            max_concurrent: 1,
        };
        assert!(matches!(
            CredentialVerifier::from_config(&config),
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_mock_service_contract() {
        let mut mock = MockCredentialService::new();
        mock.expect_verify().returning(|_, hashed| hashed == "stored");
        mock.expect_pool_status().return_const(PoolStatus {
            capacity: 1,
            available: 1,
        });

        let service: Arc<dyn CredentialService> = Arc::new(mock);
        assert!(service.verify(secret("any"), "stored".to_string()).await);
        assert!(!service.verify(secret("any"), "other".to_string()).await);
        assert_eq!(service.pool_status().capacity, 1);
    }
}
