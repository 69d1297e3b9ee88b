//! Password value object and credential hashing.
//!
//! DDD: Encapsulates password hashing as a domain value object.
//! SOLID (SRP): Single responsibility - credential operations only.
//! DRY: Centralized Argon2 configuration through [`WorkFactor`].

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand_core::{OsRng, RngCore};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{
    DEFAULT_ITERATIONS, DEFAULT_MEMORY_KIB, DEFAULT_PARALLELISM, HASH_ALGORITHM, SALT_LENGTH,
    VERIFY_COST_MULTIPLIER,
};
use crate::error::{DomainError, DomainResult};

/// Argon2 cost parameters applied to newly produced hashes.
///
/// Verification runs each stored hash with its own embedded parameters, so
/// raising the factor keeps old hashes verifiable. Those parameters are only
/// bounded by the hasher's verify ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkFactor {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes over memory
    pub iterations: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl WorkFactor {
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        Self {
            memory_kib,
            iterations,
            parallelism,
        }
    }

    /// Convert to Argon2 parameters, rejecting out-of-range combinations.
    pub fn to_params(&self) -> DomainResult<Params> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| DomainError::validation(format!("Invalid work factor: {}", e)))
    }

    /// Multiply every cost by `factor`, saturating at `u32::MAX`.
    pub fn scaled(&self, factor: u32) -> Self {
        Self::new(
            self.memory_kib.saturating_mul(factor),
            self.iterations.saturating_mul(factor),
            self.parallelism.saturating_mul(factor),
        )
    }

    /// Whether `params` stays at or below this factor on every axis.
    pub fn admits(&self, params: &Params) -> bool {
        params.m_cost() <= self.memory_kib
            && params.t_cost() <= self.iterations
            && params.p_cost() <= self.parallelism
    }
}

impl Default for WorkFactor {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_KIB, DEFAULT_ITERATIONS, DEFAULT_PARALLELISM)
    }
}

/// Synchronous credential hasher.
///
/// Every call is CPU bound for the duration set by the work factor; async
/// callers must run it off the async worker threads.
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
    work_factor: WorkFactor,
    verify_ceiling: WorkFactor,
}

impl std::fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialHasher")
            .field("algorithm", &HASH_ALGORITHM)
            .field("work_factor", &self.work_factor)
            .field("verify_ceiling", &self.verify_ceiling)
            .finish()
    }
}

impl CredentialHasher {
    /// Create a hasher for the given work factor.
    ///
    /// Stored hashes declaring more than [`VERIFY_COST_MULTIPLIER`] times this
    /// factor on any axis are refused by [`verify`](Self::verify).
    ///
    /// # Errors
    /// Returns a validation error if Argon2 rejects the parameters.
    pub fn new(work_factor: WorkFactor) -> DomainResult<Self> {
        let params = work_factor.to_params()?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            work_factor,
            verify_ceiling: work_factor.scaled(VERIFY_COST_MULTIPLIER),
        })
    }

    /// Replace the highest cost a stored hash may declare.
    pub fn with_verify_ceiling(mut self, ceiling: WorkFactor) -> Self {
        self.verify_ceiling = ceiling;
        self
    }

    /// The work factor applied to new hashes.
    pub fn work_factor(&self) -> WorkFactor {
        self.work_factor
    }

    /// The highest cost a stored hash may declare and still be verified.
    pub fn verify_ceiling(&self) -> WorkFactor {
        self.verify_ceiling
    }

    /// Hash a plaintext credential with a fresh random salt.
    ///
    /// # Errors
    /// * `Validation` if the plaintext is empty
    /// * `CryptoUnavailable` if the entropy source or the primitive fails
    pub fn hash(&self, plaintext: &SecretString) -> DomainResult<Password> {
        let plain = plaintext.expose_secret();
        if plain.is_empty() {
            return Err(DomainError::validation("Password must not be empty"));
        }

        let salt = Self::fresh_salt()?;
        let hash = self
            .argon2
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| DomainError::crypto_unavailable(format!("Password hash failed: {}", e)))?;
        Ok(Password::from_hash(hash.to_string()))
    }

    /// Verify a plaintext candidate against a stored hash.
    ///
    /// Mismatch and malformed input both yield `false`, as does a hash whose
    /// declared cost exceeds the verify ceiling; such a hash is never run.
    /// The digest comparison is constant time.
    pub fn verify(&self, plaintext: &SecretString, hashed: &str) -> bool {
        let plain = plaintext.expose_secret();
        if plain.is_empty() {
            return false;
        }

        let parsed = match PasswordHash::new(hashed) {
            Ok(parsed) => parsed,
            Err(_) => {
                debug!("Stored credential hash is not a valid PHC string");
                return false;
            }
        };

        match Params::try_from(&parsed) {
            Ok(params) if self.verify_ceiling.admits(&params) => {}
            Ok(params) => {
                debug!(
                    m_cost = params.m_cost(),
                    t_cost = params.t_cost(),
                    p_cost = params.p_cost(),
                    "Stored credential hash exceeds the verify cost ceiling"
                );
                return false;
            }
            Err(_) => {
                debug!("Stored credential hash carries unusable parameters");
                return false;
            }
        }

        self.argon2
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok()
    }

    /// Whether a stored hash was produced with different parameters than the
    /// current work factor (or cannot be parsed at all).
    pub fn needs_rehash(&self, hashed: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hashed) else {
            return true;
        };

        if parsed.algorithm.as_str() != HASH_ALGORITHM
            || parsed.version != Some(Version::V0x13 as u32)
        {
            return true;
        }

        match Params::try_from(&parsed) {
            Ok(params) => {
                params.m_cost() != self.work_factor.memory_kib
                    || params.t_cost() != self.work_factor.iterations
                    || params.p_cost() != self.work_factor.parallelism
            }
            Err(_) => true,
        }
    }

    /// Draw a salt from the OS entropy source without panicking on failure.
    fn fresh_salt() -> DomainResult<SaltString> {
        let mut bytes = [0u8; SALT_LENGTH];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| DomainError::crypto_unavailable(format!("Entropy source failed: {}", e)))?;
        SaltString::encode_b64(&bytes)
            .map_err(|e| DomainError::crypto_unavailable(format!("Salt encoding failed: {}", e)))
    }
}

/// Password value object holding a stored hash.
///
/// DDD: Value object - immutable, compared by value.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a Password from an existing hash (from storage).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plaintext candidate against this hash.
    pub fn verify(&self, hasher: &CredentialHasher, plaintext: &SecretString) -> bool {
        hasher.verify(plaintext, &self.hash)
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}
