//! Domain layer - Core value objects for the lab application shell.
//!
//! This crate contains pure logic with no runtime or HTTP dependencies:
//! credential hashing, the password value object and money formatting.

pub mod constants;
pub mod error;
pub mod money;
pub mod password;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use money::{format_currency, Currency, Locale, Money};
pub use password::{CredentialHasher, Password, WorkFactor};
