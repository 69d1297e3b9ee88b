//! Domain-level constants.
//!
//! These constants define the credential work factor defaults and formatting rules.

// =============================================================================
// Credential Hashing
// =============================================================================

/// Default Argon2 memory cost in KiB (19 MiB)
pub const DEFAULT_MEMORY_KIB: u32 = 19 * 1024;

/// Default Argon2 iteration count
pub const DEFAULT_ITERATIONS: u32 = 2;

/// Default Argon2 degree of parallelism
pub const DEFAULT_PARALLELISM: u32 = 1;

/// Multiple of the configured work factor a stored hash may declare before
/// verification refuses to run it
pub const VERIFY_COST_MULTIPLIER: u32 = 4;

/// Salt length in bytes drawn from the OS entropy source
pub const SALT_LENGTH: usize = 16;

/// Algorithm identifier written into every new hash
pub const HASH_ALGORITHM: &str = "argon2id";

// =============================================================================
// Currency Formatting
// =============================================================================

/// Number of minor digits used by every supported currency
pub const MINOR_DIGITS: u32 = 2;

/// No-break space placed between an amount and a trailing symbol
pub const NO_BREAK_SPACE: char = '\u{00A0}';

/// Narrow no-break space used as the French group separator
pub const NARROW_NO_BREAK_SPACE: char = '\u{202F}';
