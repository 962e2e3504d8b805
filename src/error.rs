//! # Error — Failure Modes of an n-th Prime Lookup
//!
//! A lookup either returns a prime or fails with one of two conditions, both
//! raised before (or instead of) producing a numeric result:
//!
//! - **InvalidIndex**: the caller passed a negative index. Checked first,
//!   before any estimation or sieving.
//! - **OutOfRange**: the sieve limit needed to reach the index cannot be
//!   represented in `u64` or exceeds the configured `max_limit`.

/// Errors from n-th prime lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NthPrimeError {
    /// Negative index passed as argument `param`.
    InvalidIndex { param: &'static str, index: i64 },
    /// Sieve limit required for `index` is not representable or exceeds `limit`.
    OutOfRange { index: u64, limit: u64 },
}

impl NthPrimeError {
    pub(crate) fn negative_index(index: i64) -> Self {
        NthPrimeError::InvalidIndex { param: "n", index }
    }

    /// Name of the offending argument, when the error is an argument error.
    pub fn param(&self) -> Option<&'static str> {
        match self {
            NthPrimeError::InvalidIndex { param, .. } => Some(param),
            NthPrimeError::OutOfRange { .. } => None,
        }
    }
}

impl std::fmt::Display for NthPrimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NthPrimeError::InvalidIndex { param, index } => write!(
                f,
                "invalid argument `{}`: index cannot be negative (got {})",
                param, index
            ),
            NthPrimeError::OutOfRange { index, limit } => write!(
                f,
                "index {} out of range: required sieve limit exceeds {}",
                index, limit
            ),
        }
    }
}

impl std::error::Error for NthPrimeError {}
