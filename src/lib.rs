//! # nthprime — the n-th Prime via an Adaptive Sieve of Eratosthenes
//!
//! `nth_prime(n)` returns the prime at 0-based rank `n` (rank 0 = 2). Small
//! ranks come from a fixed table; larger ones size a sieve with the prime
//! number theorem estimate `n (ln n + ln ln n)` and double the limit until
//! the sieve reaches rank `n`.
//!
//! ```
//! assert_eq!(nthprime::nth_prime(0), Ok(2));
//! assert_eq!(nthprime::nth_prime(100), Ok(547));
//! assert!(nthprime::nth_prime(-1).is_err());
//! ```
//!
//! Modules:
//! - [`estimate`]: analytic sieve limits ([`BoundEstimator`]).
//! - [`sieve`]: reference, wheel-30, and strategy dispatch.
//! - [`segmented`]: rayon-parallel segmented sieve.
//! - [`finder`]: validation, table fast path, retry loop ([`PrimeFinder`]).
//! - [`config`]: TOML-backed [`FinderConfig`].
//! - [`verify`]: GMP Miller–Rabin cross-check of results.

// Sieve limits and ranks are u64 and index in-memory arrays directly.
#[cfg(not(target_pointer_width = "64"))]
compile_error!("nthprime supports 64-bit targets only");

pub mod config;
pub mod error;
pub mod estimate;
pub mod finder;
pub mod segmented;
pub mod sieve;
pub mod verify;

pub use config::FinderConfig;
pub use error::NthPrimeError;
pub use estimate::{estimate_upper_bound, BoundEstimator, PntEstimator};
pub use finder::PrimeFinder;
pub use sieve::{sieve_of_eratosthenes, SieveStrategy};

/// The first 11 primes. Ranks below `SMALL_PRIMES.len()` are answered from
/// here without estimating a bound.
pub const SMALL_PRIMES: [u64; 11] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31];

/// The prime at 0-based rank `n` with the default configuration.
pub fn nth_prime(n: i64) -> Result<u64, NthPrimeError> {
    PrimeFinder::default().nth(n)
}
