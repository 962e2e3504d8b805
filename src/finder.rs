//! # Finder — n-th Prime Lookup with Adaptive Bound Expansion
//!
//! Dispatch for a rank `n` (0-based, rank 0 = 2):
//!
//! 1. Reject negative `n` with [`NthPrimeError::InvalidIndex`] before any work.
//! 2. Ranks covered by [`SMALL_PRIMES`] are answered from the table; the
//!    analytic estimate is unreliable at that scale.
//! 3. Otherwise ask the [`BoundEstimator`] for a sieve limit, sieve, and while
//!    the sieve produced `<= n` primes, double the limit and sieve again.
//!
//! The loop has no fixed retry count. It ends when the sieve covers rank `n`,
//! or with [`NthPrimeError::OutOfRange`] once the next limit would exceed
//! `max_limit` (or `u64`). When doubling would overshoot `max_limit` from
//! below, one last pass runs at exactly `max_limit`.
//!
//! Each call allocates its own sieve; a `PrimeFinder` holds only
//! configuration, so sharing one across threads needs no locking.

use tracing::debug;

use crate::config::FinderConfig;
use crate::error::NthPrimeError;
use crate::estimate::{BoundEstimator, PntEstimator};
use crate::SMALL_PRIMES;

/// n-th prime finder parameterized over its bound estimator.
pub struct PrimeFinder<E: BoundEstimator = PntEstimator> {
    config: FinderConfig,
    estimator: E,
}

impl PrimeFinder<PntEstimator> {
    pub fn new(config: FinderConfig) -> Self {
        PrimeFinder {
            config,
            estimator: PntEstimator,
        }
    }
}

impl Default for PrimeFinder<PntEstimator> {
    fn default() -> Self {
        PrimeFinder::new(FinderConfig::default())
    }
}

impl<E: BoundEstimator> PrimeFinder<E> {
    /// Finder driven by a custom estimator.
    pub fn with_estimator(config: FinderConfig, estimator: E) -> Self {
        PrimeFinder { config, estimator }
    }

    /// The prime at 0-based rank `n`.
    pub fn nth(&self, n: i64) -> Result<u64, NthPrimeError> {
        let n = u64::try_from(n).map_err(|_| NthPrimeError::negative_index(n))?;
        if n < SMALL_PRIMES.len() as u64 {
            return Ok(SMALL_PRIMES[n as usize]);
        }
        self.sieve_for(n)
    }

    fn sieve_for(&self, n: u64) -> Result<u64, NthPrimeError> {
        let max_limit = self.config.max_limit;
        let out_of_range = || NthPrimeError::OutOfRange {
            index: n,
            limit: max_limit,
        };

        let mut bound = self
            .estimator
            .upper_bound(n)
            .filter(|&b| b <= max_limit)
            .ok_or_else(out_of_range)?;
        debug!(index = n, bound, strategy = %self.config.strategy, "initial sieve bound");

        let mut retries = 0u32;
        loop {
            if let Some(p) = self.locate(n, bound) {
                return Ok(p);
            }
            if bound >= max_limit {
                return Err(out_of_range());
            }
            bound = bound.saturating_mul(2).max(2).min(max_limit);
            retries += 1;
            debug!(index = n, bound, retries, "bound too small, doubling");
        }
    }

    /// Sieve up to `limit` and pick rank `n`, `None` when the sieve is short.
    fn locate(&self, n: u64, limit: u64) -> Option<u64> {
        self.config
            .strategy
            .nth_up_to(n, limit, self.config.segment_size)
    }
}
