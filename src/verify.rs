//! # Verify — Independent Primality Cross-Check
//!
//! Confirms a finder result without trusting the sieve: trial division by a
//! fixed small-prime table, then Miller–Rabin through GMP (`rug`). Used by
//! `nthprime nth --verify` and by the property tests.
//!
//! Composites are rejected early by a two-round pre-screen; only survivors
//! pay for the full round count.

use anyhow::Result;
use rug::integer::IsPrime;
use rug::Integer;

/// Default Miller–Rabin rounds.
pub const DEFAULT_MR_ROUNDS: u32 = 25;

/// Small primes for the trial-division pre-filter.
const TRIAL_PRIMES: [u32; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// Returns `Some(verdict)` when trial division by the table settles
/// primality of `n`, `None` when `n` needs a probabilistic test.
fn trial_division(n: u64) -> Option<bool> {
    if n < 2 {
        return Some(false);
    }
    for &p in &TRIAL_PRIMES {
        let p = p as u64;
        if n == p {
            return Some(true);
        }
        if n % p == 0 {
            return Some(false);
        }
    }
    // No factor <= 97 and n < 101² means prime.
    if n < 101 * 101 {
        return Some(true);
    }
    None
}

/// Two-round Miller–Rabin pre-screen, then the full `mr_rounds`.
pub fn mr_screened_test(candidate: &Integer, mr_rounds: u32) -> IsPrime {
    if mr_rounds > 2 && candidate.is_probably_prime(2) == IsPrime::No {
        return IsPrime::No;
    }
    candidate.is_probably_prime(mr_rounds)
}

/// True when `n` is prime (or probably prime after `mr_rounds` rounds).
pub fn is_probable_prime(n: u64, mr_rounds: u32) -> bool {
    if let Some(verdict) = trial_division(n) {
        return verdict;
    }
    mr_screened_test(&Integer::from(n), mr_rounds) != IsPrime::No
}

/// Fail unless `p`, reported as the prime at rank `n`, passes primality.
pub fn check_nth(n: u64, p: u64) -> Result<()> {
    if !is_probable_prime(p, DEFAULT_MR_ROUNDS) {
        anyhow::bail!("verification failed: rank {} returned composite {}", n, p);
    }
    Ok(())
}
