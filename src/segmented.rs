//! # Segmented — Parallel Bit-Packed Sieve
//!
//! Splits `[0, limit]` into fixed-size segments and sieves each one
//! independently against the base primes up to √limit. Segments share only
//! the read-only base prime list, so rayon runs them in parallel with no
//! coordination; per-segment prime lists are concatenated in segment order,
//! which keeps the output ascending and identical to the reference sieve.
//!
//! Memory per task is one [`BitSieve`] of `segment_size` bits, independent of
//! `limit`. The base primes cost O(√limit / ln √limit) words.
//!
//! Counting and rank lookup never hold more than one segment's primes:
//! [`count_primes`] sums per-segment POPCNTs, and [`nth_segmented`] counts
//! every segment, walks the prefix sums to the segment holding the rank, and
//! re-sieves only that one.

use rayon::prelude::*;
use tracing::debug;

use crate::sieve::{isqrt, sieve_of_eratosthenes, BitSieve};

/// Smallest accepted segment size (one `BitSieve` word).
pub const MIN_SEGMENT_SIZE: usize = 64;

/// Default segment size: 2^18 integers = 32 KB of bits per segment.
pub const DEFAULT_SEGMENT_SIZE: usize = 1 << 18;

/// Segment layout over `[0, limit]` plus the base primes up to √limit.
struct Segments {
    limit: u64,
    size: u64,
    count: usize,
    base: Vec<u64>,
}

impl Segments {
    fn new(limit: u64, segment_size: usize) -> Self {
        let size = segment_size.max(MIN_SEGMENT_SIZE) as u64;
        let base = sieve_of_eratosthenes(isqrt(limit));
        let count = (limit / size + 1) as usize;
        debug!(
            limit,
            segment_size = size,
            segments = count,
            base_primes = base.len(),
            "segmented sieve"
        );
        Segments {
            limit,
            size,
            count,
            base,
        }
    }

    /// Inclusive bounds of segment `k`.
    fn bounds(&self, k: usize) -> (u64, u64) {
        let lo = k as u64 * self.size;
        (lo, lo.saturating_add(self.size - 1).min(self.limit))
    }

    fn sieve(&self, k: usize) -> (u64, BitSieve) {
        let (lo, hi) = self.bounds(k);
        (lo, sieve_segment(lo, hi, &self.base))
    }
}

/// All primes in `[2, limit]`, ascending, sieving segments of `segment_size`
/// integers in parallel. Sizes below [`MIN_SEGMENT_SIZE`] are raised to it.
pub fn segmented_primes(limit: u64, segment_size: usize) -> Vec<u64> {
    if limit < 2 {
        return vec![];
    }
    let segments = Segments::new(limit, segment_size);

    let per_segment: Vec<Vec<u64>> = (0..segments.count)
        .into_par_iter()
        .map(|k| {
            let (lo, bits) = segments.sieve(k);
            bits.iter_set_bits().map(|i| lo + i as u64).collect()
        })
        .collect();

    let total = per_segment.iter().map(Vec::len).sum();
    let mut primes = Vec::with_capacity(total);
    for segment in per_segment {
        primes.extend(segment);
    }
    primes
}

/// π(limit): number of primes in `[2, limit]`.
pub fn count_primes(limit: u64, segment_size: usize) -> u64 {
    if limit < 2 {
        return 0;
    }
    let segments = Segments::new(limit, segment_size);
    (0..segments.count)
        .into_par_iter()
        .map(|k| segments.sieve(k).1.count_ones() as u64)
        .sum()
}

/// The prime at 0-based `rank` if it lies in `[2, limit]`.
pub fn nth_segmented(rank: u64, limit: u64, segment_size: usize) -> Option<u64> {
    if limit < 2 {
        return None;
    }
    let segments = Segments::new(limit, segment_size);
    let counts: Vec<u64> = (0..segments.count)
        .into_par_iter()
        .map(|k| segments.sieve(k).1.count_ones() as u64)
        .collect();

    let mut before = 0u64;
    for (k, &count) in counts.iter().enumerate() {
        if rank < before + count {
            let (lo, bits) = segments.sieve(k);
            let offset = bits.iter_set_bits().nth((rank - before) as usize)?;
            return Some(lo + offset as u64);
        }
        before += count;
    }
    None
}

/// Sieve `[lo, hi]` given every prime up to √hi in `base`. Set bits mark
/// primes at offset `value - lo`.
fn sieve_segment(lo: u64, hi: u64, base: &[u64]) -> BitSieve {
    let len = (hi - lo + 1) as usize;
    let mut bits = BitSieve::new_all_set(len);

    // 0 and 1 are not prime
    for v in lo..=hi.min(1) {
        bits.clear((v - lo) as usize);
    }

    for &p in base {
        let sq = p * p;
        if sq > hi {
            break;
        }
        // First multiple of p in the segment, never below p² (smaller
        // multiples have a smaller prime factor).
        let first = lo.div_ceil(p) * p;
        let start = first.max(sq);
        for m in (start..=hi).step_by(p as usize) {
            bits.clear((m - lo) as usize);
        }
    }
    bits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment_primes(lo: u64, hi: u64, base: &[u64]) -> Vec<u64> {
        sieve_segment(lo, hi, base)
            .iter_set_bits()
            .map(|i| lo + i as u64)
            .collect()
    }

    #[test]
    fn empty_below_two() {
        assert!(segmented_primes(0, 1024).is_empty());
        assert!(segmented_primes(1, 1024).is_empty());
        assert_eq!(segmented_primes(2, 1024), vec![2]);
        assert_eq!(count_primes(1, 1024), 0);
        assert_eq!(nth_segmented(0, 1, 1024), None);
        assert_eq!(nth_segmented(0, 2, 1024), Some(2));
    }

    #[test]
    fn thirty() {
        assert_eq!(
            segmented_primes(30, 64),
            vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]
        );
    }

    /// Limits landing exactly on, just before, and just after segment edges.
    #[test]
    fn matches_reference_at_segment_edges() {
        for limit in [63u64, 64, 65, 127, 128, 129, 1023, 1024, 1025, 4095, 4096] {
            let reference = sieve_of_eratosthenes(limit);
            assert_eq!(segmented_primes(limit, 64), reference, "limit {}", limit);
            assert_eq!(count_primes(limit, 64), reference.len() as u64, "limit {}", limit);
        }
    }

    #[test]
    fn segment_size_does_not_change_output() {
        let reference = sieve_of_eratosthenes(100_000);
        for size in [1usize, 64, 100, 1000, 4096, DEFAULT_SEGMENT_SIZE] {
            assert_eq!(segmented_primes(100_000, size), reference, "size {}", size);
            assert_eq!(count_primes(100_000, size), 9592, "size {}", size);
        }
    }

    #[test]
    fn known_count_one_million() {
        assert_eq!(count_primes(1_000_000, DEFAULT_SEGMENT_SIZE), 78_498);
        assert_eq!(segmented_primes(1_000_000, DEFAULT_SEGMENT_SIZE).len(), 78_498);
    }

    /// Ranks at the first and last prime of a segment must not slip into
    /// the neighboring segment.
    #[test]
    fn nth_segmented_every_rank_small_segments() {
        let reference = sieve_of_eratosthenes(5_000);
        for (rank, &p) in reference.iter().enumerate() {
            assert_eq!(nth_segmented(rank as u64, 5_000, 64), Some(p), "rank {}", rank);
        }
        assert_eq!(nth_segmented(reference.len() as u64, 5_000, 64), None);
    }

    /// A segment that starts mid-range must not strike a base prime that
    /// lies inside it.
    #[test]
    fn sieve_segment_keeps_base_primes() {
        let base = sieve_of_eratosthenes(isqrt(200));
        let expected: Vec<u64> = sieve_of_eratosthenes(200)
            .into_iter()
            .filter(|&p| p >= 100)
            .collect();
        assert_eq!(segment_primes(100, 200, &base), expected);
        assert_eq!(segment_primes(0, 10, &base), vec![2, 3, 5, 7]);
    }
}
