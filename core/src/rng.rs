//! Deterministic random number generation.
//!
//! RULE: Nothing in the generator may call any platform RNG.
//! All randomness flows through a single GenRng seeded once, before
//! the catalog is built, and passed by `&mut` into every stage.
//!
//! Draw order is part of the output contract: the same seed and the
//! same config must reproduce byte-identical tables, so stages consume
//! the stream in a fixed order (see order.rs for the per-order order).

use crate::error::{GenError, GenResult};
use chrono::{Duration, NaiveDate};
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// The single deterministic random stream for one generation run.
pub struct GenRng {
    inner: Pcg64Mcg,
}

impl GenRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Roll an integer in [lo, hi], both ends inclusive.
    pub fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        assert!(lo <= hi, "empty range {lo}..={hi}");
        lo + self.next_u64_below(u64::from(hi - lo) + 1) as u32
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Pick an index with probability `weights[i] / sum(weights)`.
    ///
    /// Walks the weights subtracting each in turn. If floating-point
    /// drift leaves a remainder after the last weight, the last index
    /// is returned.
    pub fn weighted_index(&mut self, weights: &[u32]) -> GenResult<usize> {
        if weights.is_empty() {
            return Err(GenError::InvalidWeights {
                reason: "weight sequence is empty",
            });
        }
        let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
        if total == 0 {
            return Err(GenError::InvalidWeights {
                reason: "weights sum to zero",
            });
        }

        let mut roll = self.next_f64() * total as f64;
        for (i, &weight) in weights.iter().enumerate() {
            let weight = f64::from(weight);
            if roll < weight {
                return Ok(i);
            }
            roll -= weight;
        }
        Ok(weights.len() - 1)
    }

    /// Weighted choice over a `(value, weight)` table.
    pub fn weighted_pick<T: Copy>(&mut self, table: &[(T, u32)]) -> GenResult<T> {
        let weights: Vec<u32> = table.iter().map(|&(_, w)| w).collect();
        let index = self.weighted_index(&weights)?;
        Ok(table[index].0)
    }

    /// Uniform date in [start, end] at day granularity.
    ///
    /// A negative span collapses to `start`. One draw is consumed either
    /// way so the stream position never depends on the dates.
    pub fn date_between(&mut self, start: NaiveDate, end: NaiveDate) -> NaiveDate {
        let span = (end - start).num_days().max(0) as u64;
        let offset = self.next_u64_below(span + 1);
        start + Duration::days(offset as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = GenRng::new(42);
        let mut b = GenRng::new(42);
        for _ in 0..1000 {
            assert_eq!(a.next_u64_below(1_000_000), b.next_u64_below(1_000_000));
        }
    }

    #[test]
    fn next_f64_is_in_unit_interval() {
        let mut rng = GenRng::new(7);
        for _ in 0..10_000 {
            let x = rng.next_f64();
            assert!((0.0..1.0).contains(&x), "{x} out of [0, 1)");
        }
    }

    #[test]
    fn range_inclusive_hits_both_ends() {
        let mut rng = GenRng::new(3);
        let mut seen = [false; 3];
        for _ in 0..1000 {
            let v = rng.range_inclusive(1, 3);
            assert!((1..=3).contains(&v));
            seen[(v - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "every value in 1..=3 should appear");
    }

    #[test]
    fn uniform_weights_are_roughly_uniform() {
        let mut rng = GenRng::new(42);
        let mut counts = [0usize; 4];
        const DRAWS: usize = 100_000;
        for _ in 0..DRAWS {
            counts[rng.weighted_index(&[1, 1, 1, 1]).unwrap()] += 1;
        }
        for (i, &c) in counts.iter().enumerate() {
            let freq = c as f64 / DRAWS as f64;
            assert!(
                (freq - 0.25).abs() < 0.01,
                "index {i} frequency {freq:.4} too far from 0.25"
            );
        }
    }

    #[test]
    fn zero_weights_are_never_selected() {
        let mut rng = GenRng::new(9);
        for _ in 0..10_000 {
            assert_eq!(rng.weighted_index(&[0, 0, 5]).unwrap(), 2);
        }
    }

    #[test]
    fn skewed_weights_follow_proportions() {
        let mut rng = GenRng::new(11);
        let mut counts = [0usize; 3];
        const DRAWS: usize = 100_000;
        for _ in 0..DRAWS {
            counts[rng.weighted_index(&[70, 25, 5]).unwrap()] += 1;
        }
        let freq: Vec<f64> = counts.iter().map(|&c| c as f64 / DRAWS as f64).collect();
        assert!((freq[0] - 0.70).abs() < 0.01);
        assert!((freq[1] - 0.25).abs() < 0.01);
        assert!((freq[2] - 0.05).abs() < 0.01);
    }

    #[test]
    fn empty_and_all_zero_weights_are_rejected() {
        let mut rng = GenRng::new(1);
        assert!(matches!(
            rng.weighted_index(&[]),
            Err(GenError::InvalidWeights { .. })
        ));
        assert!(matches!(
            rng.weighted_index(&[0, 0, 0]),
            Err(GenError::InvalidWeights { .. })
        ));
    }

    #[test]
    fn weighted_pick_returns_table_value() {
        let mut rng = GenRng::new(5);
        for _ in 0..100 {
            assert_eq!(rng.weighted_pick(&[("never", 0), ("always", 3)]).unwrap(), "always");
        }
    }

    #[test]
    fn date_between_stays_in_window() {
        let mut rng = GenRng::new(21);
        let (start, end) = (date(2022, 1, 1), date(2022, 1, 10));
        let mut hit_start = false;
        let mut hit_end = false;
        for _ in 0..2000 {
            let d = rng.date_between(start, end);
            assert!(d >= start && d <= end, "{d} outside window");
            hit_start |= d == start;
            hit_end |= d == end;
        }
        assert!(hit_start && hit_end, "both window ends should be reachable");
    }

    #[test]
    fn inverted_window_collapses_to_start() {
        let mut rng = GenRng::new(21);
        let start = date(2024, 6, 1);
        for _ in 0..100 {
            assert_eq!(rng.date_between(start, date(2024, 1, 1)), start);
        }
    }

    #[test]
    fn inverted_window_still_consumes_a_draw() {
        let mut a = GenRng::new(8);
        let mut b = GenRng::new(8);
        a.date_between(date(2024, 6, 1), date(2024, 1, 1));
        b.next_u64();
        assert_eq!(a.next_u64(), b.next_u64());
    }
}
