// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fleet Estimator - Random Variate Source

//! Uniform and standard-normal variates over a seedable generator.
//!
//! Every run owns its own `RandomSource`; nothing here is shared between
//! runs, so independent runs (or threads) never contend on one stream.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::PI;

/// Source of the two variate kinds the samplers need.
pub struct RandomSource<R = ChaCha8Rng> {
    rng: R,
}

impl RandomSource<ChaCha8Rng> {
    /// Reproducible stream: the same seed yields the same draws.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Draws a fresh seed from OS entropy and returns it alongside the
    /// source so the run can still be reproduced later.
    pub fn from_entropy() -> (Self, u64) {
        let seed: u64 = rand::rngs::OsRng.gen();
        (Self::seeded(seed), seed)
    }
}

impl<R: Rng> RandomSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Uniform draw in `[min, max)`. A degenerate range returns `min`
    /// without consuming randomness.
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// Box–Muller, cosine branch only. No second value is cached, so each
    /// call consumes exactly two uniforms (plus any zero re-draws).
    pub fn standard_normal(&mut self) -> f64 {
        let u1 = self.open_unit();
        let u2 = self.open_unit();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    /// Uniform in (0, 1): zero is re-drawn so `ln` stays finite.
    fn open_unit(&mut self) -> f64 {
        loop {
            let u: f64 = self.rng.gen();
            if u > 0.0 {
                return u;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_uniform_returns_min() {
        let mut src = RandomSource::seeded(7);
        for _ in 0..100 {
            assert_eq!(src.uniform(0.25, 0.25), 0.25);
        }
    }

    #[test]
    fn uniform_stays_in_half_open_range() {
        let mut src = RandomSource::seeded(42);
        for _ in 0..10_000 {
            let x = src.uniform(10.0, 20.0);
            assert!((10.0..20.0).contains(&x), "draw {} outside [10, 20)", x);
        }
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = RandomSource::seeded(99);
        let mut b = RandomSource::seeded(99);
        for _ in 0..50 {
            assert_eq!(a.standard_normal(), b.standard_normal());
        }
    }

    #[test]
    fn standard_normal_moments() {
        let mut src = RandomSource::seeded(42);
        let n = 20_000;
        let draws: Vec<f64> = (0..n).map(|_| src.standard_normal()).collect();
        let mean = draws.iter().sum::<f64>() / n as f64;
        let var = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        assert!(mean.abs() < 0.05, "mean {} far from 0", mean);
        assert!((var - 1.0).abs() < 0.05, "variance {} far from 1", var);
        assert!(draws.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn entropy_seed_is_reported() {
        let (mut src, seed) = RandomSource::from_entropy();
        let mut replay = RandomSource::seeded(seed);
        assert_eq!(src.uniform(0.0, 1.0), replay.uniform(0.0, 1.0));
    }
}
