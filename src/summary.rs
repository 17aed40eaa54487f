// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fleet Estimator - Sequence Summaries

//! Mean and 5th/95th percentile band over one channel's draws.
//!
//! Non-finite entries (draws with no sensor evidence) are dropped before
//! anything is computed. A sequence with no finite entries summarizes to
//! [`SummaryStatistic::UNDEFINED`], which is distinct from all-zero data.

use serde::{Deserialize, Serialize};

pub const P_LOW: f64 = 0.05;
pub const P_HIGH: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistic {
    pub mean: Option<f64>,
    pub p5: Option<f64>,
    pub p95: Option<f64>,
    /// Number of finite values the statistic was computed over.
    pub count: usize,
}

impl SummaryStatistic {
    pub const UNDEFINED: Self = Self { mean: None, p5: None, p95: None, count: 0 };

    pub fn is_defined(&self) -> bool {
        self.count > 0
    }
}

/// Linear-interpolation percentile of an ascending, non-empty slice.
/// `p` is a fraction in [0, 1].
///
/// # Panics
///
/// Panics if `sorted` is empty or `p` lies outside [0, 1].
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    assert!(!sorted.is_empty(), "percentile of an empty slice");
    assert!((0.0..=1.0).contains(&p), "percentile fraction {} outside [0, 1]", p);
    let idx = p * (sorted.len() - 1) as f64;
    let lo = idx.floor();
    let hi = idx.ceil();
    if lo == hi {
        return sorted[lo as usize];
    }
    sorted[lo as usize] * (hi - idx) + sorted[hi as usize] * (idx - lo)
}

pub fn summarize(values: &[f64]) -> SummaryStatistic {
    let mut finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return SummaryStatistic::UNDEFINED;
    }
    finite.sort_by(f64::total_cmp);

    let mean = finite.iter().sum::<f64>() / finite.len() as f64;
    SummaryStatistic {
        mean: Some(mean),
        p5: Some(percentile(&finite, P_LOW)),
        p95: Some(percentile(&finite, P_HIGH)),
        count: finite.len(),
    }
}
