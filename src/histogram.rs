// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fleet Estimator - Histogram Binning

//! Equal-width bins over the blended sequence, ready for a chart renderer.

use serde::{Deserialize, Serialize};

pub const MIN_BINS: usize = 10;
pub const MAX_BINS: usize = 40;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub min: f64,
    pub max: f64,
    pub bins: Vec<Bin>,
}

/// `clamp(floor(sqrt(n)), 10, 40)`
pub fn recommended_bins(n: usize) -> usize {
    ((n as f64).sqrt().floor() as usize).clamp(MIN_BINS, MAX_BINS)
}

impl Histogram {
    /// Bins the finite values of `values`; `None` when there are none.
    ///
    /// The last bin is closed on the right so `max` is counted. When every
    /// value is equal all bins have zero width and the first takes them all.
    pub fn from_samples(values: &[f64]) -> Option<Self> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return None;
        }
        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let n_bins = recommended_bins(finite.len());
        let width = (max - min) / n_bins as f64;

        let mut bins: Vec<Bin> = (0..n_bins)
            .map(|i| Bin {
                lower: min + width * i as f64,
                upper: if i + 1 == n_bins { max } else { min + width * (i + 1) as f64 },
                count: 0,
            })
            .collect();

        for v in finite {
            let idx = if width > 0.0 {
                (((v - min) / width).floor() as usize).min(n_bins - 1)
            } else {
                0
            };
            bins[idx].count += 1;
        }

        Some(Self { min, max, bins })
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Count of the fullest bin, for scaling bar heights.
    pub fn peak(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}
