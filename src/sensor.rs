// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fleet Estimator - Sensor Evidence

//! Turning per-camera detections into one citywide point estimate.
//!
//! Image retrieval and the vehicle detector live outside this crate behind
//! [`VehicleDetector`]. A sweep samples some sources, sums the counts of
//! those that succeeded and scales by the coverage fraction. The engine
//! only ever sees the resulting scalar, held by the caller in a
//! [`SensorObservation`].

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a single source produced no count.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AcquisitionError {
    #[error("source {source_id} unreachable: {reason}")]
    Unreachable { source_id: String, reason: String },
    #[error("frame from {source_id} could not be decoded")]
    Decode { source_id: String },
    #[error("detector failed on {source_id}: {reason}")]
    Detector { source_id: String, reason: String },
}

// ---------------------------------------------------------------------------
// Detector boundary
// ---------------------------------------------------------------------------

/// Counts target vehicles visible at one source.
pub trait VehicleDetector {
    fn detect(&mut self, source_id: &str) -> Result<u32, AcquisitionError>;
}

// ---------------------------------------------------------------------------
// SensorSweep
// ---------------------------------------------------------------------------

/// Per-source outcomes of one pass over a sample of sources.
#[derive(Debug, Clone, Default)]
pub struct SensorSweep {
    pub detections: Vec<Result<u32, AcquisitionError>>,
}

impl SensorSweep {
    /// Query `detector` once per source, in order.
    pub fn collect<D, S>(detector: &mut D, sources: &[S]) -> Self
    where
        D: VehicleDetector + ?Sized,
        S: AsRef<str>,
    {
        let detections = sources
            .iter()
            .map(|s| {
                let result = detector.detect(s.as_ref());
                if let Err(e) = &result {
                    debug!(source = s.as_ref(), error = %e, "source skipped");
                }
                result
            })
            .collect();
        Self { detections }
    }

    pub fn succeeded(&self) -> usize {
        self.detections.iter().filter(|d| d.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.detections.len() - self.succeeded()
    }

    pub fn citywide_estimate(&self, coverage: f64) -> Option<f64> {
        citywide_estimate(&self.detections, coverage)
    }
}

/// Sum of successful counts divided by `coverage`.
///
/// `None` when coverage is outside (0, 1], no source succeeded, or the
/// total is zero: a zero estimate carries no usable sensor evidence.
pub fn citywide_estimate(detections: &[Result<u32, AcquisitionError>], coverage: f64) -> Option<f64> {
    if !(coverage > 0.0 && coverage <= 1.0) {
        warn!(coverage, "coverage fraction outside (0, 1]; sensor estimate unavailable");
        return None;
    }
    let mut any = false;
    let mut total = 0u64;
    for count in detections.iter().filter_map(|d| d.as_ref().ok()) {
        any = true;
        total += u64::from(*count);
    }
    if !any {
        warn!(sources = detections.len(), "no source returned a count; sensor estimate unavailable");
        return None;
    }
    if total == 0 {
        return None;
    }
    Some(total as f64 / coverage)
}

// ---------------------------------------------------------------------------
// SensorObservation
// ---------------------------------------------------------------------------

/// Caller-owned "most recent sensor estimate". The caller decides when to
/// refresh it and passes [`SensorObservation::point`] into each run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorObservation {
    estimate: Option<f64>,
}

impl SensorObservation {
    /// Keeps `estimate` only if it is finite and positive.
    pub fn new(estimate: Option<f64>) -> Self {
        Self { estimate: estimate.filter(|e| e.is_finite() && *e > 0.0) }
    }

    pub fn point(&self) -> Option<f64> {
        self.estimate
    }

    pub fn refresh(&mut self, sweep: &SensorSweep, coverage: f64) {
        *self = Self::new(sweep.citywide_estimate(coverage));
    }

    pub fn clear(&mut self) {
        self.estimate = None;
    }
}
