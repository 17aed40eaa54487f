// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fleet Estimator - Channel Blending

//! Convex combination of the fleet, trip and sensor channels.
//!
//! Without sensor evidence (or with zero sensor weight) the result is the
//! plain fleet/trip average. It is never a renormalized three-channel blend.

use serde::{Deserialize, Serialize};

/// Coefficients applied to each channel for one draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    pub fleet: f64,
    pub trip: f64,
    pub sensor: f64,
}

impl BlendWeights {
    /// Weights in effect for a draw whose sensor sample is `sensor`.
    pub fn for_draw(sensor: f64, sensor_weight: f64) -> Self {
        if !sensor.is_finite() || sensor_weight == 0.0 {
            return Self { fleet: 0.5, trip: 0.5, sensor: 0.0 };
        }
        let rest = (1.0 - sensor_weight) / 2.0;
        Self { fleet: rest, trip: rest, sensor: sensor_weight }
    }

    pub fn total(&self) -> f64 {
        self.fleet + self.trip + self.sensor
    }
}

/// Blended estimate for one draw. Finite whenever `fleet` and `trip` are.
pub fn blend(fleet: f64, trip: f64, sensor: f64, sensor_weight: f64) -> f64 {
    let w = BlendWeights::for_draw(sensor, sensor_weight);
    if w.sensor == 0.0 {
        // NaN * 0 is NaN, so the sensor term is left out entirely.
        return w.fleet * fleet + w.trip * trip;
    }
    w.fleet * fleet + w.trip * trip + w.sensor * sensor
}
