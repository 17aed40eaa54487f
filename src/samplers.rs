// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fleet Estimator - Channel Samplers

//! One draw per channel per iteration.
//!
//! Fleet and trip channels are generative models over parameter ranges. The
//! sensor channel perturbs an externally observed point estimate with
//! log-normal noise. A missing sensor estimate is not an error: the sampler
//! returns `NaN` and the blender and summarizer skip it.

use crate::params::SimulationParameters;
use crate::random::RandomSource;
use rand::Rng;

/// Relative standard deviation assumed for the sensor's citywide estimate.
pub const SENSOR_RELATIVE_SD: f64 = 0.3;

/// `fleet_size × share × utilization`, share and utilization uniform over
/// their ranges.
pub fn sample_fleet<R: Rng>(params: &SimulationParameters, rng: &mut RandomSource<R>) -> f64 {
    let share = rng.uniform(params.sf_share_min, params.sf_share_max);
    let utilization = rng.uniform(params.util_min, params.util_max);
    params.fleet_size * share * utilization
}

/// Daily trips divided by a uniform trips-per-vehicle draw. Zero demand is
/// returned exactly, with no randomness consumed.
pub fn sample_trips<R: Rng>(params: &SimulationParameters, rng: &mut RandomSource<R>) -> f64 {
    if params.trips_per_day <= 0.0 {
        return 0.0;
    }
    let trips_per_car = rng.uniform(params.tpc_min, params.tpc_max);
    params.trips_per_day / trips_per_car
}

/// Log-normal draw with mean `point` and sd `SENSOR_RELATIVE_SD × point`.
/// Returns `NaN` when `point` is not a finite positive number.
pub fn sample_sensor<R: Rng>(point: Option<f64>, rng: &mut RandomSource<R>) -> f64 {
    let Some(mean) = point.filter(|p| p.is_finite() && *p > 0.0) else {
        return f64::NAN;
    };
    let (mu, sigma) = lognormal_params(mean, SENSOR_RELATIVE_SD * mean);
    (mu + sigma * rng.standard_normal()).exp()
}

/// Log-space `(μ, σ)` of a log-normal with the given arithmetic mean and sd.
fn lognormal_params(mean: f64, sd: f64) -> (f64, f64) {
    let ratio = sd / mean;
    let variance_ratio = ratio * ratio;
    let sigma_sq = (1.0 + variance_ratio).ln();
    (mean.ln() - sigma_sq / 2.0, sigma_sq.sqrt())
}
