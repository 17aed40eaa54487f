// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fleet Estimator - Monte Carlo Engine

//! Drives `samples` independent draws through the three samplers and the
//! blender, then summarizes each channel.
//!
//! The observed sensor point is a plain argument: the same value feeds every
//! draw, and only the simulated noise around it varies. No draw reads
//! another's output, so the loop could be split across workers that each
//! own a `RandomSource`.

use crate::blend::blend;
use crate::histogram::Histogram;
use crate::params::{SimulationParameters, ValidationError};
use crate::random::RandomSource;
use crate::samplers::{sample_fleet, sample_sensor, sample_trips};
use crate::summary::{summarize, SummaryStatistic};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

// ─── Run Output ─────────────────────────────────────────────────────────────

/// The four parallel per-draw sequences of one run. Sensor entries are
/// `NaN` for draws with no sensor evidence.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SampleRecord {
    pub fleet: Vec<f64>,
    pub trip: Vec<f64>,
    pub sensor: Vec<f64>,
    pub blended: Vec<f64>,
}

impl SampleRecord {
    fn with_capacity(n: usize) -> Self {
        Self {
            fleet: Vec::with_capacity(n),
            trip: Vec::with_capacity(n),
            sensor: Vec::with_capacity(n),
            blended: Vec::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        self.blended.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blended.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationOutcome {
    pub fleet_stats: SummaryStatistic,
    pub trip_stats: SummaryStatistic,
    pub sensor_stats: SummaryStatistic,
    pub blended_stats: SummaryStatistic,
    pub samples: SampleRecord,
    /// Seed of the generator, when the run is reproducible from one.
    pub seed: Option<u64>,
}

impl SimulationOutcome {
    /// Bins of the blended sequence for the chart.
    pub fn histogram(&self) -> Option<Histogram> {
        Histogram::from_samples(&self.samples.blended)
    }
}

// ─── Engine ─────────────────────────────────────────────────────────────────

pub struct MonteCarloEngine<R = ChaCha8Rng> {
    source: RandomSource<R>,
    seed: Option<u64>,
}

impl MonteCarloEngine<ChaCha8Rng> {
    pub fn seeded(seed: u64) -> Self {
        Self { source: RandomSource::seeded(seed), seed: Some(seed) }
    }

    /// Entropy-seeded; the drawn seed is still recorded on each outcome.
    pub fn from_entropy() -> Self {
        let (source, seed) = RandomSource::from_entropy();
        Self { source, seed: Some(seed) }
    }
}

impl<R: Rng> MonteCarloEngine<R> {
    /// Engine over a caller-supplied source. Outcomes carry no seed.
    pub fn with_source(source: RandomSource<R>) -> Self {
        Self { source, seed: None }
    }

    /// Validate `params`, then run `params.samples` draws.
    ///
    /// `observed_sensor` is the most recent citywide sensor estimate, if
    /// any. `None`, zero, negative and non-finite points all mean "no
    /// sensor evidence".
    pub fn run(
        &mut self,
        params: &SimulationParameters,
        observed_sensor: Option<f64>,
    ) -> Result<SimulationOutcome, ValidationError> {
        params.validate()?;
        debug!(
            samples = params.samples,
            sensor_weight = params.sensor_weight,
            observed_sensor = ?observed_sensor,
            seed = ?self.seed,
            "starting estimate run"
        );

        let mut record = SampleRecord::with_capacity(params.samples);
        for _ in 0..params.samples {
            let fleet = sample_fleet(params, &mut self.source);
            let trip = sample_trips(params, &mut self.source);
            let sensor = sample_sensor(observed_sensor, &mut self.source);
            record.blended.push(blend(fleet, trip, sensor, params.sensor_weight));
            record.fleet.push(fleet);
            record.trip.push(trip);
            record.sensor.push(sensor);
        }

        let outcome = SimulationOutcome {
            fleet_stats: summarize(&record.fleet),
            trip_stats: summarize(&record.trip),
            sensor_stats: summarize(&record.sensor),
            blended_stats: summarize(&record.blended),
            samples: record,
            seed: self.seed,
        };
        info!(
            blended_mean = ?outcome.blended_stats.mean,
            blended_p5 = ?outcome.blended_stats.p5,
            blended_p95 = ?outcome.blended_stats.p95,
            sensor_draws = outcome.sensor_stats.count,
            "estimate run complete"
        );
        Ok(outcome)
    }
}
