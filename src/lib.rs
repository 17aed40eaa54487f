// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fleet Estimator - citywide robotaxi count from blended evidence

pub mod random;
pub mod params;
pub mod samplers;
pub mod blend;
pub mod summary;
pub mod histogram;
pub mod engine;
pub mod sensor;

pub use params::{ConfigError, SimulationParameters, ValidationError, MIN_SAMPLES};
pub use blend::{blend, BlendWeights};
pub use summary::{percentile, summarize, SummaryStatistic};
pub use histogram::Histogram;
pub use engine::{MonteCarloEngine, SampleRecord, SimulationOutcome};
pub use random::RandomSource;
pub use sensor::{citywide_estimate, AcquisitionError, SensorObservation, SensorSweep, VehicleDetector};

use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

// ─── WASM Interface ──────────────────────────────────────────────────────────

/// What the browser receives from one run: the four summaries, the blended
/// draws for the chart and the bins computed from them.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EstimateView<'a> {
    fleet_stats: &'a SummaryStatistic,
    trip_stats: &'a SummaryStatistic,
    sensor_stats: &'a SummaryStatistic,
    blended_stats: &'a SummaryStatistic,
    blended: &'a [f64],
    histogram: Option<Histogram>,
    /// Decimal string: seeds exceed the integer range of a JS number.
    seed: Option<String>,
}

#[wasm_bindgen]
pub struct FleetEstimator {
    params: SimulationParameters,
    sensor: SensorObservation,
}

#[wasm_bindgen]
impl FleetEstimator {
    /// Parameters arrive as the form's camelCase object; missing fields take
    /// their defaults. Rejected up front if any field is out of range.
    #[wasm_bindgen(constructor)]
    pub fn new(params: JsValue) -> Result<FleetEstimator, JsValue> {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        let params: SimulationParameters = if params.is_undefined() || params.is_null() {
            SimulationParameters::default()
        } else {
            serde_wasm_bindgen::from_value(params).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        params.validate().map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { params, sensor: SensorObservation::default() })
    }

    /// Record a fresh citywide sensor estimate from per-camera counts.
    /// Returns the estimate kept, or `undefined` if it was unusable.
    pub fn record_sensor_sweep(&mut self, counts: Vec<u32>, coverage: f64) -> Option<f64> {
        let sweep = SensorSweep { detections: counts.into_iter().map(Ok).collect() };
        self.sensor.refresh(&sweep, coverage);
        if self.sensor.point().is_none() {
            log("sensor sweep produced no usable estimate");
        }
        self.sensor.point()
    }

    pub fn set_sensor_estimate(&mut self, estimate: f64) {
        self.sensor = SensorObservation::new(Some(estimate));
    }

    pub fn clear_sensor_estimate(&mut self) {
        self.sensor.clear();
    }

    pub fn sensor_estimate(&self) -> Option<f64> {
        self.sensor.point()
    }

    /// Run one estimate. A seed makes the run reproducible; without one the
    /// generator is seeded from entropy and the seed is reported back.
    pub fn run(&self, seed: Option<u64>) -> Result<JsValue, JsValue> {
        let mut engine = match seed {
            Some(s) => MonteCarloEngine::seeded(s),
            None => MonteCarloEngine::from_entropy(),
        };
        let outcome = engine
            .run(&self.params, self.sensor.point())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let view = EstimateView {
            fleet_stats: &outcome.fleet_stats,
            trip_stats: &outcome.trip_stats,
            sensor_stats: &outcome.sensor_stats,
            blended_stats: &outcome.blended_stats,
            blended: &outcome.samples.blended,
            histogram: outcome.histogram(),
            seed: outcome.seed.map(|s| s.to_string()),
        };
        serde_wasm_bindgen::to_value(&view).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
