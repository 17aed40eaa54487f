// Estimate Report Types
// Structured output for the JSON report and the console table

use fleet_estimator::{Histogram, SimulationParameters, SummaryStatistic};
use serde::Serialize;

// ─── Statistics (across-seed aggregation) ───────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    /// `None` when no run produced a value (e.g. sensor channel never defined).
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        let n = samples.len();
        if n == 0 {
            return None;
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let stderr = std_dev / (n as f64).sqrt();
        let z = 1.96; // 95% CI
        Some(Self {
            mean,
            std_dev,
            ci_lower: mean - z * stderr,
            ci_upper: mean + z * stderr,
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        })
    }
}

// ─── Single-Run Result ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub seed: u64,
    pub fleet: SummaryStatistic,
    pub trip: SummaryStatistic,
    pub sensor: SummaryStatistic,
    pub blended: SummaryStatistic,
    pub elapsed_ms: u128,
}

// ─── Stability Report (per-scenario aggregation) ────────────────────────────

/// Spread of each channel's mean across seeds.
#[derive(Debug, Clone, Serialize)]
pub struct StabilityReport {
    pub scenario_name: String,
    pub label: String,
    pub params: SimulationParameters,
    pub sensor_point: Option<f64>,
    pub n_runs: usize,
    pub fleet_mean: Option<Stats>,
    pub trip_mean: Option<Stats>,
    pub sensor_mean: Option<Stats>,
    pub blended_mean: Option<Stats>,
    pub blended_p5: Option<Stats>,
    pub blended_p95: Option<Stats>,
    /// Bins of the first run's blended sequence.
    pub histogram: Option<Histogram>,
    pub individual_runs: Vec<RunResult>,
}

// ─── Top-Level Report ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct EstimateReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub n_runs_per_scenario: usize,
    pub base_seed: u64,
    pub scenarios: Vec<StabilityReport>,
}

/// Fixed-width cell for a possibly undefined value.
pub fn cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => "n/a".to_string(),
    }
}

/// Horizontal bar chart of the bins, one line per bin.
pub fn render_histogram(h: &Histogram, width: usize) -> String {
    let peak = h.peak().max(1);
    let mut out = String::new();
    for bin in &h.bins {
        let bar = bin.count * width / peak;
        out.push_str(&format!(
            "  {:>9.1} - {:<9.1} {:>6} {}\n",
            bin.lower,
            bin.upper,
            bin.count,
            "#".repeat(bar)
        ));
    }
    out
}
