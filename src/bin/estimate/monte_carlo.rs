// Seed Stability Study — N runs per scenario with across-run aggregation
// Each scenario runs N times with seeds base..base+N, computing mean ± 95% CI of each channel

use fleet_estimator::{Histogram, MonteCarloEngine, SimulationParameters, SummaryStatistic, ValidationError};

use crate::report::*;
use crate::scenarios::Scenario;

use std::time::Instant;

/// Run a scenario once with a specific seed.
pub fn run_single(
    params: &SimulationParameters,
    sensor: Option<f64>,
    seed: u64,
) -> Result<(RunResult, Option<Histogram>), ValidationError> {
    let start = Instant::now();
    let outcome = MonteCarloEngine::seeded(seed).run(params, sensor)?;
    let histogram = outcome.histogram();
    Ok((
        RunResult {
            seed,
            fleet: outcome.fleet_stats,
            trip: outcome.trip_stats,
            sensor: outcome.sensor_stats,
            blended: outcome.blended_stats,
            elapsed_ms: start.elapsed().as_millis(),
        },
        histogram,
    ))
}

/// Run N seeds of a scenario and aggregate.
pub fn run_study(
    scenario: &Scenario,
    params: &SimulationParameters,
    sensor: Option<f64>,
    n_runs: usize,
    base_seed: u64,
) -> Result<StabilityReport, ValidationError> {
    let mut results = Vec::with_capacity(n_runs);
    let mut histogram = None;
    for i in 0..n_runs {
        let (result, h) = run_single(params, sensor, base_seed + i as u64)?;
        if i == 0 {
            histogram = h;
        }
        results.push(result);
    }
    Ok(aggregate(scenario, params, sensor, histogram, results))
}

/// Stats over the defined values of one field across runs.
fn across<F>(results: &[RunResult], field: F) -> Option<Stats>
where
    F: Fn(&RunResult) -> Option<f64>,
{
    let values: Vec<f64> = results.iter().filter_map(field).collect();
    Stats::from_samples(&values)
}

fn aggregate(
    scenario: &Scenario,
    params: &SimulationParameters,
    sensor: Option<f64>,
    histogram: Option<Histogram>,
    results: Vec<RunResult>,
) -> StabilityReport {
    let mean = |s: &SummaryStatistic| s.mean;

    StabilityReport {
        scenario_name: scenario.name.to_string(),
        label: scenario.label.to_string(),
        params: params.clone(),
        sensor_point: sensor,
        n_runs: results.len(),
        fleet_mean: across(&results, |r| mean(&r.fleet)),
        trip_mean: across(&results, |r| mean(&r.trip)),
        sensor_mean: across(&results, |r| mean(&r.sensor)),
        blended_mean: across(&results, |r| mean(&r.blended)),
        blended_p5: across(&results, |r| r.blended.p5),
        blended_p95: across(&results, |r| r.blended.p95),
        histogram,
        individual_runs: results,
    }
}
