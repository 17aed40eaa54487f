// Fleet Estimate Runner — blended Monte Carlo estimate per scenario
// Seedable ChaCha8 PRNG, optional multi-seed stability study, JSON report
//
// Usage:
//   cargo run --release --bin estimate                        # All presets, 1 run each
//   cargo run --release --bin estimate -- BASELINE            # Filter by name
//   cargo run --release --bin estimate -- --runs 20           # Seed stability study
//   cargo run --release --bin estimate -- --params p.json     # Custom parameters
//   cargo run --release --bin estimate -- --sensor 180        # Override sensor point
//   cargo run --release --bin estimate -- --samples 50000 --seed 42 --json

mod report;
mod scenarios;
mod monte_carlo;

use fleet_estimator::SimulationParameters;
use report::*;
use scenarios::*;
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    runs: usize,
    seed: u64,
    samples: Option<usize>,
    sensor: Option<f64>,
    params: Option<PathBuf>,
    json: bool,
    filter: Option<String>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        runs: 1,
        seed: 0,
        samples: None,
        sensor: None,
        params: None,
        json: false,
        filter: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                if i < args.len() {
                    cli.runs = args[i].parse().unwrap_or(1).max(1);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(0);
                }
            }
            "--samples" => {
                i += 1;
                if i < args.len() {
                    cli.samples = args[i].parse().ok();
                }
            }
            "--sensor" => {
                i += 1;
                if i < args.len() {
                    cli.sensor = args[i].parse().ok();
                }
            }
            "--params" => {
                i += 1;
                if i < args.len() {
                    cli.params = Some(PathBuf::from(&args[i]));
                }
            }
            "--json" => {
                cli.json = true;
            }
            arg if !arg.starts_with('-') => {
                cli.filter = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = parse_args();

    // A parameter file replaces the presets with a single custom scenario.
    let all_scenarios = match &cli.params {
        Some(path) => match SimulationParameters::from_json_file(path) {
            Ok(params) => vec![Scenario {
                name: "CUSTOM",
                label: "Custom parameters",
                params,
                sensor: None,
            }],
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                std::process::exit(2);
            }
        },
        None => scenarios(),
    };

    let to_run: Vec<&Scenario> = match &cli.filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            all_scenarios.iter()
                .filter(|s| s.name.to_lowercase().contains(&f_lower)
                          || s.label.to_lowercase().contains(&f_lower))
                .collect()
        }
        None => all_scenarios.iter().collect(),
    };

    if to_run.is_empty() {
        eprintln!("No scenarios match filter: {:?}", cli.filter);
        std::process::exit(1);
    }

    println!("\n  Fleet Estimate Runner v{}", env!("CARGO_PKG_VERSION"));
    println!("  PRNG: ChaCha8Rng | Runs/scenario: {} | Base seed: {}", cli.runs, cli.seed);
    println!("  Running {} scenario(s)...\n", to_run.len());
    println!("  {:<34} {:>8} {:>8} {:>8} {:>9} {:>9} {:>9}",
        "Scenario", "Fleet", "Trip", "Sensor", "Blended", "P5", "P95");
    println!("  {}", "-".repeat(92));

    let suite_start = Instant::now();
    let mut reports = Vec::new();
    let mut failed = 0usize;

    for scenario in &to_run {
        let mut params = scenario.params.clone();
        if let Some(n) = cli.samples {
            params.samples = n;
        }
        let sensor = cli.sensor.or(scenario.sensor);

        let report = match monte_carlo::run_study(scenario, &params, sensor, cli.runs, cli.seed) {
            Ok(r) => r,
            Err(e) => {
                println!("  {:<34} rejected: {}", scenario.label, e);
                failed += 1;
                continue;
            }
        };

        let m = |s: &Option<Stats>| cell(s.as_ref().map(|s| s.mean));
        println!("  {:<34} {:>8} {:>8} {:>8} {:>9} {:>9} {:>9}",
            report.label,
            m(&report.fleet_mean),
            m(&report.trip_mean),
            m(&report.sensor_mean),
            m(&report.blended_mean),
            m(&report.blended_p5),
            m(&report.blended_p95),
        );
        if cli.runs > 1 {
            if let Some(b) = &report.blended_mean {
                println!("  {:<34} blended mean ±{:.2} (95% CI over {} seeds)",
                    "", (b.ci_upper - b.ci_lower) / 2.0, b.n);
            }
        }

        reports.push(report);
    }

    let suite_elapsed = suite_start.elapsed();

    println!("  {}", "-".repeat(92));
    println!("  Total: {}  Rejected: {}  Suite time: {:.2}s\n",
        to_run.len(), failed, suite_elapsed.as_secs_f64());

    // Single scenario: show the distribution of the blended estimate.
    if let [only] = reports.as_slice() {
        if let Some(h) = &only.histogram {
            println!("  Blended estimate distribution (seed {}):", cli.seed);
            print!("{}", render_histogram(h, 50));
            println!();
        }
    }

    // ─── Write JSON Report ──────────────────────────────────────────────

    if cli.json {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let timestamp = format!("{}", ts);

        let report = EstimateReport {
            timestamp: timestamp.clone(),
            version: env!("CARGO_PKG_VERSION"),
            prng: "ChaCha8Rng",
            n_runs_per_scenario: cli.runs,
            base_seed: cli.seed,
            scenarios: reports,
        };

        let dir = std::path::Path::new("estimate-results");
        let path = dir.join(format!("estimate-{}.json", timestamp));
        let written = std::fs::create_dir_all(dir)
            .and_then(|_| serde_json::to_string_pretty(&report).map_err(std::io::Error::other))
            .and_then(|json| std::fs::write(&path, json));
        match written {
            Ok(()) => println!("  Results saved to: {}\n", path.display()),
            Err(e) => {
                eprintln!("  Failed to write {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
}
