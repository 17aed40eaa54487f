// Scenario Presets — named parameter sets for the estimate runner
// Each preset pairs simulation parameters with an optional sensor point

use fleet_estimator::SimulationParameters;

pub struct Scenario {
    pub name: &'static str,
    pub label: &'static str,
    pub params: SimulationParameters,
    /// Citywide sensor estimate fed to every draw (None = no camera evidence)
    pub sensor: Option<f64>,
}

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "BASELINE",
            label: "Baseline: fleet + sensor",
            params: SimulationParameters::default(),
            sensor: Some(180.0),
        },
        Scenario {
            name: "FLEET_ONLY",
            label: "Fleet model, no demand, no sensor",
            params: SimulationParameters {
                fleet_size: 1500.0,
                sf_share_min: 0.1,
                sf_share_max: 0.1,
                util_min: 0.5,
                util_max: 0.5,
                trips_per_day: 0.0,
                tpc_min: 10.0,
                tpc_max: 10.0,
                samples: 5_000,
                sensor_weight: 0.0,
            },
            sensor: None,
        },
        Scenario {
            name: "DEMAND",
            label: "Fleet + trip demand",
            params: SimulationParameters {
                trips_per_day: 4_000.0,
                tpc_min: 12.0,
                tpc_max: 25.0,
                ..Default::default()
            },
            sensor: None,
        },
        Scenario {
            name: "SENSOR_HEAVY",
            label: "All channels, sensor weight 0.7",
            params: SimulationParameters {
                trips_per_day: 4_000.0,
                tpc_min: 12.0,
                tpc_max: 25.0,
                sensor_weight: 0.7,
                ..Default::default()
            },
            sensor: Some(220.0),
        },
        Scenario {
            name: "SENSOR_MISSING",
            label: "Sensor weighted but unavailable",
            params: SimulationParameters {
                sensor_weight: 0.7,
                ..Default::default()
            },
            sensor: None,
        },
    ]
}
