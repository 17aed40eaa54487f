// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fleet Estimator - Simulation Parameters

//! Input surface of one estimation run.
//!
//! Field names serialize in camelCase so a browser form can post its values
//! as-is. Parameters are checked once by [`SimulationParameters::validate`]
//! before any sampling starts; nothing downstream re-checks them.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fewest draws a run may request.
pub const MIN_SAMPLES: usize = 1000;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A parameter outside its allowed range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("{field} must be greater than zero, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must lie in [0, 1], got {value}")]
    OutsideUnitInterval { field: &'static str, value: f64 },
    #[error("{min_field} ({min}) must not exceed {max_field} ({max})")]
    InvertedRange {
        min_field: &'static str,
        max_field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("samples must be at least {minimum}, got {samples}")]
    TooFewSamples { samples: usize, minimum: usize },
    #[error("largest possible {quantity} estimate overflows ({value})")]
    Overflow { quantity: &'static str, value: f64 },
}

/// Failure loading parameters from JSON.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read parameters: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed parameters: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid parameters: {0}")]
    Invalid(#[from] ValidationError),
}

// ---------------------------------------------------------------------------
// SimulationParameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationParameters {
    /// Total vehicles the operator runs nationally.
    pub fleet_size: f64,
    /// Share of the fleet deployed in this city.
    pub sf_share_min: f64,
    pub sf_share_max: f64,
    /// Fraction of the city fleet on the road at once.
    pub util_min: f64,
    pub util_max: f64,
    /// Citywide daily trip volume; zero disables the demand channel.
    pub trips_per_day: f64,
    /// Trips a single vehicle completes per day.
    pub tpc_min: f64,
    pub tpc_max: f64,
    pub samples: usize,
    /// Blend weight given to the sensor channel when it has evidence.
    pub sensor_weight: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            fleet_size: 1500.0,
            sf_share_min: 0.10,
            sf_share_max: 0.30,
            util_min: 0.40,
            util_max: 0.70,
            trips_per_day: 0.0,
            tpc_min: 10.0,
            tpc_max: 20.0,
            samples: 10_000,
            sensor_weight: 0.3,
        }
    }
}

impl SimulationParameters {
    /// Check every field against its constraint. The first violation wins.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let reals = [
            ("fleetSize", self.fleet_size),
            ("sfShareMin", self.sf_share_min),
            ("sfShareMax", self.sf_share_max),
            ("utilMin", self.util_min),
            ("utilMax", self.util_max),
            ("tripsPerDay", self.trips_per_day),
            ("tpcMin", self.tpc_min),
            ("tpcMax", self.tpc_max),
            ("sensorWeight", self.sensor_weight),
        ];
        for (field, value) in reals {
            if !value.is_finite() {
                return Err(ValidationError::NotFinite { field, value });
            }
        }

        if self.fleet_size <= 0.0 {
            return Err(ValidationError::NonPositive {
                field: "fleetSize",
                value: self.fleet_size,
            });
        }

        unit_range("sfShareMin", self.sf_share_min, "sfShareMax", self.sf_share_max)?;
        unit_range("utilMin", self.util_min, "utilMax", self.util_max)?;

        if self.trips_per_day < 0.0 {
            return Err(ValidationError::Negative {
                field: "tripsPerDay",
                value: self.trips_per_day,
            });
        }

        if self.tpc_min <= 0.0 {
            return Err(ValidationError::NonPositive {
                field: "tpcMin",
                value: self.tpc_min,
            });
        }
        ordered("tpcMin", self.tpc_min, "tpcMax", self.tpc_max)?;

        if self.samples < MIN_SAMPLES {
            return Err(ValidationError::TooFewSamples {
                samples: self.samples,
                minimum: MIN_SAMPLES,
            });
        }

        in_unit("sensorWeight", self.sensor_weight)?;

        // Upper bounds of each channel's draws must stay representable.
        let fleet_max = self.fleet_size * self.sf_share_max * self.util_max;
        if !fleet_max.is_finite() {
            return Err(ValidationError::Overflow { quantity: "fleet", value: fleet_max });
        }
        if self.trips_per_day > 0.0 {
            let trip_max = self.trips_per_day / self.tpc_min;
            if !trip_max.is_finite() {
                return Err(ValidationError::Overflow { quantity: "trip", value: trip_max });
            }
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON object over the defaults, then validate.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

fn in_unit(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::OutsideUnitInterval { field, value });
    }
    Ok(())
}

fn ordered(
    min_field: &'static str,
    min: f64,
    max_field: &'static str,
    max: f64,
) -> Result<(), ValidationError> {
    if min > max {
        return Err(ValidationError::InvertedRange { min_field, max_field, min, max });
    }
    Ok(())
}

fn unit_range(
    min_field: &'static str,
    min: f64,
    max_field: &'static str,
    max: f64,
) -> Result<(), ValidationError> {
    in_unit(min_field, min)?;
    in_unit(max_field, max)?;
    ordered(min_field, min, max_field, max)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SimulationParameters::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_fleet() {
        let params = SimulationParameters { fleet_size: 0.0, ..Default::default() };
        assert!(matches!(
            params.validate(),
            Err(ValidationError::NonPositive { field: "fleetSize", .. })
        ));
    }

    #[test]
    fn rejects_inverted_share() {
        let params = SimulationParameters {
            sf_share_min: 0.5,
            sf_share_max: 0.2,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ValidationError::InvertedRange { min_field: "sfShareMin", .. })
        ));
    }

    #[test]
    fn rejects_utilization_above_one() {
        let params = SimulationParameters { util_max: 1.2, ..Default::default() };
        assert!(matches!(
            params.validate(),
            Err(ValidationError::OutsideUnitInterval { field: "utilMax", .. })
        ));
    }

    #[test]
    fn rejects_zero_trips_per_car() {
        let params = SimulationParameters { tpc_min: 0.0, ..Default::default() };
        assert!(matches!(
            params.validate(),
            Err(ValidationError::NonPositive { field: "tpcMin", .. })
        ));
    }

    #[test]
    fn rejects_negative_trips() {
        let params = SimulationParameters { trips_per_day: -1.0, ..Default::default() };
        assert!(matches!(
            params.validate(),
            Err(ValidationError::Negative { field: "tripsPerDay", .. })
        ));
    }

    #[test]
    fn rejects_nan() {
        let params = SimulationParameters { util_min: f64::NAN, ..Default::default() };
        assert!(matches!(
            params.validate(),
            Err(ValidationError::NotFinite { field: "utilMin", .. })
        ));
    }

    #[test]
    fn rejects_overflowing_trip_bound() {
        let params = SimulationParameters {
            trips_per_day: 1e308,
            tpc_min: 0.5,
            tpc_max: 0.5,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ValidationError::Overflow { quantity: "trip", .. })
        ));

        let subnormal = SimulationParameters {
            trips_per_day: 4_000.0,
            tpc_min: 1e-320,
            ..Default::default()
        };
        assert!(matches!(
            subnormal.validate(),
            Err(ValidationError::Overflow { quantity: "trip", .. })
        ));
    }

    #[test]
    fn subnormal_tpc_without_demand_is_allowed() {
        let params = SimulationParameters {
            trips_per_day: 0.0,
            tpc_min: 1e-320,
            ..Default::default()
        };
        assert_eq!(params.validate(), Ok(()));
    }

    #[test]
    fn largest_finite_fleet_is_accepted() {
        let params = SimulationParameters {
            fleet_size: f64::MAX,
            sf_share_min: 1.0,
            sf_share_max: 1.0,
            util_min: 1.0,
            util_max: 1.0,
            ..Default::default()
        };
        // MAX * 1 * 1 is still finite
        assert_eq!(params.validate(), Ok(()));

        let params = SimulationParameters { fleet_size: f64::INFINITY, ..Default::default() };
        assert!(matches!(params.validate(), Err(ValidationError::NotFinite { .. })));
    }

    #[test]
    fn sample_floor_is_inclusive() {
        let at_floor = SimulationParameters { samples: MIN_SAMPLES, ..Default::default() };
        assert_eq!(at_floor.validate(), Ok(()));
        let below = SimulationParameters { samples: MIN_SAMPLES - 1, ..Default::default() };
        assert!(below.validate().is_err());
    }

    #[test]
    fn partial_json_overrides_defaults() {
        let params = SimulationParameters::from_json_str(
            r#"{"fleetSize": 2000, "sensorWeight": 0.5}"#,
        )
        .expect("test: partial JSON should load");
        assert_eq!(params.fleet_size, 2000.0);
        assert_eq!(params.sensor_weight, 0.5);
        assert_eq!(params.samples, SimulationParameters::default().samples);
    }

    #[test]
    fn json_validation_failure_surfaces() {
        let err = SimulationParameters::from_json_str(r#"{"samples": 10}"#)
            .expect_err("test: 10 samples must be rejected");
        assert!(matches!(err, ConfigError::Invalid(ValidationError::TooFewSamples { .. })));
        assert_eq!(
            err.to_string(),
            "invalid parameters: samples must be at least 1000, got 10"
        );
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = SimulationParameters::from_json_str("{not json")
            .expect_err("test: malformed JSON must fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
