//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::demand::DemandProfile;
use crate::error::SimError;
use crate::tariff::{HOURS_PER_DAY, TariffSchedule};

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the reference scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::reference`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Seed and candidate capacities.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Battery charging parameters.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Two-period grid tariff parameters.
    #[serde(default)]
    pub tariff: TariffConfig,
    /// Random demand profile parameters.
    #[serde(default)]
    pub demand: DemandConfig,
    /// Inputs for the live decision pipeline.
    #[serde(default)]
    pub decision: DecisionConfig,
}

/// Seed and candidate capacities.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Master random seed for the demand generator.
    pub seed: u64,
    /// Battery capacities to compare, in kWh (each must be > 0).
    pub capacities_kwh: Vec<f32>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 100,
            capacities_kwh: vec![10.0, 60.0],
        }
    }
}

/// Battery charging parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Maximum energy the charger can add per hour (kWh, must be > 0).
    pub max_charge_kwh_per_hour: f32,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            max_charge_kwh_per_hour: 5.0,
        }
    }
}

/// Two-period grid tariff parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffConfig {
    /// Grid purchase price during off-peak hours (EUR/kWh).
    pub off_peak_price: f32,
    /// Grid purchase price during on-peak hours (EUR/kWh).
    pub on_peak_price: f32,
    /// Flat retail sale price (EUR/kWh).
    pub sell_price: f32,
    /// Hours of day flagged off-peak (each in 0-23).
    pub off_peak_hours: Vec<usize>,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            off_peak_price: 0.10,
            on_peak_price: 0.30,
            sell_price: 0.29,
            off_peak_hours: vec![0, 1, 2, 3, 4, 5, 6, 7, 21, 22, 23],
        }
    }
}

/// Random demand profile parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemandConfig {
    /// Lower bound of hourly demand (kWh, must be >= 0).
    pub min_kwh: f32,
    /// Upper bound of hourly demand (kWh, must be >= min_kwh).
    pub max_kwh: f32,
}

impl Default for DemandConfig {
    fn default() -> Self {
        Self {
            min_kwh: 1.0,
            max_kwh: 5.0,
        }
    }
}

/// Inputs for the live decision pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecisionConfig {
    /// Hour of day the decision is made for (0-23).
    pub hour: usize,
    /// Current battery state of charge in percent (0-100).
    pub soc_pct: f32,
    /// Number of competing suppliers active in the area.
    pub competitors: u32,
    /// Forecaster type: `"persistence"` or `"trend"`.
    pub forecaster: String,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            hour: 18,
            soc_pct: 50.0,
            competitors: 2,
            forecaster: "trend".to_string(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field} — {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.capacities_kwh"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ScenarioConfig {
    /// Returns the reference scenario (same parameters as the original
    /// hardcoded defaults: seed 100, demand uniform in [1, 5] kWh,
    /// capacities 10 and 60 kWh).
    pub fn reference() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            battery: BatteryConfig::default(),
            tariff: TariffConfig::default(),
            demand: DemandConfig::default(),
            decision: DecisionConfig::default(),
        }
    }

    /// Returns the fleet-sweep preset: a finer grid of candidate capacities.
    pub fn fleet_sweep() -> Self {
        Self {
            simulation: SimulationConfig {
                capacities_kwh: vec![5.0, 10.0, 20.0, 40.0, 60.0],
                ..SimulationConfig::default()
            },
            ..Self::reference()
        }
    }

    /// Returns the tight-margin preset: pricier on-peak energy and a lower
    /// sale price, with a crowded supplier field.
    pub fn tight_margin() -> Self {
        Self {
            tariff: TariffConfig {
                on_peak_price: 0.32,
                sell_price: 0.25,
                ..TariffConfig::default()
            },
            decision: DecisionConfig {
                competitors: 4,
                ..DecisionConfig::default()
            },
            ..Self::reference()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["reference", "fleet_sweep", "tight_margin"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "reference" => Ok(Self::reference()),
            "fleet_sweep" => Ok(Self::fleet_sweep()),
            "tight_margin" => Ok(Self::tight_margin()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let s = &self.simulation;
        if s.capacities_kwh.is_empty() {
            errors.push(ConfigError {
                field: "simulation.capacities_kwh".into(),
                message: "must name at least one capacity".into(),
            });
        }
        for (i, &cap) in s.capacities_kwh.iter().enumerate() {
            if !cap.is_finite() || cap <= 0.0 {
                errors.push(ConfigError {
                    field: format!("simulation.capacities_kwh[{i}]"),
                    message: "must be a finite value > 0".into(),
                });
            }
        }

        let bat = &self.battery;
        if !bat.max_charge_kwh_per_hour.is_finite() || bat.max_charge_kwh_per_hour <= 0.0 {
            errors.push(ConfigError {
                field: "battery.max_charge_kwh_per_hour".into(),
                message: "must be a finite value > 0".into(),
            });
        }

        let t = &self.tariff;
        for (field, price) in [
            ("tariff.off_peak_price", t.off_peak_price),
            ("tariff.on_peak_price", t.on_peak_price),
            ("tariff.sell_price", t.sell_price),
        ] {
            if !price.is_finite() || price < 0.0 {
                errors.push(ConfigError {
                    field: field.into(),
                    message: "must be a finite value >= 0".into(),
                });
            }
        }
        for &hour in &t.off_peak_hours {
            if hour >= HOURS_PER_DAY {
                errors.push(ConfigError {
                    field: "tariff.off_peak_hours".into(),
                    message: format!("hour {hour} is out of range (0-{})", HOURS_PER_DAY - 1),
                });
            }
        }

        let d = &self.demand;
        if !d.min_kwh.is_finite() || d.min_kwh < 0.0 {
            errors.push(ConfigError {
                field: "demand.min_kwh".into(),
                message: "must be a finite value >= 0".into(),
            });
        }
        if !d.max_kwh.is_finite() || d.max_kwh < d.min_kwh {
            errors.push(ConfigError {
                field: "demand.max_kwh".into(),
                message: "must be a finite value >= demand.min_kwh".into(),
            });
        }

        let dec = &self.decision;
        if dec.hour >= HOURS_PER_DAY {
            errors.push(ConfigError {
                field: "decision.hour".into(),
                message: format!("must be in 0-{}", HOURS_PER_DAY - 1),
            });
        }
        if !dec.soc_pct.is_finite() || !(0.0..=100.0).contains(&dec.soc_pct) {
            errors.push(ConfigError {
                field: "decision.soc_pct".into(),
                message: "must be in [0.0, 100.0]".into(),
            });
        }
        if dec.forecaster != "persistence" && dec.forecaster != "trend" {
            errors.push(ConfigError {
                field: "decision.forecaster".into(),
                message: format!(
                    "must be \"persistence\" or \"trend\", got \"{}\"",
                    dec.forecaster
                ),
            });
        }

        errors
    }

    /// Builds the tariff schedule described by the `[tariff]` section.
    ///
    /// # Errors
    ///
    /// Returns [`SimError`] when the section fails domain validation.
    pub fn tariff(&self) -> Result<TariffSchedule, SimError> {
        let t = &self.tariff;
        TariffSchedule::from_prices(
            t.off_peak_price,
            t.on_peak_price,
            t.sell_price,
            &t.off_peak_hours,
        )
    }

    /// Samples the demand profile described by the `[demand]` section with
    /// the configured seed.
    ///
    /// # Errors
    ///
    /// Returns [`SimError`] when the demand range fails domain validation.
    pub fn demand_profile(&self) -> Result<DemandProfile, SimError> {
        DemandProfile::random(self.simulation.seed, self.demand.min_kwh, self.demand.max_kwh)
    }
}
