//! TOML-based station configuration and preset definitions.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::sim::params::{
    DEFAULT_BASE_LOAD_FRACTION, DEFAULT_BUILDING_MAX_POWER_KW, DEFAULT_PRICE_PER_KWH,
    StationParams, base_load_kw,
};
use crate::sim::planner::{ChargePlanner, PlannerMode};
use crate::sim::thermal::ThermalModel;
use crate::sim::types::HOURS_PER_DAY;

/// Top-level station configuration parsed from TOML.
///
/// All fields have defaults matching the standard household. Load from
/// TOML with [`StationConfig::from_toml_file`] or use
/// [`StationConfig::standard`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StationConfig {
    /// Tick timing, SoC ceiling, and log size.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// EV battery parameters.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Cell temperature model and safety limit.
    #[serde(default)]
    pub thermal: ThermalConfig,
    /// Charger parameters.
    #[serde(default)]
    pub charger: ChargerConfig,
    /// Household connection and base-load profile.
    #[serde(default)]
    pub building: BuildingConfig,
    /// Hourly energy prices.
    #[serde(default)]
    pub tariff: TariffConfig,
    /// Automatic charge planner.
    #[serde(default)]
    pub planner: PlannerConfig,
    /// HTTP listener.
    #[serde(default)]
    pub server: ServerConfig,
}

/// Tick timing and global parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Ticks per simulated hour (must be > 0).
    pub ticks_per_hour: usize,
    /// Wall-clock period of one tick in milliseconds (must be > 0).
    pub tick_interval_ms: u64,
    /// Charging stops at this SoC percent, in (0, 100].
    pub soc_ceiling_percent: f64,
    /// Number of retained log entries (must be > 0).
    pub log_capacity: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ticks_per_hour: 60,
            tick_interval_ms: 1000,
            soc_ceiling_percent: 100.0,
            log_capacity: 500,
        }
    }
}

/// EV battery parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Usable capacity (kWh).
    pub max_capacity_kwh: f64,
    /// SoC at start-up and after reset (percent).
    pub initial_soc_percent: f64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            max_capacity_kwh: 46.3,
            initial_soc_percent: 20.0,
        }
    }
}

/// Cell temperature model parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThermalConfig {
    /// Ambient temperature (°C).
    pub ambient_c: f64,
    /// Average cell voltage (V).
    pub cell_voltage_v: f64,
    /// Internal resistance (Ω).
    pub internal_resistance_ohm: f64,
    /// Heating interval per tick (s).
    pub step_s: f64,
    /// Charging is stopped above this temperature (°C).
    pub safety_limit_c: f64,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        let model = ThermalModel::default();
        Self {
            ambient_c: model.ambient_c,
            cell_voltage_v: model.cell_voltage_v,
            internal_resistance_ohm: model.internal_resistance_ohm,
            step_s: model.step_s,
            safety_limit_c: model.safety_limit_c,
        }
    }
}

/// Charger parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChargerConfig {
    /// Rated charging power (kW).
    pub power_kw: f64,
}

impl Default for ChargerConfig {
    fn default() -> Self {
        Self { power_kw: 7.4 }
    }
}

/// Household connection and base-load profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildingConfig {
    /// Connection limit (kW).
    pub max_power_kw: f64,
    /// Base load per hour as a fraction of `max_power_kw` (24 entries).
    pub base_load_fraction: Vec<f64>,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            max_power_kw: DEFAULT_BUILDING_MAX_POWER_KW,
            base_load_fraction: DEFAULT_BASE_LOAD_FRACTION.to_vec(),
        }
    }
}

/// Hourly energy prices.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffConfig {
    /// Price per kWh for each hour (24 entries).
    pub price_per_kwh: Vec<f64>,
    /// Currency label used in reports.
    pub currency: String,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            price_per_kwh: DEFAULT_PRICE_PER_KWH.to_vec(),
            currency: "öre".to_string(),
        }
    }
}

/// Automatic charge planner parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    /// `off`, `load`, or `price`.
    pub mode: PlannerMode,
    /// Hours eligible for charging in price mode (1 to 24).
    pub cheapest_hours: usize,
    /// Planner stops asking for charge at this SoC percent.
    pub target_soc_percent: f64,
    /// Household load at or above which charging is not wanted (kW).
    pub load_limit_kw: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            mode: PlannerMode::Off,
            cheapest_hours: 8,
            target_soc_percent: 80.0,
            load_limit_kw: 11.0,
        }
    }
}

/// HTTP listener parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `"0.0.0.0:5000"`.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5000".to_string(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.ticks_per_hour"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl StationConfig {
    /// Returns the standard household: one tick per simulated minute.
    pub fn standard() -> Self {
        Self::default()
    }

    /// Returns the fast preset: four ticks per simulated hour, one hour
    /// every two seconds.
    pub fn fast() -> Self {
        Self {
            simulation: SimulationConfig {
                ticks_per_hour: 4,
                tick_interval_ms: 500,
                ..SimulationConfig::default()
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["standard", "fast"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "standard" => Ok(Self::standard()),
            "fast" => Ok(Self::fast()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Replaces the port of `server.bind`, keeping the host.
    pub fn set_port(&mut self, port: u16) {
        let host = self
            .server
            .bind
            .rsplit_once(':')
            .map_or(self.server.bind.as_str(), |(host, _)| host);
        self.server.bind = format!("{host}:{port}");
    }

    /// Parsed listener address.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `server.bind` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server.bind.parse().map_err(|e| {
            ConfigError::new(
                "server.bind",
                format!("\"{}\" is not a socket address: {e}", self.server.bind),
            )
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let s = &self.simulation;
        if s.ticks_per_hour == 0 {
            errors.push(ConfigError::new("simulation.ticks_per_hour", "must be > 0"));
        }
        if s.tick_interval_ms == 0 {
            errors.push(ConfigError::new("simulation.tick_interval_ms", "must be > 0"));
        }
        if !(s.soc_ceiling_percent > 0.0 && s.soc_ceiling_percent <= 100.0) {
            errors.push(ConfigError::new(
                "simulation.soc_ceiling_percent",
                "must be in (0, 100]",
            ));
        }
        if s.log_capacity == 0 {
            errors.push(ConfigError::new("simulation.log_capacity", "must be > 0"));
        }

        let bat = &self.battery;
        if !(bat.max_capacity_kwh.is_finite() && bat.max_capacity_kwh > 0.0) {
            errors.push(ConfigError::new(
                "battery.max_capacity_kwh",
                "must be finite and > 0",
            ));
        }
        if !(0.0..=100.0).contains(&bat.initial_soc_percent) {
            errors.push(ConfigError::new(
                "battery.initial_soc_percent",
                "must be in [0, 100]",
            ));
        } else if bat.initial_soc_percent > s.soc_ceiling_percent {
            errors.push(ConfigError::new(
                "battery.initial_soc_percent",
                "must be <= simulation.soc_ceiling_percent",
            ));
        }

        let th = &self.thermal;
        if !(th.cell_voltage_v.is_finite() && th.cell_voltage_v > 0.0) {
            errors.push(ConfigError::new(
                "thermal.cell_voltage_v",
                "must be finite and > 0",
            ));
        }
        if !(th.internal_resistance_ohm.is_finite() && th.internal_resistance_ohm >= 0.0) {
            errors.push(ConfigError::new(
                "thermal.internal_resistance_ohm",
                "must be finite and >= 0",
            ));
        }
        if !(th.step_s.is_finite() && th.step_s >= 0.0) {
            errors.push(ConfigError::new("thermal.step_s", "must be finite and >= 0"));
        }
        if !th.ambient_c.is_finite() {
            errors.push(ConfigError::new("thermal.ambient_c", "must be finite"));
        }
        if !th.safety_limit_c.is_finite() {
            errors.push(ConfigError::new("thermal.safety_limit_c", "must be finite"));
        } else if th.ambient_c.is_finite() && th.safety_limit_c <= th.ambient_c {
            errors.push(ConfigError::new(
                "thermal.safety_limit_c",
                "must be > thermal.ambient_c",
            ));
        }

        let power_kw = self.charger.power_kw;
        if !(power_kw.is_finite() && power_kw > 0.0) {
            errors.push(ConfigError::new("charger.power_kw", "must be finite and > 0"));
        }

        let b = &self.building;
        if !(b.max_power_kw.is_finite() && b.max_power_kw > 0.0) {
            errors.push(ConfigError::new(
                "building.max_power_kw",
                "must be finite and > 0",
            ));
        }
        if b.base_load_fraction.len() != HOURS_PER_DAY {
            errors.push(ConfigError::new(
                "building.base_load_fraction",
                format!(
                    "must have {HOURS_PER_DAY} entries, got {}",
                    b.base_load_fraction.len()
                ),
            ));
        } else if b.base_load_fraction.iter().any(|f| !(0.0..=1.0).contains(f)) {
            errors.push(ConfigError::new(
                "building.base_load_fraction",
                "entries must be in [0.0, 1.0]",
            ));
        }

        let t = &self.tariff;
        if t.price_per_kwh.len() != HOURS_PER_DAY {
            errors.push(ConfigError::new(
                "tariff.price_per_kwh",
                format!(
                    "must have {HOURS_PER_DAY} entries, got {}",
                    t.price_per_kwh.len()
                ),
            ));
        } else if t.price_per_kwh.iter().any(|p| !p.is_finite()) {
            errors.push(ConfigError::new(
                "tariff.price_per_kwh",
                "entries must be finite",
            ));
        }

        let p = &self.planner;
        if p.cheapest_hours == 0 || p.cheapest_hours > HOURS_PER_DAY {
            errors.push(ConfigError::new(
                "planner.cheapest_hours",
                format!("must be in [1, {HOURS_PER_DAY}]"),
            ));
        }
        if !(0.0..=100.0).contains(&p.target_soc_percent) {
            errors.push(ConfigError::new(
                "planner.target_soc_percent",
                "must be in [0, 100]",
            ));
        }
        if !(p.load_limit_kw.is_finite() && p.load_limit_kw >= 0.0) {
            errors.push(ConfigError::new(
                "planner.load_limit_kw",
                "must be finite and >= 0",
            ));
        }

        if let Err(e) = self.bind_addr() {
            errors.push(e);
        }

        errors
    }

    /// Builds the station parameters. Call [`StationConfig::validate`] first.
    pub fn station_params(&self) -> StationParams {
        let th = &self.thermal;
        StationParams {
            ticks_per_hour: self.simulation.ticks_per_hour,
            charger_power_kw: self.charger.power_kw,
            max_capacity_kwh: self.battery.max_capacity_kwh,
            initial_soc_percent: self.battery.initial_soc_percent,
            soc_ceiling_percent: self.simulation.soc_ceiling_percent,
            thermal: ThermalModel {
                ambient_c: th.ambient_c,
                cell_voltage_v: th.cell_voltage_v,
                internal_resistance_ohm: th.internal_resistance_ohm,
                step_s: th.step_s,
                safety_limit_c: th.safety_limit_c,
            },
            base_load_kw: base_load_kw(
                &self.building.base_load_fraction,
                self.building.max_power_kw,
            ),
            price_per_kwh: self.tariff.price_per_kwh.clone(),
            log_capacity: self.simulation.log_capacity,
        }
    }

    /// Builds the charge planner over the configured tariff.
    pub fn planner(&self) -> ChargePlanner {
        let p = &self.planner;
        ChargePlanner::new(
            p.mode,
            &self.tariff.price_per_kwh,
            p.cheapest_hours,
            p.target_soc_percent,
            p.load_limit_kw,
        )
    }
}
