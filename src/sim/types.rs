//! Core station types: override modes, charge commands, snapshots, and tick events.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::StationError;

/// Number of hourly entries in every static table.
pub const HOURS_PER_DAY: usize = 24;

/// Rounds to two decimals, the precision the station reports.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// User override of the charging algorithm.
///
/// Wire names are `auto`, `force_on`, and `force_off`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideMode {
    /// The algorithm (charge-intent commands) controls charging.
    #[default]
    Auto,
    /// Charging is forced on; charge-intent commands are ignored.
    ForceOn,
    /// Charging is forced off; charge-intent commands are ignored.
    ForceOff,
}

impl OverrideMode {
    /// Wire representation of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::ForceOn => "force_on",
            Self::ForceOff => "force_off",
        }
    }

    /// Returns `true` for `ForceOn` and `ForceOff`.
    pub fn is_forced(self) -> bool {
        !matches!(self, Self::Auto)
    }
}

impl fmt::Display for OverrideMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverrideMode {
    type Err = StationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "force_on" => Ok(Self::ForceOn),
            "force_off" => Ok(Self::ForceOff),
            other => Err(StationError::InvalidOverrideMode(other.to_string())),
        }
    }
}

/// Charging intent submitted by the algorithm or a dashboard button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeIntent {
    On,
    Off,
}

impl ChargeIntent {
    /// Returns the intent matching a boolean charging flag.
    pub fn from_flag(charging: bool) -> Self {
        if charging { Self::On } else { Self::Off }
    }

    /// Returns `true` for [`ChargeIntent::On`].
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }

    /// Wire representation of the intent.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }
}

impl FromStr for ChargeIntent {
    type Err = StationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            other => Err(StationError::InvalidCommand(other.to_string())),
        }
    }
}

/// Charging sub-state derived from the station state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargingState {
    /// Not drawing power.
    Idle,
    /// Drawing power and updating SoC and temperature each tick.
    Charging,
}

/// Consistent, immutable copy of the station state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationSnapshot {
    /// Simulated hour (0 to 23).
    pub sim_hour: usize,
    /// Simulated minute (0 to 59).
    pub sim_minute: u32,
    /// Base load plus charger draw (kW).
    pub building_load_kw: f64,
    /// Stored battery energy (kWh).
    pub soc_kwh: f64,
    /// Stored energy as percent of usable capacity.
    pub soc_percent: f64,
    /// Usable battery capacity (kWh).
    pub max_capacity_kwh: f64,
    /// Last computed cell temperature (°C).
    pub battery_temp_c: f64,
    /// Commanded charging intent.
    pub charge_requested: bool,
    /// Active user override.
    pub override_mode: OverrideMode,
    /// Derived charging sub-state.
    pub charging_state: ChargingState,
}

/// Result of a charge-intent command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChargeOutcome {
    /// Charging flag after the command.
    pub charging: bool,
    /// Override mode at the time of the command.
    pub override_mode: OverrideMode,
    /// `false` when an active override caused the command to be ignored.
    pub applied: bool,
}

/// Result of an override command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverrideStatus {
    /// Override mode after the command.
    pub override_mode: OverrideMode,
    /// Charging flag after the command.
    pub charging: bool,
}

/// Notable transition raised by a tick or a command.
#[derive(Debug, Clone, PartialEq)]
pub enum StationEvent {
    /// Computed cell temperature exceeded the safety limit; charging stopped.
    Overtemperature { temperature_c: f64 },
    /// Battery reached the SoC ceiling; charging stopped.
    BatteryFull { soc_kwh: f64 },
    /// Simulated clock rolled over to a new hour.
    HourAdvanced { hour: usize },
    /// Charge intent applied in auto mode.
    ChargeCommand { charging: bool },
    /// Override mode changed.
    OverrideChanged { override_mode: OverrideMode, charging: bool },
    /// Station returned to its starting values.
    Reset { soc_percent: f64 },
}

impl fmt::Display for StationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overtemperature { temperature_c } => {
                write!(f, "overtemperature, charging stopped at {temperature_c} °C")
            }
            Self::BatteryFull { soc_kwh } => {
                write!(f, "battery full, charging stopped ({soc_kwh} kWh)")
            }
            Self::HourAdvanced { hour } => write!(f, "simulated hour {hour:02}:00"),
            Self::ChargeCommand { charging } => {
                let word = if *charging { "started" } else { "stopped" };
                write!(f, "charging {word} by command")
            }
            Self::OverrideChanged {
                override_mode,
                charging,
            } => write!(f, "override set to {override_mode} (charging={charging})"),
            Self::Reset { soc_percent } => {
                write!(f, "station reset, battery at {soc_percent}%")
            }
        }
    }
}

/// Events raised during one call to `advance`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Events in the order they occurred.
    pub events: Vec<StationEvent>,
    /// Energy added to the battery during the tick (kWh).
    pub delivered_kwh: f64,
}

impl TickReport {
    /// Returns `true` if the tick rolled the clock into a new hour.
    pub fn hour_advanced(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, StationEvent::HourAdvanced { .. }))
    }

    /// Returns `true` if the safety limit stopped charging during the tick.
    pub fn tripped(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, StationEvent::Overtemperature { .. }))
    }
}
