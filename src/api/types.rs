//! API request and response types.
//!
//! Field names follow the legacy station server so existing dashboards
//! and clients keep working.

use serde::{Deserialize, Serialize};

use crate::sim::types::{ChargeOutcome, ChargingState, OverrideMode, OverrideStatus, StationSnapshot};

/// `GET /info` body.
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub sim_time_hour: usize,
    pub sim_time_min: u32,
    /// Base load plus charger draw (kW).
    pub base_current_load: f64,
    /// Stored energy (kWh).
    #[serde(rename = "battery_capacity_kWh")]
    pub battery_capacity_kwh: f64,
    #[serde(rename = "battery_max_capacity_kWh")]
    pub battery_max_capacity_kwh: f64,
    /// Commanded charging flag.
    pub ev_battery_charge_start_stopp: bool,
    pub battery_percent: f64,
    pub battery_temp_c: f64,
    pub user_override: OverrideMode,
    pub charging_state: ChargingState,
}

impl From<&StationSnapshot> for InfoResponse {
    fn from(s: &StationSnapshot) -> Self {
        Self {
            sim_time_hour: s.sim_hour,
            sim_time_min: s.sim_minute,
            base_current_load: s.building_load_kw,
            battery_capacity_kwh: s.soc_kwh,
            battery_max_capacity_kwh: s.max_capacity_kwh,
            ev_battery_charge_start_stopp: s.charge_requested,
            battery_percent: s.soc_percent,
            battery_temp_c: s.battery_temp_c,
            user_override: s.override_mode,
            charging_state: s.charging_state,
        }
    }
}

/// `POST /charge` body: `{"charging": "on" | "off"}`.
#[derive(Debug, Default, Deserialize)]
pub struct ChargeRequest {
    #[serde(alias = "intent")]
    pub charging: Option<String>,
}

/// `POST /charge` response.
#[derive(Debug, Serialize)]
pub struct ChargeResponse {
    /// `"on"` or `"off"` after the command.
    pub charging: &'static str,
    #[serde(rename = "override")]
    pub override_mode: OverrideMode,
    /// `false` when an active override caused the command to be ignored.
    pub applied: bool,
}

impl From<ChargeOutcome> for ChargeResponse {
    fn from(outcome: ChargeOutcome) -> Self {
        Self {
            charging: if outcome.charging { "on" } else { "off" },
            override_mode: outcome.override_mode,
            applied: outcome.applied,
        }
    }
}

/// `POST /discharge` body: `{"discharging": "on"}`.
#[derive(Debug, Default, Deserialize)]
pub struct DischargeRequest {
    pub discharging: Option<String>,
}

/// `POST /discharge` response.
#[derive(Debug, Serialize)]
pub struct DischargeResponse {
    pub discharging: &'static str,
}

/// Plain informational message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// `POST /override` body: `{"mode": "auto" | "force_on" | "force_off"}`.
#[derive(Debug, Default, Deserialize)]
pub struct OverrideRequest {
    pub mode: Option<String>,
}

/// `GET`/`POST /override` response.
#[derive(Debug, Serialize)]
pub struct OverrideResponse {
    #[serde(rename = "override")]
    pub override_mode: OverrideMode,
    pub charging: bool,
}

impl From<OverrideStatus> for OverrideResponse {
    fn from(status: OverrideStatus) -> Self {
        Self {
            override_mode: status.override_mode,
            charging: status.charging,
        }
    }
}

/// Query parameters for `GET /log`.
#[derive(Debug, Deserialize)]
pub struct LogQuery {
    /// Maximum number of entries (default 50).
    pub limit: Option<usize>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
