//! Static, read-only station parameters.

use super::event_log::DEFAULT_LOG_CAPACITY;
use super::thermal::ThermalModel;
use super::types::{HOURS_PER_DAY, round2};

/// Hourly energy prices (öre/kWh incl. VAT).
pub const DEFAULT_PRICE_PER_KWH: [f64; HOURS_PER_DAY] = [
    85.28, 70.86, 68.01, 67.95, 68.01, 85.04, 87.86, 100.26, 118.45, 116.61, 105.93, 91.95, 90.51,
    90.34, 90.80, 88.85, 90.39, 99.03, 87.11, 82.9, 80.45, 76.48, 32.00, 34.29,
];

/// Hourly household base load as a fraction of the building's max power.
pub const DEFAULT_BASE_LOAD_FRACTION: [f64; HOURS_PER_DAY] = [
    0.08, 0.07, 0.20, 0.18, 0.25, 0.35, 0.41, 0.34, 0.35, 0.40, 0.43, 0.56, 0.42, 0.34, 0.32, 0.33,
    0.53, 1.00, 0.81, 0.55, 0.39, 0.24, 0.17, 0.09,
];

/// Building connection limit (kW), 16 A three-phase.
pub const DEFAULT_BUILDING_MAX_POWER_KW: f64 = 11.0;

/// Converts base-load fractions to kW, rounded to 2 decimals.
pub fn base_load_kw(fractions: &[f64], max_power_kw: f64) -> Vec<f64> {
    fractions
        .iter()
        .map(|fraction| round2(fraction * max_power_kw))
        .collect()
}

/// Parameters fixed for the lifetime of a station.
///
/// Build from a validated [`crate::config::StationConfig`] with
/// [`crate::config::StationConfig::station_params`], or use
/// [`StationParams::default`] for the 60-ticks-per-hour household.
#[derive(Debug, Clone, PartialEq)]
pub struct StationParams {
    /// Ticks per simulated hour.
    pub ticks_per_hour: usize,
    /// Charger rated power (kW).
    pub charger_power_kw: f64,
    /// Usable battery capacity (kWh).
    pub max_capacity_kwh: f64,
    /// SoC at start-up and after reset (percent).
    pub initial_soc_percent: f64,
    /// Charging stops once SoC reaches this percent (at most 100).
    pub soc_ceiling_percent: f64,
    /// Cell temperature model and safety limit.
    pub thermal: ThermalModel,
    /// Household base load per hour (kW, 24 entries).
    pub base_load_kw: Vec<f64>,
    /// Energy price per hour (24 entries).
    pub price_per_kwh: Vec<f64>,
    /// Capacity of the in-memory event log.
    pub log_capacity: usize,
}

impl Default for StationParams {
    fn default() -> Self {
        Self {
            ticks_per_hour: 60,
            charger_power_kw: 7.4,
            max_capacity_kwh: 46.3,
            initial_soc_percent: 20.0,
            soc_ceiling_percent: 100.0,
            thermal: ThermalModel::default(),
            base_load_kw: base_load_kw(&DEFAULT_BASE_LOAD_FRACTION, DEFAULT_BUILDING_MAX_POWER_KW),
            price_per_kwh: DEFAULT_PRICE_PER_KWH.to_vec(),
            log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }
}

impl StationParams {
    /// Stored energy at start-up and after reset (kWh).
    pub fn initial_soc_kwh(&self) -> f64 {
        self.initial_soc_percent / 100.0 * self.max_capacity_kwh
    }

    /// Energy at which charging stops (kWh).
    pub fn ceiling_kwh(&self) -> f64 {
        if self.soc_ceiling_percent >= 100.0 {
            self.max_capacity_kwh
        } else {
            self.max_capacity_kwh * self.soc_ceiling_percent / 100.0
        }
    }

    /// Energy added by one charging tick (kWh).
    pub fn energy_per_tick_kwh(&self) -> f64 {
        self.charger_power_kw / self.ticks_per_hour as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_load_matches_household_profile() {
        let loads = base_load_kw(&DEFAULT_BASE_LOAD_FRACTION, DEFAULT_BUILDING_MAX_POWER_KW);
        assert_eq!(loads.len(), 24);
        assert_eq!(loads[0], 0.88);
        assert_eq!(loads[17], 11.0);
        assert_eq!(loads[23], 0.99);
    }

    #[test]
    fn default_initial_soc_is_twenty_percent() {
        let params = StationParams::default();
        assert!((params.initial_soc_kwh() - 9.26).abs() < 1e-9);
    }

    #[test]
    fn ceiling_is_exact_capacity_at_100_percent() {
        let params = StationParams::default();
        assert_eq!(params.ceiling_kwh(), 46.3);

        let capped = StationParams {
            soc_ceiling_percent: 80.0,
            ..StationParams::default()
        };
        assert!((capped.ceiling_kwh() - 37.04).abs() < 1e-9);
    }

    #[test]
    fn energy_per_tick_scales_with_ticks_per_hour() {
        let params = StationParams {
            ticks_per_hour: 4,
            ..StationParams::default()
        };
        assert!((params.energy_per_tick_kwh() - 1.85).abs() < 1e-12);
    }
}
