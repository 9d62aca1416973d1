//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use ev_charge_sim::config::StationConfig;
use ev_charge_sim::sim::params::StationParams;
use ev_charge_sim::sim::station::Station;
use ev_charge_sim::sim::thermal::ThermalModel;

/// Float tolerance for kWh and percent comparisons.
pub const EPS: f64 = 1e-9;

/// Fast station parameters (4 ticks per hour, otherwise standard).
pub fn fast_params() -> StationParams {
    StationConfig::fast().station_params()
}

/// Fresh fast station.
pub fn fast_station() -> Station {
    Station::new(fast_params())
}

/// Fast station whose cell model overheats on the first charging tick.
pub fn overheating_station() -> Station {
    Station::new(StationParams {
        thermal: ThermalModel {
            internal_resistance_ohm: 10.0,
            ..ThermalModel::default()
        },
        ..fast_params()
    })
}

/// Asserts the SoC invariants on a station.
pub fn assert_soc_bounds(station: &Station) {
    let s = station.snapshot();
    assert!(s.soc_kwh >= 0.0 && s.soc_kwh <= s.max_capacity_kwh, "soc_kwh out of range: {}", s.soc_kwh);
    assert!((0.0..=100.0).contains(&s.soc_percent), "soc_percent out of range: {}", s.soc_percent);
    assert!(s.sim_minute < 60);
    assert!(s.sim_hour < 24);
}
