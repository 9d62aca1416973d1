//! Joule-heating estimate of the battery cell temperature while charging.

use super::types::round2;

/// Lumped, memoryless cell temperature model.
///
/// `T = T_ambient + R_int * I² * dt`, with `I = P / V_cell`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalModel {
    /// Ambient temperature (°C).
    pub ambient_c: f64,
    /// Assumed average cell voltage (V).
    pub cell_voltage_v: f64,
    /// Internal resistance (Ω).
    pub internal_resistance_ohm: f64,
    /// Heating interval per tick (s).
    pub step_s: f64,
    /// Charging stops when the temperature exceeds this value (°C).
    pub safety_limit_c: f64,
}

impl Default for ThermalModel {
    fn default() -> Self {
        Self {
            ambient_c: 25.0,
            cell_voltage_v: 3.8,
            internal_resistance_ohm: 0.002,
            step_s: 1.0,
            safety_limit_c: 45.0,
        }
    }
}

impl ThermalModel {
    /// Charging current for the given charger power.
    pub fn current(&self, power_kw: f64) -> f64 {
        power_kw / self.cell_voltage_v
    }

    /// Cell temperature while charging at `power_kw`, rounded to 2 decimals.
    pub fn temperature_c(&self, power_kw: f64) -> f64 {
        let current = self.current(power_kw);
        round2(self.ambient_c + self.internal_resistance_ohm * current * current * self.step_s)
    }

    /// Returns `true` if `temperature_c` is above the safety limit.
    pub fn exceeds_limit(&self, temperature_c: f64) -> bool {
        temperature_c > self.safety_limit_c
    }
}
