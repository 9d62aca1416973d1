//! Headless, planner-driven simulation over a number of simulated hours.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::sim::params::StationParams;
use crate::sim::planner::ChargePlanner;
use crate::sim::station::Station;
use crate::sim::types::round2;

/// State and totals for one simulated hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRecord {
    /// Simulated hour of day (0 to 23).
    pub hour: usize,
    /// Household base load during the hour (kW).
    pub base_load_kw: f64,
    /// Energy price during the hour.
    pub price: f64,
    /// SoC at the start of the hour, after the planner decision (percent).
    pub battery_percent: f64,
    /// Charging flag after the planner decision.
    pub charging: bool,
    /// Energy delivered to the battery during the hour (kWh).
    pub energy_kwh: f64,
    /// `energy_kwh * price`.
    pub cost: f64,
}

impl fmt::Display for HourlyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:00 | load={:>5.2} kW  price={:>6.2} | battery={:>6.2}%  charging={:<5} | \
             energy={:>5.2} kWh  cost={:>7.2}",
            self.hour,
            self.base_load_kw,
            self.price,
            self.battery_percent,
            self.charging,
            self.energy_kwh,
            self.cost,
        )
    }
}

/// Aggregate figures for a completed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Hours simulated.
    pub hours: usize,
    /// Energy delivered over the run (kWh).
    pub total_energy_kwh: f64,
    /// Cost of the delivered energy.
    pub total_cost: f64,
    /// Cost-weighted price per kWh, 0 when nothing was delivered.
    pub avg_price: f64,
    /// SoC after the last hour (percent).
    pub final_soc_percent: f64,
    /// Number of overtemperature trips.
    pub safety_trips: usize,
}

impl RunSummary {
    /// Aggregates hourly records.
    pub fn from_records(records: &[HourlyRecord], final_soc_percent: f64, safety_trips: usize) -> Self {
        let total_energy_kwh: f64 = records.iter().map(|r| r.energy_kwh).sum();
        let total_cost: f64 = records.iter().map(|r| r.cost).sum();
        let avg_price = if total_energy_kwh > 0.0 {
            total_cost / total_energy_kwh
        } else {
            0.0
        };
        Self {
            hours: records.len(),
            total_energy_kwh: round2(total_energy_kwh),
            total_cost: round2(total_cost),
            avg_price: round2(avg_price),
            final_soc_percent,
            safety_trips,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Charging Report ---")?;
        writeln!(f, "Hours simulated:     {}", self.hours)?;
        writeln!(f, "Energy delivered:    {:.2} kWh", self.total_energy_kwh)?;
        writeln!(f, "Total cost:          {:.2}", self.total_cost)?;
        writeln!(f, "Average price:       {:.2} per kWh", self.avg_price)?;
        writeln!(f, "Final battery:       {:.2}%", self.final_soc_percent)?;
        write!(f, "Safety trips:        {}", self.safety_trips)
    }
}

/// Records and summary of a headless run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub records: Vec<HourlyRecord>,
    pub summary: RunSummary,
}

/// Runs a fresh station for `hours` simulated hours without sleeping.
///
/// At the start of every hour the planner's decision is submitted as a
/// charge intent, then the station is ticked `ticks_per_hour` times.
///
/// # Arguments
///
/// * `params` - Station parameters
/// * `planner` - Planner consulted once per hour
/// * `hours` - Number of simulated hours
pub fn run_hours(params: StationParams, planner: &ChargePlanner, hours: usize) -> RunReport {
    let ticks_per_hour = params.ticks_per_hour;
    let mut station = Station::new(params);
    let mut records = Vec::with_capacity(hours);
    let mut safety_trips = 0;

    for _ in 0..hours {
        let start = station.snapshot();
        let hour = start.sim_hour;
        let base_load_kw = station.params().base_load_kw[hour];
        let price = station.params().price_per_kwh[hour];

        if let Some(intent) = planner.decide(hour, start.soc_percent, base_load_kw) {
            station.set_charge_intent(intent);
        }
        let decided = station.snapshot();

        let mut energy_kwh = 0.0;
        for _ in 0..ticks_per_hour {
            let report = station.advance();
            energy_kwh += report.delivered_kwh;
            if report.tripped() {
                safety_trips += 1;
            }
        }

        let energy_kwh = round2(energy_kwh);
        let record = HourlyRecord {
            hour,
            base_load_kw,
            price,
            battery_percent: decided.soc_percent,
            charging: decided.charge_requested,
            energy_kwh,
            cost: round2(energy_kwh * price),
        };
        debug!(hour, energy_kwh, charging = record.charging, "hour simulated");
        records.push(record);
    }

    let summary = RunSummary::from_records(&records, station.soc_percent(), safety_trips);
    RunReport { records, summary }
}
