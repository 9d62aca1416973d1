//! Hour-by-hour charge planner.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::types::ChargeIntent;

/// Charging strategy used by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlannerMode {
    /// Never issue commands.
    #[default]
    Off,
    /// Charge whenever the household load leaves headroom.
    Load,
    /// Charge only during the cheapest hours of the day.
    Price,
}

impl PlannerMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Load => "load",
            Self::Price => "price",
        }
    }
}

impl fmt::Display for PlannerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlannerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "load" => Ok(Self::Load),
            "price" => Ok(Self::Price),
            other => Err(format!(
                "unknown planner mode \"{other}\", expected off, load or price"
            )),
        }
    }
}

/// Indices of the `count` lowest prices, ties broken by hour.
pub fn cheapest_hours(prices: &[f64], count: usize) -> Vec<usize> {
    let mut hours: Vec<usize> = (0..prices.len()).collect();
    hours.sort_by(|&a, &b| prices[a].total_cmp(&prices[b]));
    hours.truncate(count);
    hours
}

/// Decides the charge intent at the start of every simulated hour.
///
/// Charging is wanted while the hour's base load is under `load_limit_kw`
/// and the battery is under `target_soc_percent`; in price mode the hour
/// must additionally be one of the cheapest.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargePlanner {
    mode: PlannerMode,
    cheapest: Vec<usize>,
    target_soc_percent: f64,
    load_limit_kw: f64,
}

impl ChargePlanner {
    /// Builds a planner for the given price table.
    ///
    /// # Arguments
    ///
    /// * `mode` - Charging strategy
    /// * `prices` - Hourly price table (24 entries)
    /// * `cheapest_count` - Number of hours eligible in price mode
    /// * `target_soc_percent` - Stop asking for charge at this SoC
    /// * `load_limit_kw` - Household load at or above which charging is not wanted
    pub fn new(
        mode: PlannerMode,
        prices: &[f64],
        cheapest_count: usize,
        target_soc_percent: f64,
        load_limit_kw: f64,
    ) -> Self {
        let cheapest = match mode {
            PlannerMode::Price => cheapest_hours(prices, cheapest_count),
            PlannerMode::Off | PlannerMode::Load => Vec::new(),
        };
        Self {
            mode,
            cheapest,
            target_soc_percent,
            load_limit_kw,
        }
    }

    /// A planner that never issues commands.
    pub fn off() -> Self {
        Self::new(PlannerMode::Off, &[], 0, 0.0, 0.0)
    }

    pub fn mode(&self) -> PlannerMode {
        self.mode
    }

    /// Hours eligible for charging in price mode, cheapest first.
    pub fn cheapest(&self) -> &[usize] {
        &self.cheapest
    }

    /// Returns the intent for `hour`, or `None` when the planner is off.
    pub fn decide(&self, hour: usize, soc_percent: f64, base_load_kw: f64) -> Option<ChargeIntent> {
        let hour_allowed = match self.mode {
            PlannerMode::Off => return None,
            PlannerMode::Load => true,
            PlannerMode::Price => self.cheapest.contains(&hour),
        };
        let wanted = base_load_kw < self.load_limit_kw
            && soc_percent < self.target_soc_percent
            && hour_allowed;
        Some(ChargeIntent::from_flag(wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::params::DEFAULT_PRICE_PER_KWH;

    #[test]
    fn cheapest_hours_of_default_tariff() {
        let hours = cheapest_hours(&DEFAULT_PRICE_PER_KWH, 8);
        assert_eq!(hours, vec![22, 23, 3, 2, 4, 1, 21, 20]);
    }

    #[test]
    fn cheapest_hours_ties_keep_hour_order() {
        let hours = cheapest_hours(&[5.0, 1.0, 1.0, 0.5], 3);
        assert_eq!(hours, vec![3, 1, 2]);
    }

    #[test]
    fn off_never_decides() {
        let planner = ChargePlanner::off();
        assert_eq!(planner.decide(3, 10.0, 0.5), None);
    }

    #[test]
    fn load_mode_charges_below_target_and_limit() {
        let planner = ChargePlanner::new(PlannerMode::Load, &DEFAULT_PRICE_PER_KWH, 8, 80.0, 11.0);
        assert_eq!(planner.decide(9, 20.0, 4.4), Some(ChargeIntent::On));
        assert_eq!(planner.decide(9, 80.0, 4.4), Some(ChargeIntent::Off));
        // 17:00 peaks at the building limit.
        assert_eq!(planner.decide(17, 20.0, 11.0), Some(ChargeIntent::Off));
    }

    #[test]
    fn price_mode_charges_only_in_cheap_hours() {
        let planner = ChargePlanner::new(PlannerMode::Price, &DEFAULT_PRICE_PER_KWH, 8, 80.0, 11.0);
        assert_eq!(planner.decide(22, 20.0, 1.87), Some(ChargeIntent::On));
        assert_eq!(planner.decide(8, 20.0, 3.85), Some(ChargeIntent::Off));
        assert_eq!(planner.cheapest().len(), 8);
    }

    #[test]
    fn mode_parses_lowercase_names() {
        assert_eq!("price".parse::<PlannerMode>(), Ok(PlannerMode::Price));
        assert!("greedy".parse::<PlannerMode>().is_err());
    }
}
