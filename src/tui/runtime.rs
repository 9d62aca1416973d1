//! TUI application state around an in-process station.

use std::collections::VecDeque;
use std::time::Instant;

use crate::config::StationConfig;
use crate::sim::event_log::LogEntry;
use crate::sim::station::Station;
use crate::sim::types::{ChargeIntent, OverrideMode, StationSnapshot};

/// Maximum number of load samples kept for the rolling chart.
const MAX_HISTORY: usize = 240;

/// Tick interval options in milliseconds (slowest → fastest).
const SPEED_LEVELS_MS: [u64; 6] = [1000, 500, 250, 100, 50, 20];

/// Default speed index (500 ms).
const DEFAULT_SPEED_IDX: usize = 1;

/// TUI application state.
pub struct App {
    /// Station driven directly by the event loop; no lock needed.
    station: Station,
    /// Rolling `(tick, building load kW)` samples for the chart.
    pub load_history: VecDeque<(f64, f64)>,
    /// Ticks executed since start or last reset.
    pub ticks: u64,
    /// Whether the simulation is paused.
    pub paused: bool,
    /// Current index into `SPEED_LEVELS_MS`.
    pub speed_idx: usize,
    /// Whether the user has requested quit.
    pub quit: bool,
    /// When the last simulation tick was executed.
    pub last_tick: Instant,
    /// Name of the active preset or config file.
    pub source_name: String,
    /// Currency label for the price chart.
    pub currency: String,
}

impl App {
    /// Creates an app from a validated configuration.
    pub fn new(config: &StationConfig, source_name: &str) -> Self {
        Self {
            station: Station::new(config.station_params()),
            load_history: VecDeque::with_capacity(MAX_HISTORY),
            ticks: 0,
            paused: false,
            speed_idx: DEFAULT_SPEED_IDX,
            quit: false,
            last_tick: Instant::now(),
            source_name: source_name.to_string(),
            currency: config.tariff.currency.clone(),
        }
    }

    /// Advances the station by one tick and records the load sample.
    pub fn tick(&mut self) {
        self.station.advance();
        if self.load_history.len() >= MAX_HISTORY {
            self.load_history.pop_front();
        }
        let load = self.station.snapshot().building_load_kw;
        self.load_history.push_back((self.ticks as f64, load));
        self.ticks += 1;
    }

    pub fn charge(&mut self, intent: ChargeIntent) {
        self.station.set_charge_intent(intent);
    }

    pub fn set_override(&mut self, mode: OverrideMode) {
        self.station.set_override(mode);
    }

    /// Resets the station and clears the chart.
    pub fn reset(&mut self) {
        self.station.reset();
        self.load_history.clear();
        self.ticks = 0;
    }

    /// Toggles pause/resume.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Increases simulation speed (shorter tick interval).
    pub fn speed_up(&mut self) {
        if self.speed_idx + 1 < SPEED_LEVELS_MS.len() {
            self.speed_idx += 1;
        }
    }

    /// Decreases simulation speed (longer tick interval).
    pub fn speed_down(&mut self) {
        if self.speed_idx > 0 {
            self.speed_idx -= 1;
        }
    }

    /// Returns the current tick interval in milliseconds.
    pub fn tick_interval_ms(&self) -> u64 {
        SPEED_LEVELS_MS[self.speed_idx]
    }

    pub fn snapshot(&self) -> StationSnapshot {
        self.station.snapshot()
    }

    pub fn prices(&self) -> &[f64] {
        &self.station.params().price_per_kwh
    }

    pub fn recent_log(&self, limit: usize) -> Vec<LogEntry> {
        self.station.recent_log(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_app() -> App {
        App::new(&StationConfig::fast(), "fast")
    }

    #[test]
    fn app_creates_and_ticks() {
        let mut app = fast_app();
        assert_eq!(app.ticks, 0);
        app.charge(ChargeIntent::On);
        app.tick();
        assert_eq!(app.ticks, 1);
        assert_eq!(app.load_history.len(), 1);
        assert_eq!(app.load_history[0].1, 8.28);
    }

    #[test]
    fn override_keys_reach_station() {
        let mut app = fast_app();
        app.set_override(OverrideMode::ForceOff);
        app.charge(ChargeIntent::On);
        let s = app.snapshot();
        assert!(!s.charge_requested);
        assert_eq!(s.override_mode, OverrideMode::ForceOff);
    }

    #[test]
    fn reset_clears_history() {
        let mut app = fast_app();
        for _ in 0..5 {
            app.tick();
        }
        app.reset();
        assert_eq!(app.ticks, 0);
        assert!(app.load_history.is_empty());
        assert_eq!(app.snapshot().sim_hour, 0);
    }

    #[test]
    fn speed_controls_stay_in_bounds() {
        let mut app = fast_app();
        for _ in 0..10 {
            app.speed_down();
        }
        assert_eq!(app.speed_idx, 0);
        for _ in 0..10 {
            app.speed_up();
        }
        assert_eq!(app.speed_idx, SPEED_LEVELS_MS.len() - 1);
    }

    #[test]
    fn history_caps_at_max() {
        let mut app = fast_app();
        for _ in 0..(MAX_HISTORY + 10) {
            app.tick();
        }
        assert_eq!(app.load_history.len(), MAX_HISTORY);
    }
}
