//! Charging station state machine: the tick function and the command mutators.

use super::clock::SimClock;
use super::event_log::{EventLog, LogEntry};
use super::params::StationParams;
use super::types::{
    ChargeIntent, ChargeOutcome, ChargingState, HOURS_PER_DAY, OverrideMode, OverrideStatus,
    StationEvent, StationSnapshot, TickReport, round2,
};

/// Home charging station owning the simulated clock, battery state of charge,
/// building load, and cell temperature.
///
/// `Station` is plain data with no interior locking; wrap it in a
/// [`super::shared::SharedStation`] to share it between the tick task and
/// request handlers.
#[derive(Debug, Clone)]
pub struct Station {
    params: StationParams,
    clock: SimClock,
    soc_kwh: f64,
    soc_percent: f64,
    battery_temp_c: f64,
    charge_requested: bool,
    override_mode: OverrideMode,
    building_load_kw: f64,
    resets: u64,
    log: EventLog,
}

impl Station {
    /// Creates a station at hour 0 with the battery at its initial SoC,
    /// charging off, and no override.
    ///
    /// # Panics
    ///
    /// Panics if the hourly tables do not have 24 entries, `ticks_per_hour`
    /// or `log_capacity` is zero, the capacity is not positive, or the SoC
    /// percentages are outside `[0, 100]`.
    pub fn new(params: StationParams) -> Self {
        assert_eq!(params.base_load_kw.len(), HOURS_PER_DAY);
        assert_eq!(params.price_per_kwh.len(), HOURS_PER_DAY);
        assert!(params.max_capacity_kwh > 0.0);
        assert!((0.0..=100.0).contains(&params.initial_soc_percent));
        assert!(params.soc_ceiling_percent > 0.0 && params.soc_ceiling_percent <= 100.0);

        let clock = SimClock::new(params.ticks_per_hour);
        let log = EventLog::new(params.log_capacity);
        let mut station = Self {
            params,
            clock,
            soc_kwh: 0.0,
            soc_percent: 0.0,
            battery_temp_c: 0.0,
            charge_requested: false,
            override_mode: OverrideMode::Auto,
            building_load_kw: 0.0,
            resets: 0,
            log,
        };
        station.restore_initial_state();
        station
    }

    fn restore_initial_state(&mut self) {
        self.clock.reset();
        self.soc_kwh = round2(self.params.initial_soc_kwh());
        self.soc_percent = self.params.initial_soc_percent;
        self.battery_temp_c = self.params.thermal.ambient_c;
        self.charge_requested = false;
        self.override_mode = OverrideMode::Auto;
        self.building_load_kw = self.params.base_load_kw[0];
    }

    fn log_event(&mut self, event: &StationEvent) {
        self.log.push(self.clock.hour(), self.clock.minute(), event);
    }

    /// Appends an event to the log and to the tick report.
    fn record(&mut self, report: &mut TickReport, event: StationEvent) {
        self.log_event(&event);
        report.events.push(event);
    }

    /// Advances the station by one tick.
    ///
    /// While charging is requested the cell temperature is recomputed and
    /// checked against the safety limit first; only if charging survives the
    /// check is energy added, clamped at the SoC ceiling. The building load
    /// reflects the charger draw whenever energy was delivered. Finally the
    /// clock moves on, refreshing the load from the base profile when a new
    /// hour starts.
    ///
    /// # Returns
    ///
    /// A `TickReport` with the events raised and the energy delivered.
    pub fn advance(&mut self) -> TickReport {
        let mut report = TickReport::default();
        let mut delivered = false;

        if self.charge_requested {
            let power_kw = self.params.charger_power_kw;
            let temperature_c = self.params.thermal.temperature_c(power_kw);
            self.battery_temp_c = temperature_c;

            // Thermal trip wins over any override.
            if self.params.thermal.exceeds_limit(temperature_c) {
                self.charge_requested = false;
                self.record(&mut report, StationEvent::Overtemperature { temperature_c });
            }

            if self.charge_requested && self.soc_percent < self.params.soc_ceiling_percent {
                let before_kwh = self.soc_kwh;
                let ceiling_kwh = self.params.ceiling_kwh();
                let next_kwh = self.soc_kwh + self.params.energy_per_tick_kwh();

                if next_kwh >= ceiling_kwh {
                    self.soc_kwh = ceiling_kwh;
                    self.soc_percent = self.params.soc_ceiling_percent;
                    self.charge_requested = false;
                    self.record(
                        &mut report,
                        StationEvent::BatteryFull {
                            soc_kwh: ceiling_kwh,
                        },
                    );
                } else {
                    self.soc_kwh = round2(next_kwh);
                    self.soc_percent = round2(self.soc_kwh / self.params.max_capacity_kwh * 100.0)
                        .clamp(0.0, 100.0);
                }

                report.delivered_kwh = self.soc_kwh - before_kwh;
                delivered = true;
            }
        }

        let base_kw = self.params.base_load_kw[self.clock.hour()];
        self.building_load_kw = if delivered {
            round2(base_kw + self.params.charger_power_kw)
        } else {
            base_kw
        };

        if let Some(hour) = self.clock.tick() {
            self.building_load_kw = self.params.base_load_kw[hour];
            report.events.push(StationEvent::HourAdvanced { hour });
        }

        report
    }

    /// Applies a charge intent from the algorithm or a dashboard.
    ///
    /// Ignored while an override is active: the outcome then reports the
    /// unchanged charging flag with `applied == false`.
    pub fn set_charge_intent(&mut self, intent: ChargeIntent) -> ChargeOutcome {
        if self.override_mode.is_forced() {
            return ChargeOutcome {
                charging: self.charge_requested,
                override_mode: self.override_mode,
                applied: false,
            };
        }

        self.charge_requested = intent.is_on();
        self.log_event(&StationEvent::ChargeCommand {
            charging: self.charge_requested,
        });

        ChargeOutcome {
            charging: self.charge_requested,
            override_mode: self.override_mode,
            applied: true,
        }
    }

    /// Sets the user override.
    ///
    /// `ForceOn` and `ForceOff` take effect immediately; `Auto` hands control
    /// back to charge-intent commands without touching the charging flag.
    pub fn set_override(&mut self, mode: OverrideMode) -> OverrideStatus {
        self.override_mode = mode;
        match mode {
            OverrideMode::ForceOn => self.charge_requested = true,
            OverrideMode::ForceOff => self.charge_requested = false,
            OverrideMode::Auto => {}
        }

        self.log_event(&StationEvent::OverrideChanged {
            override_mode: mode,
            charging: self.charge_requested,
        });

        OverrideStatus {
            override_mode: self.override_mode,
            charging: self.charge_requested,
        }
    }

    /// Returns the station to its start-up values (initial SoC, 00:00,
    /// charging off, auto mode). The event log is kept.
    pub fn reset(&mut self) -> StationSnapshot {
        self.restore_initial_state();
        self.resets += 1;
        self.log_event(&StationEvent::Reset {
            soc_percent: self.soc_percent,
        });
        self.snapshot()
    }

    /// Copies every state field.
    pub fn snapshot(&self) -> StationSnapshot {
        StationSnapshot {
            sim_hour: self.clock.hour(),
            sim_minute: self.clock.minute(),
            building_load_kw: self.building_load_kw,
            soc_kwh: self.soc_kwh,
            soc_percent: self.soc_percent,
            max_capacity_kwh: self.params.max_capacity_kwh,
            battery_temp_c: self.battery_temp_c,
            charge_requested: self.charge_requested,
            override_mode: self.override_mode,
            charging_state: self.charging_state(),
        }
    }

    /// `Charging` while charging is requested and the battery is below the ceiling.
    pub fn charging_state(&self) -> ChargingState {
        if self.charge_requested && self.soc_percent < self.params.soc_ceiling_percent {
            ChargingState::Charging
        } else {
            ChargingState::Idle
        }
    }

    /// Number of `reset` calls since construction.
    pub fn reset_count(&self) -> u64 {
        self.resets
    }

    pub fn soc_percent(&self) -> f64 {
        self.soc_percent
    }

    pub fn override_status(&self) -> OverrideStatus {
        OverrideStatus {
            override_mode: self.override_mode,
            charging: self.charge_requested,
        }
    }

    /// Up to `limit` most recent log entries, oldest first.
    pub fn recent_log(&self, limit: usize) -> Vec<LogEntry> {
        self.log.recent(limit)
    }

    pub fn params(&self) -> &StationParams {
        &self.params
    }
}

impl Default for Station {
    fn default() -> Self {
        Self::new(StationParams::default())
    }
}
