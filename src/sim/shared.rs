//! Thread-safe handle around a [`Station`].

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::event_log::LogEntry;
use super::params::StationParams;
use super::station::Station;
use super::types::{
    ChargeIntent, ChargeOutcome, OverrideMode, OverrideStatus, StationEvent, StationSnapshot,
    TickReport,
};

/// Cloneable handle shared by the tick task, the autopilot, and HTTP handlers.
///
/// Every query and command takes the station lock exactly once, so a
/// snapshot never observes a half-applied tick. Tracing happens after the
/// lock is released.
#[derive(Debug, Clone)]
pub struct SharedStation {
    inner: Arc<Mutex<Station>>,
    params: Arc<StationParams>,
}

impl SharedStation {
    pub fn new(params: StationParams) -> Self {
        let station = Station::new(params.clone());
        Self {
            inner: Arc::new(Mutex::new(station)),
            params: Arc::new(params),
        }
    }

    /// Runs one tick and traces the events it raised.
    pub fn advance(&self) -> TickReport {
        let report = self.inner.lock().advance();
        for event in &report.events {
            trace_event(event);
        }
        report
    }

    /// Applies a charge intent; ignored while an override is active.
    pub fn set_charge_intent(&self, intent: ChargeIntent) -> ChargeOutcome {
        let outcome = self.inner.lock().set_charge_intent(intent);
        if outcome.applied {
            info!(charging = outcome.charging, "charge command applied");
        } else {
            debug!(
                requested = intent.as_str(),
                override_mode = %outcome.override_mode,
                "charge command ignored under override"
            );
        }
        outcome
    }

    pub fn set_override(&self, mode: OverrideMode) -> OverrideStatus {
        let status = self.inner.lock().set_override(mode);
        info!(
            override_mode = %status.override_mode,
            charging = status.charging,
            "override changed"
        );
        status
    }

    pub fn reset(&self) -> StationSnapshot {
        let snapshot = self.inner.lock().reset();
        info!(soc_percent = snapshot.soc_percent, "station reset");
        snapshot
    }

    pub fn snapshot(&self) -> StationSnapshot {
        self.inner.lock().snapshot()
    }

    /// Snapshot together with the station's reset count, under one lock.
    pub fn snapshot_with_resets(&self) -> (StationSnapshot, u64) {
        let station = self.inner.lock();
        (station.snapshot(), station.reset_count())
    }

    pub fn override_status(&self) -> OverrideStatus {
        self.inner.lock().override_status()
    }

    /// Up to `limit` most recent log entries, oldest first.
    pub fn log_entries(&self, limit: usize) -> Vec<LogEntry> {
        self.inner.lock().recent_log(limit)
    }

    /// Static parameters; readable without the lock.
    pub fn params(&self) -> &StationParams {
        &self.params
    }

    pub fn price_table(&self) -> &[f64] {
        &self.params.price_per_kwh
    }

    pub fn base_load_table(&self) -> &[f64] {
        &self.params.base_load_kw
    }
}

fn trace_event(event: &StationEvent) {
    match event {
        StationEvent::Overtemperature { temperature_c } => {
            warn!(temperature_c, "{event}");
        }
        StationEvent::BatteryFull { soc_kwh } => info!(soc_kwh, "{event}"),
        StationEvent::HourAdvanced { hour } => debug!(hour, "{event}"),
        other => debug!("{other}"),
    }
}
