//! Background tasks that drive a [`SharedStation`] in real time.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::planner::ChargePlanner;
use super::shared::SharedStation;

/// Spawns the tick loop: one `advance` per `period` until `token` is cancelled.
pub fn spawn_ticker(
    station: SharedStation,
    period: Duration,
    token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of a tokio interval completes immediately.
        interval.tick().await;
        info!(period_ms = period.as_millis() as u64, "tick loop started");

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = interval.tick() => {
                    station.advance();
                }
            }
        }
        info!("tick loop stopped");
    })
}

/// Spawns the autopilot: polls the station every `poll` and submits the
/// planner's decision once per simulated hour, and again after a reset.
///
/// Decisions go through `set_charge_intent`, so an active override wins.
pub fn spawn_autopilot(
    station: SharedStation,
    planner: ChargePlanner,
    poll: Duration,
    token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval(poll);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_decision = None;
        info!(mode = %planner.mode(), "autopilot started");

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = interval.tick() => {
                    let (snapshot, resets) = station.snapshot_with_resets();
                    let key = (snapshot.sim_hour, resets);
                    if last_decision == Some(key) {
                        continue;
                    }
                    last_decision = Some(key);

                    let base_load_kw = station.base_load_table()[snapshot.sim_hour];
                    if let Some(intent) =
                        planner.decide(snapshot.sim_hour, snapshot.soc_percent, base_load_kw)
                    {
                        debug!(hour = snapshot.sim_hour, intent = intent.as_str(), "autopilot decision");
                        station.set_charge_intent(intent);
                    }
                }
            }
        }
        info!("autopilot stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::params::StationParams;
    use crate::sim::planner::PlannerMode;
    use crate::sim::types::ChargeIntent;

    fn fast() -> SharedStation {
        SharedStation::new(StationParams {
            ticks_per_hour: 4,
            ..StationParams::default()
        })
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_advances_until_cancelled() {
        let station = fast();
        station.set_charge_intent(ChargeIntent::On);
        let token = CancellationToken::new();
        let handle = spawn_ticker(station.clone(), Duration::from_millis(100), token.clone());

        time::sleep(Duration::from_millis(450)).await;
        token.cancel();
        handle.await.unwrap();

        let s = station.snapshot();
        assert_eq!(s.sim_hour, 1);
        assert!(s.soc_kwh > 9.26);

        let frozen = station.snapshot();
        time::sleep(Duration::from_millis(500)).await;
        assert_eq!(station.snapshot(), frozen);
    }

    #[tokio::test(start_paused = true)]
    async fn autopilot_submits_planner_decision() {
        let station = fast();
        let planner = ChargePlanner::new(
            PlannerMode::Load,
            station.price_table(),
            8,
            80.0,
            11.0,
        );
        let token = CancellationToken::new();
        let handle = spawn_autopilot(
            station.clone(),
            planner,
            Duration::from_millis(10),
            token.clone(),
        );

        time::sleep(Duration::from_millis(25)).await;
        token.cancel();
        handle.await.unwrap();

        assert!(station.snapshot().charge_requested);
    }

    #[tokio::test(start_paused = true)]
    async fn autopilot_decides_again_after_reset() {
        let station = fast();
        let planner = ChargePlanner::new(
            PlannerMode::Load,
            station.price_table(),
            8,
            80.0,
            11.0,
        );
        let token = CancellationToken::new();
        let handle = spawn_autopilot(
            station.clone(),
            planner,
            Duration::from_millis(10),
            token.clone(),
        );

        time::sleep(Duration::from_millis(25)).await;
        assert!(station.snapshot().charge_requested);

        // Reset lands back in hour 0 with charging off.
        station.reset();
        assert!(!station.snapshot().charge_requested);

        time::sleep(Duration::from_millis(25)).await;
        token.cancel();
        handle.await.unwrap();

        let s = station.snapshot();
        assert_eq!(s.sim_hour, 0);
        assert!(s.charge_requested);
    }
}
