/// Simulated wall clock driven by ticks.
pub mod clock;
pub mod error;
/// Bounded in-memory event log.
pub mod event_log;
pub mod params;
/// Hour-by-hour charge planner.
pub mod planner;
pub mod scheduler;
pub mod shared;
/// Charging station state machine.
pub mod station;
pub mod thermal;
pub mod types;

pub use error::StationError;
pub use params::StationParams;
pub use shared::SharedStation;
pub use station::Station;
