//! EV home-charging station simulator.

/// HTTP surface: status queries and charge, override, and reset commands.
#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod io;
pub mod runner;
/// Station state machine, clock, planner, and background tasks.
pub mod sim;
pub mod telemetry;
#[cfg(feature = "tui")]
pub mod tui;
