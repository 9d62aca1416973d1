//! Errors reported by station commands.

use thiserror::Error;

/// Invalid input submitted to the station.
///
/// Station state is never changed when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StationError {
    /// Charge command other than `on` or `off`.
    #[error("invalid command \"{0}\", expected \"on\" or \"off\"")]
    InvalidCommand(String),

    /// Override mode other than `auto`, `force_on`, or `force_off`.
    #[error("invalid mode \"{0}\", expected \"auto\", \"force_on\" or \"force_off\"")]
    InvalidOverrideMode(String),
}
