//! Command-line interface.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::config::{ConfigError, StationConfig};
use crate::sim::planner::PlannerMode;

#[derive(Parser)]
#[command(author, version, about = "EV home-charging station simulator")]
pub struct Args {
    /// Emit logs as JSON lines.
    #[clap(long, global = true, env = "LOG_JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the station in real time behind the HTTP API.
    #[clap(name = "serve")]
    Serve(ServeArgs),

    /// Simulate a number of hours as fast as possible and print a report.
    #[clap(name = "run")]
    Run(RunArgs),

    /// Live terminal dashboard.
    #[cfg(feature = "tui")]
    #[clap(name = "tui")]
    Tui(SourceArgs),
}

/// Where the station configuration comes from.
#[derive(Clone, ClapArgs)]
pub struct SourceArgs {
    /// TOML configuration file.
    #[clap(long, env = "STATION_CONFIG", conflicts_with = "preset")]
    pub config: Option<PathBuf>,

    /// Built-in preset (`standard` or `fast`).
    #[clap(long)]
    pub preset: Option<String>,
}

impl SourceArgs {
    /// Loads the file, the preset, or the standard configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be parsed or the preset is unknown.
    pub fn load(&self) -> Result<StationConfig, ConfigError> {
        if let Some(path) = &self.config {
            StationConfig::from_toml_file(path)
        } else if let Some(name) = &self.preset {
            StationConfig::from_preset(name)
        } else {
            Ok(StationConfig::standard())
        }
    }

    /// Short label for the configuration source.
    pub fn name(&self) -> String {
        match (&self.config, &self.preset) {
            (Some(path), _) => path.display().to_string(),
            (None, Some(name)) => name.clone(),
            (None, None) => "standard".to_string(),
        }
    }
}

#[derive(ClapArgs)]
pub struct ServeArgs {
    #[clap(flatten)]
    pub source: SourceArgs,

    /// Socket address to bind, overrides `server.bind`.
    #[clap(long)]
    pub bind: Option<String>,

    /// Port to listen on, overrides the port of `server.bind`.
    #[clap(long, env = "PORT")]
    pub port: Option<u16>,

    /// Ticks per simulated hour.
    #[clap(long)]
    pub ticks_per_hour: Option<usize>,

    /// Wall-clock milliseconds per tick.
    #[clap(long)]
    pub tick_interval_ms: Option<u64>,

    /// Drive charging with the built-in planner.
    #[clap(long, value_enum)]
    pub planner: Option<PlannerMode>,
}

impl ServeArgs {
    /// Applies command-line overrides on top of a loaded configuration.
    pub fn apply(&self, cfg: &mut StationConfig) {
        if let Some(bind) = &self.bind {
            cfg.server.bind = bind.clone();
        }
        if let Some(port) = self.port {
            cfg.set_port(port);
        }
        if let Some(ticks) = self.ticks_per_hour {
            cfg.simulation.ticks_per_hour = ticks;
        }
        if let Some(ms) = self.tick_interval_ms {
            cfg.simulation.tick_interval_ms = ms;
        }
        if let Some(mode) = self.planner {
            cfg.planner.mode = mode;
        }
    }
}

#[derive(ClapArgs)]
pub struct RunArgs {
    #[clap(flatten)]
    pub source: SourceArgs,

    /// Simulated hours to run.
    #[clap(long, default_value = "24")]
    pub hours: usize,

    /// Planner strategy, overrides `planner.mode`.
    #[clap(long, value_enum)]
    pub planner: Option<PlannerMode>,

    /// Write the hourly records to this CSV file.
    #[clap(long)]
    pub telemetry_out: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_overrides() {
        let args = Args::try_parse_from([
            "ev-charge-sim",
            "serve",
            "--preset",
            "fast",
            "--port",
            "8080",
            "--planner",
            "price",
        ])
        .unwrap();
        let Command::Serve(serve) = args.command else {
            panic!("expected serve");
        };
        let mut cfg = serve.source.load().unwrap();
        serve.apply(&mut cfg);
        assert_eq!(cfg.simulation.ticks_per_hour, 4);
        assert_eq!(cfg.server.bind, "0.0.0.0:8080");
        assert_eq!(cfg.planner.mode, PlannerMode::Price);
    }

    #[test]
    fn run_defaults_to_one_day() {
        let args = Args::try_parse_from(["ev-charge-sim", "run"]).unwrap();
        let Command::Run(run) = args.command else {
            panic!("expected run");
        };
        assert_eq!(run.hours, 24);
        assert!(run.planner.is_none());
        assert_eq!(run.source.name(), "standard");
    }

    #[test]
    fn config_and_preset_conflict() {
        let result = Args::try_parse_from([
            "ev-charge-sim",
            "run",
            "--config",
            "station.toml",
            "--preset",
            "fast",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_planner_is_rejected() {
        let result = Args::try_parse_from(["ev-charge-sim", "run", "--planner", "greedy"]);
        assert!(result.is_err());
    }
}
