//! Station simulator entry point: CLI wiring and config-driven start-up.

use std::process;
#[cfg(feature = "api")]
use std::time::Duration;

use clap::Parser;

use ev_charge_sim::cli::{Args, Command, RunArgs, ServeArgs};
use ev_charge_sim::config::StationConfig;
use ev_charge_sim::io::export::export_csv;
use ev_charge_sim::runner::run_hours;
use ev_charge_sim::telemetry;

/// How often the autopilot checks for a new simulated hour.
#[cfg(feature = "api")]
const AUTOPILOT_POLL: Duration = Duration::from_millis(100);

/// Prints every validation error and exits if there are any.
fn validate_or_exit(cfg: &StationConfig) {
    let errors = cfg.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
}

fn load_or_exit(source: &ev_charge_sim::cli::SourceArgs) -> StationConfig {
    source.load().unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    })
}

fn run(args: &RunArgs) {
    let mut cfg = load_or_exit(&args.source);
    if let Some(mode) = args.planner {
        cfg.planner.mode = mode;
    }
    validate_or_exit(&cfg);

    let report = run_hours(cfg.station_params(), &cfg.planner(), args.hours);
    for record in &report.records {
        println!("{record}");
    }
    println!("\n{}", report.summary);

    if let Some(path) = &args.telemetry_out {
        if let Err(e) = export_csv(&report.records, path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Telemetry written to {}", path.display());
    }
}

#[cfg(feature = "api")]
async fn serve(args: &ServeArgs) {
    use std::sync::Arc;

    use ev_charge_sim::api::{self, AppState};
    use ev_charge_sim::sim::SharedStation;
    use ev_charge_sim::sim::planner::PlannerMode;
    use ev_charge_sim::sim::scheduler::{spawn_autopilot, spawn_ticker};
    use tokio_util::sync::CancellationToken;
    use tracing::{error, info};

    let mut cfg = load_or_exit(&args.source);
    args.apply(&mut cfg);
    validate_or_exit(&cfg);
    let addr = cfg.bind_addr().unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    let station = SharedStation::new(cfg.station_params());
    let token = CancellationToken::new();
    let period = Duration::from_millis(cfg.simulation.tick_interval_ms);

    let ticker = spawn_ticker(station.clone(), period, token.clone());
    let autopilot = (cfg.planner.mode != PlannerMode::Off).then(|| {
        spawn_autopilot(station.clone(), cfg.planner(), AUTOPILOT_POLL, token.clone())
    });

    let shutdown = token.clone();
    tokio::spawn(async move {
        telemetry::shutdown_signal().await;
        shutdown.cancel();
    });

    info!(
        ticks_per_hour = cfg.simulation.ticks_per_hour,
        tick_interval_ms = cfg.simulation.tick_interval_ms,
        planner = %cfg.planner.mode,
        "station started"
    );

    let state = Arc::new(AppState { station });
    let result = api::serve(state, addr, token.clone()).await;
    token.cancel();

    let _ = ticker.await;
    if let Some(handle) = autopilot {
        let _ = handle.await;
    }

    if let Err(e) = result {
        error!(error = %e, "server failed");
        process::exit(1);
    }
    info!("station stopped");
}

#[cfg(not(feature = "api"))]
async fn serve(_args: &ServeArgs) {
    eprintln!("error: built without the `api` feature");
    process::exit(1);
}

fn main() {
    let args = Args::parse();
    telemetry::init_tracing(args.log_json);

    match &args.command {
        Command::Run(run_args) => run(run_args),
        Command::Serve(serve_args) => {
            let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
                eprintln!("error: failed to create tokio runtime: {e}");
                process::exit(1);
            });
            rt.block_on(serve(serve_args));
        }
        #[cfg(feature = "tui")]
        Command::Tui(source) => {
            let cfg = load_or_exit(source);
            validate_or_exit(&cfg);
            if let Err(e) = ev_charge_sim::tui::run(&cfg, &source.name()) {
                eprintln!("error: TUI crashed: {e}");
                process::exit(1);
            }
        }
    }
}
