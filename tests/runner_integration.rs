//! Headless runs driven by the planner, and CSV export of their records.

mod common;

use common::fast_params;
use ev_charge_sim::config::StationConfig;
use ev_charge_sim::io::export::write_csv;
use ev_charge_sim::runner::run_hours;
use ev_charge_sim::sim::planner::{ChargePlanner, PlannerMode};

fn planner(mode: PlannerMode) -> ChargePlanner {
    let params = fast_params();
    ChargePlanner::new(mode, &params.price_per_kwh, 8, 80.0, 11.0)
}

#[test]
fn price_mode_is_cheaper_per_kwh_than_load_mode() {
    let load = run_hours(fast_params(), &planner(PlannerMode::Load), 24);
    let price = run_hours(fast_params(), &planner(PlannerMode::Price), 24);

    assert!(load.summary.total_energy_kwh > 0.0);
    assert!(price.summary.total_energy_kwh > 0.0);
    assert!(price.summary.avg_price < load.summary.avg_price);
}

#[test]
fn energy_matches_soc_gain() {
    let report = run_hours(fast_params(), &planner(PlannerMode::Load), 24);
    let gained_kwh = (report.summary.final_soc_percent - 20.0) / 100.0 * 46.3;
    assert!((report.summary.total_energy_kwh - gained_kwh).abs() < 0.05);
}

#[test]
fn runs_longer_than_a_day_wrap_hours() {
    let report = run_hours(fast_params(), &ChargePlanner::off(), 30);
    assert_eq!(report.records.len(), 30);
    assert_eq!(report.records[24].hour, 0);
    assert_eq!(report.records[29].hour, 5);
}

#[test]
fn config_planner_drives_run() {
    let mut cfg = StationConfig::fast();
    cfg.planner.mode = PlannerMode::Price;
    cfg.planner.cheapest_hours = 2;
    assert!(cfg.validate().is_empty());

    let report = run_hours(cfg.station_params(), &cfg.planner(), 24);
    let charged: Vec<usize> = report
        .records
        .iter()
        .filter(|r| r.charging)
        .map(|r| r.hour)
        .collect();
    assert_eq!(charged, vec![22, 23]);
}

#[test]
fn csv_has_one_row_per_hour() {
    let report = run_hours(fast_params(), &planner(PlannerMode::Load), 24);
    let mut buf = Vec::new();
    write_csv(&report.records, &mut buf).unwrap();

    let text = String::from_utf8(buf).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("hour,base_load_kw,price,battery_percent,charging,energy_kwh,cost")
    );
    assert_eq!(lines.next(), Some("0,0.88,85.28,20.00,true,7.40,631.07"));
    assert_eq!(lines.count(), 23);
}
