//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, Gauge, Paragraph,
};

use super::runtime::App;
use super::style;
use crate::sim::types::{ChargingState, StationSnapshot};

/// Log lines shown at the bottom of the screen.
const LOG_LINES: usize = 6;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let snapshot = app.snapshot();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // header
            Constraint::Min(10),    // charts
            Constraint::Length(3),  // SoC gauge
            Constraint::Length(4),  // status panel
            Constraint::Length(LOG_LINES as u16 + 2), // log
            Constraint::Length(1),  // footer
        ])
        .split(frame.area());

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    render_header(frame, app, &snapshot, chunks[0]);
    render_load_chart(frame, app, charts[0]);
    render_price_chart(frame, app, &snapshot, charts[1]);
    render_soc_gauge(frame, &snapshot, chunks[2]);
    render_status(frame, &snapshot, chunks[3]);
    render_log(frame, app, chunks[4]);
    render_footer(frame, chunks[5]);
}

/// Header bar: source name, simulated clock, speed, run state.
fn render_header(frame: &mut Frame, app: &App, snapshot: &StationSnapshot, area: Rect) {
    let (state_icon, state_label) = if app.paused {
        ("‖", "PAUSED")
    } else {
        ("▶", "RUNNING")
    };

    let header = Line::from(vec![
        Span::styled(
            " EV-CHARGE-SIM ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            &app.source_name,
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " │ {:02}:{:02} │ {}ms │ {} {} ",
            snapshot.sim_hour,
            snapshot.sim_minute,
            app.tick_interval_ms(),
            state_icon,
            state_label,
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Rolling building load chart.
fn render_load_chart(frame: &mut Frame, app: &App, area: Rect) {
    let data: Vec<(f64, f64)> = app.load_history.iter().copied().collect();
    let y_bounds = style::auto_bounds_y(&data);

    let x_lo = data.first().map_or(0.0, |p| p.0);
    let x_hi = data.last().map_or(1.0, |p| p.0).max(x_lo + 1.0);

    let datasets = vec![
        Dataset::default()
            .name("Load")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(style::LOAD_COLOR))
            .data(&data),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Building Load ")
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("tick")
                .bounds([x_lo, x_hi])
                .labels(vec![format!("{}", x_lo as u64), format!("{}", x_hi as u64)]),
        )
        .y_axis(
            Axis::default()
                .title("kW")
                .bounds(y_bounds)
                .labels(vec![
                    format!("{:.1}", y_bounds[0]),
                    format!("{:.1}", y_bounds[1]),
                ]),
        );

    frame.render_widget(chart, area);
}

/// 24-hour price bars with the current hour highlighted.
fn render_price_chart(frame: &mut Frame, app: &App, snapshot: &StationSnapshot, area: Rect) {
    let bars: Vec<Bar> = app
        .prices()
        .iter()
        .enumerate()
        .map(|(hour, price)| {
            let color = if hour == snapshot.sim_hour {
                style::PRICE_CURRENT
            } else {
                style::PRICE_COLOR
            };
            Bar::default()
                .value(price.max(0.0).round() as u64)
                .text_value(String::new())
                .label(Line::from(format!("{hour}")))
                .style(Style::default().fg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(format!(" Price ({}/kWh) ", app.currency))
                .borders(Borders::ALL),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(2)
        .bar_gap(0);
    frame.render_widget(chart, area);
}

/// Battery SoC gauge.
fn render_soc_gauge(frame: &mut Frame, snapshot: &StationSnapshot, area: Rect) {
    let gauge = Gauge::default()
        .block(Block::default().title(" Battery ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(style::soc_color(snapshot.soc_percent)))
        .ratio((snapshot.soc_percent / 100.0).clamp(0.0, 1.0))
        .label(format!(
            "{:.2}% ({:.2} / {:.2} kWh)",
            snapshot.soc_percent, snapshot.soc_kwh, snapshot.max_capacity_kwh
        ));
    frame.render_widget(gauge, area);
}

/// Status panel: load, temperature, charging, and override.
fn render_status(frame: &mut Frame, snapshot: &StationSnapshot, area: Rect) {
    let charging = snapshot.charging_state == ChargingState::Charging;
    let charging_style = if charging {
        Style::default()
            .fg(style::CHARGING)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let override_style = if snapshot.override_mode.is_forced() {
        Style::default()
            .fg(style::OVERRIDE_ACTIVE)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let lines = vec![
        Line::from(format!(
            "  load={:>6.2} kW  temp={:>6.2} °C",
            snapshot.building_load_kw, snapshot.battery_temp_c,
        )),
        Line::from(vec![
            Span::raw("  charging="),
            Span::styled(if charging { "ON " } else { "OFF" }, charging_style),
            Span::raw("  override="),
            Span::styled(snapshot.override_mode.as_str(), override_style),
        ]),
    ];

    let block = Block::default().title(" Status ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Most recent station log lines.
fn render_log(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .recent_log(LOG_LINES)
        .into_iter()
        .map(|e| {
            Line::from(format!(
                "  {:02}:{:02}  {}",
                e.sim_hour, e.sim_minute, e.message
            ))
        })
        .collect();
    let block = Block::default().title(" Log ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  Space:Pause  +/-:Speed  c/x:Charge on/off  a/f/n:Auto/Force on/Force off  d:Reset",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
