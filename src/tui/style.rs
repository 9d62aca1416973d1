//! Color constants and auto-scaling helpers for the TUI.

use ratatui::style::Color;

/// Building load line color.
pub const LOAD_COLOR: Color = Color::Cyan;
/// Price bar color.
pub const PRICE_COLOR: Color = Color::DarkGray;
/// Price bar color for the current hour.
pub const PRICE_CURRENT: Color = Color::Yellow;
/// SoC gauge color when high (>= 50%).
pub const SOC_HIGH: Color = Color::Green;
/// SoC gauge color when medium (>= 20%).
pub const SOC_MID: Color = Color::Yellow;
/// SoC gauge color when low (< 20%).
pub const SOC_LOW: Color = Color::Red;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Charging indicator color.
pub const CHARGING: Color = Color::Green;
/// Override indicator color when forced.
pub const OVERRIDE_ACTIVE: Color = Color::Magenta;

/// Returns a color based on the battery SoC percent.
pub fn soc_color(soc_percent: f64) -> Color {
    if soc_percent >= 50.0 {
        SOC_HIGH
    } else if soc_percent >= 20.0 {
        SOC_MID
    } else {
        SOC_LOW
    }
}

/// Computes Y-axis bounds from chart data points with 10% padding.
pub fn auto_bounds_y(data: &[(f64, f64)]) -> [f64; 2] {
    let min = data.iter().map(|&(_, y)| y).fold(f64::INFINITY, f64::min);
    let max = data.iter().map(|&(_, y)| y).fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    let range = (max - min).max(0.1);
    let pad = range * 0.1;
    [(min - pad).max(0.0), max + pad]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_data_gets_unit_bounds() {
        assert_eq!(auto_bounds_y(&[]), [0.0, 1.0]);
    }

    #[test]
    fn bounds_pad_range() {
        let [lo, hi] = auto_bounds_y(&[(0.0, 1.0), (1.0, 11.0)]);
        assert_eq!(lo, 0.0);
        assert!((hi - 12.0).abs() < 1e-9);
    }
}
