//! TUI color theme
//!
//! Dark dashboard palette; one fixed colour per jurisdiction so every chart
//! on every page reads the same.

use ratatui::style::Color;

use crate::analysis::Signal;
use crate::charts::ColorScale;
use crate::domain::Jurisdiction;

pub const ACCENT: Color = Color::Rgb(96, 165, 250);
pub const HIGHLIGHT: Color = Color::Rgb(255, 107, 107);
pub const CAUTION_AMBER: Color = Color::Rgb(255, 191, 0);
pub const TEXT: Color = Color::Rgb(226, 232, 240);
pub const INFO_DIM: Color = Color::Rgb(120, 130, 145);
pub const MUTED_BAR: Color = Color::Rgb(160, 164, 170);
pub const BACKGROUND: Color = Color::Rgb(15, 23, 42);

pub const GOOD_GREEN: Color = Color::Rgb(34, 197, 94);
pub const FAIR_YELLOW: Color = Color::Rgb(234, 179, 8);
pub const POOR_RED: Color = Color::Rgb(239, 68, 68);

/// Series colour for a jurisdiction.
#[must_use]
pub const fn jurisdiction_color(jurisdiction: Jurisdiction) -> Color {
    match jurisdiction {
        Jurisdiction::Kr => Color::Rgb(255, 107, 107),
        Jurisdiction::Cn => Color::Rgb(78, 205, 196),
        Jurisdiction::Jp => Color::Rgb(69, 183, 209),
        Jurisdiction::Us => Color::Rgb(150, 206, 180),
        Jurisdiction::Eu => Color::Rgb(254, 202, 87),
    }
}

/// Marker and colour for a traffic-light signal.
#[must_use]
pub fn signal_marker(signal: Option<Signal>) -> (&'static str, Color) {
    match signal {
        Some(Signal::Good) => ("[-]", GOOD_GREEN),
        Some(Signal::Fair) => ("[!]", FAIR_YELLOW),
        Some(Signal::Poor) => ("[X]", POOR_RED),
        None => ("[ ]", INFO_DIM),
    }
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    let value = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let value = value.round().clamp(0.0, 255.0) as u8;
    value
}

/// Red-yellow-green diverging colour for `value` on `scale`.
#[must_use]
pub fn heat_color(scale: &ColorScale, value: f64) -> Color {
    let Some(position) = scale.position(value) else {
        return INFO_DIM;
    };
    let (r, g, b) = ((215, 48, 39), (254, 224, 139), (26, 152, 80));
    let split = scale.position(scale.mid).unwrap_or(0.5);
    let (from, to, t) = if position < split {
        (r, g, position / split)
    } else if split < 1.0 {
        (g, b, (position - split) / (1.0 - split))
    } else {
        (g, b, 1.0)
    };
    Color::Rgb(lerp(from.0, to.0, t), lerp(from.1, to.1, t), lerp(from.2, to.2, t))
}

/// Horizontal text gauge, `value` out of `max`, `width` cells wide.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn gauge_bar(value: f64, max: f64, width: usize) -> String {
    let ratio = if value.is_nan() || max <= 0.0 { 0.0 } else { (value / max).clamp(0.0, 1.0) };
    let filled = (ratio * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::LEVEL_SCALE;

    #[test]
    fn test_heat_color_endpoints() {
        assert_eq!(heat_color(&LEVEL_SCALE, 60.0), Color::Rgb(215, 48, 39));
        assert_eq!(heat_color(&LEVEL_SCALE, 80.0), Color::Rgb(254, 224, 139));
        assert_eq!(heat_color(&LEVEL_SCALE, 100.0), Color::Rgb(26, 152, 80));
        assert_eq!(heat_color(&LEVEL_SCALE, f64::NAN), INFO_DIM);
    }

    #[test]
    fn test_heat_color_pivots_on_scale_mid() {
        let skewed = ColorScale { min: 0.0, mid: 25.0, max: 100.0 };
        assert_eq!(heat_color(&skewed, 0.0), Color::Rgb(215, 48, 39));
        assert_eq!(heat_color(&skewed, 25.0), Color::Rgb(254, 224, 139));
        assert_eq!(heat_color(&skewed, 100.0), Color::Rgb(26, 152, 80));
        // halfway between mid and max
        assert_eq!(heat_color(&skewed, 62.5), Color::Rgb(140, 188, 110));
    }

    #[test]
    fn test_gauge_bar() {
        assert_eq!(gauge_bar(50.0, 100.0, 4), "██░░");
        assert_eq!(gauge_bar(150.0, 100.0, 3), "███");
        assert_eq!(gauge_bar(f64::NAN, 100.0, 2), "░░");
    }
}
