//! Renderer-neutral chart data.
//!
//! Builders here turn category summaries into series the TUI draws and the
//! headless report serializes. They never touch a terminal.
//!
//! | Builder            | Rows                                  | Axis             |
//! |--------------------|---------------------------------------|------------------|
//! | [`bar_comparison`] | one bar per jurisdiction (table mean) | 0 ..= 1.2 × max  |
//! | [`category_bars`]  | one bar per jurisdiction (one row)    | 0 ..= 105 / 1.2× |
//! | [`heatmap`]        | top 15 categories × jurisdictions     | 60 / 80 / 100    |
//! | [`radar`]          | top 8 categories per jurisdiction     | 0 ..= 100        |

pub mod tables;

use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, TAU};

use crate::analysis::insights::truncate_label;
use crate::analysis::{filter_scope, nan_mean, top_k, CategorySummary};
use crate::domain::{Jurisdiction, Metric, Scope};

/// Heatmap rows kept when the table is larger.
pub const HEATMAP_MAX_ROWS: usize = 15;
pub const HEATMAP_LABEL_CHARS: usize = 15;
/// Radar axes (categories) per chart.
pub const RADAR_MAX_AXES: usize = 8;
pub const RADAR_LABEL_CHARS: usize = 10;
/// Fixed level axis for single-category bars.
pub const CATEGORY_LEVEL_AXIS_MAX: f64 = 105.0;
const AXIS_HEADROOM: f64 = 1.2;
/// Axis used when every value is missing.
const FALLBACK_AXIS_MAX: f64 = 100.0;

/// One bar of a bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub jurisdiction: Jurisdiction,
    pub value: f64,
    pub label: String,
    pub highlighted: bool,
}

/// A bar chart over jurisdictions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub metric: Metric,
    pub title: String,
    pub bars: Vec<Bar>,
    pub y_max: f64,
}

fn headroom_max(values: impl IntoIterator<Item = f64>) -> f64 {
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .reduce(f64::max)
        .map_or(FALLBACK_AXIS_MAX, |max| max * AXIS_HEADROOM)
}

/// Mean of `metric` across the whole table, one bar per jurisdiction.
#[must_use]
pub fn bar_comparison(
    table: &[CategorySummary],
    metric: Metric,
    jurisdictions: &[Jurisdiction],
) -> BarSeries {
    let bars: Vec<Bar> = jurisdictions
        .iter()
        .map(|&j| {
            let value = nan_mean(table.iter().map(|s| Some(s.value(j, metric))));
            Bar { jurisdiction: j, value, label: metric.format_value(value), highlighted: false }
        })
        .collect();
    let y_max = headroom_max(bars.iter().map(|b| b.value));
    BarSeries { metric, title: format!("{} comparison", metric.label()), bars, y_max }
}

/// One category's `metric` per jurisdiction, domestic bar highlighted.
#[must_use]
pub fn category_bars(
    summary: &CategorySummary,
    metric: Metric,
    jurisdictions: &[Jurisdiction],
) -> BarSeries {
    let bars: Vec<Bar> = jurisdictions
        .iter()
        .map(|&j| {
            let value = summary.value(j, metric);
            Bar {
                jurisdiction: j,
                value,
                label: metric.format_value(value),
                highlighted: j.is_domestic(),
            }
        })
        .collect();
    let y_max = if metric == Metric::TechLevel {
        CATEGORY_LEVEL_AXIS_MAX
    } else {
        headroom_max(bars.iter().map(|b| b.value))
    };
    BarSeries { metric, title: format!("{} comparison", metric.label()), bars, y_max }
}

/// Fixed colour scale anchors for the level heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorScale {
    pub min: f64,
    pub mid: f64,
    pub max: f64,
}

pub const LEVEL_SCALE: ColorScale = ColorScale { min: 60.0, mid: 80.0, max: 100.0 };

impl ColorScale {
    /// Position of `value` on the scale in `0.0..=1.0`, clamped; `None` for `NaN`.
    #[must_use]
    pub fn position(&self, value: f64) -> Option<f64> {
        if value.is_nan() {
            return None;
        }
        Some(((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapRow {
    pub category: String,
    pub label: String,
    /// One technology level per column.
    pub values: Vec<f64>,
}

/// Technology-level matrix, categories × jurisdictions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heatmap {
    pub columns: Vec<Jurisdiction>,
    pub rows: Vec<HeatmapRow>,
    pub scale: ColorScale,
}

impl Heatmap {
    /// Row showing `category`, if it made the cut.
    #[must_use]
    pub fn row_index(&self, category: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.category == category)
    }
}

/// Level heatmap: the 15 best domestic categories, or the whole table if smaller.
#[must_use]
pub fn heatmap(table: &[CategorySummary], jurisdictions: &[Jurisdiction]) -> Heatmap {
    let selected: Vec<&CategorySummary> = if table.len() > HEATMAP_MAX_ROWS {
        top_k(table, Jurisdiction::DOMESTIC, Metric::TechLevel, HEATMAP_MAX_ROWS)
    } else {
        table.iter().collect()
    };

    let rows = selected
        .into_iter()
        .map(|s| HeatmapRow {
            category: s.category.clone(),
            label: truncate_label(&s.category, HEATMAP_LABEL_CHARS),
            values: jurisdictions.iter().map(|&j| s.value(j, Metric::TechLevel)).collect(),
        })
        .collect();

    Heatmap { columns: jurisdictions.to_vec(), rows, scale: LEVEL_SCALE }
}

/// Closed polygon for one jurisdiction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarSeries {
    pub jurisdiction: Jurisdiction,
    /// One radius per axis, followed by the first radius again.
    pub values: Vec<f64>,
}

/// Cartesian vertices of a closed polygon given one radius per axis plus the
/// repeated first radius. The first axis is at 12 o'clock, then clockwise.
///
/// A missing radius is drawn at the centre.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn polar_to_cartesian(radii: &[f64]) -> Vec<(f64, f64)> {
    let axes = radii.len().saturating_sub(1).max(1) as f64;
    radii
        .iter()
        .enumerate()
        .map(|(i, &r)| {
            let r = if r.is_nan() { 0.0 } else { r };
            let angle = FRAC_PI_2 - TAU * i as f64 / axes;
            (r * angle.cos(), r * angle.sin())
        })
        .collect()
}

impl RadarSeries {
    #[must_use]
    pub fn to_cartesian(&self) -> Vec<(f64, f64)> {
        polar_to_cartesian(&self.values)
    }
}

/// Multi-jurisdiction technology-level radar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Radar {
    pub scope: Scope,
    pub axes: Vec<String>,
    pub series: Vec<RadarSeries>,
    pub range: (f64, f64),
}

/// Radar over the 8 best domestic categories inside `scope`.
#[must_use]
pub fn radar(table: &[CategorySummary], scope: Scope, jurisdictions: &[Jurisdiction]) -> Radar {
    let filtered = filter_scope(table, scope);
    let top = top_k(&filtered, Jurisdiction::DOMESTIC, Metric::TechLevel, RADAR_MAX_AXES);

    let axes = top.iter().map(|s| truncate_label(&s.category, RADAR_LABEL_CHARS)).collect();
    let series = jurisdictions
        .iter()
        .map(|&j| {
            let mut values: Vec<f64> = top.iter().map(|s| s.value(j, Metric::TechLevel)).collect();
            if let Some(&first) = values.first() {
                values.push(first);
            }
            RadarSeries { jurisdiction: j, values }
        })
        .collect();

    Radar { scope, axes, series, range: (0.0, 100.0) }
}

impl Radar {
    /// Outline at `radius` through every axis, for grid rings.
    #[must_use]
    pub fn ring(&self, radius: f64) -> Vec<(f64, f64)> {
        if self.axes.is_empty() {
            return Vec::new();
        }
        polar_to_cartesian(&vec![radius; self.axes.len() + 1])
    }
}
