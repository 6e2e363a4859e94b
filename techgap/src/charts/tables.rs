//! Table view models for the three dashboard pages.

use serde::Serialize;
use std::cmp::Ordering;

use crate::analysis::insights::{group_badge, Signal};
use crate::analysis::{bottom_k, leader, top_k, CategorySummary};
use crate::domain::{Jurisdiction, Metric, TechGroup, TechType};

/// Rows in the top / bottom tables.
pub const RANKED_TABLE_ROWS: usize = 10;

/// Descending by value, `NaN` last; equal values keep input order.
fn descending_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => b.total_cmp(&a),
        (a_nan, b_nan) => a_nan.cmp(&b_nan),
    }
}

/// One category on the overview page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewRow {
    pub tech_type: Option<TechType>,
    pub category: String,
    pub level: f64,
    pub level_signal: Option<Signal>,
    pub gap: f64,
    pub gap_signal: Option<Signal>,
    pub group: Option<TechGroup>,
    pub badge: &'static str,
    pub leading_jurisdiction: Option<String>,
}

/// Overview detail table, best domestic level first.
#[must_use]
pub fn overview_rows(table: &[CategorySummary]) -> Vec<OverviewRow> {
    let mut rows: Vec<OverviewRow> = table
        .iter()
        .map(|s| {
            let (level, gap) = (s.domestic_level(), s.domestic_gap());
            OverviewRow {
                tech_type: s.tech_type,
                category: s.category.clone(),
                level,
                level_signal: (!level.is_nan()).then(|| Signal::for_level(level)),
                gap,
                gap_signal: (!gap.is_nan()).then(|| Signal::for_gap(gap)),
                group: s.domestic_group,
                badge: group_badge(s.domestic_group),
                leading_jurisdiction: s.leading_jurisdiction.clone(),
            }
        })
        .collect();
    rows.sort_by(|a, b| descending_nan_last(a.level, b.level));
    rows
}

/// Row of a top-k / bottom-k table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow {
    pub tech_type: Option<TechType>,
    pub category: String,
    pub level: f64,
    pub gap: f64,
}

impl From<&CategorySummary> for RankedRow {
    fn from(s: &CategorySummary) -> Self {
        Self {
            tech_type: s.tech_type,
            category: s.category.clone(),
            level: s.domestic_level(),
            gap: s.domestic_gap(),
        }
    }
}

/// Domestic strongest categories.
#[must_use]
pub fn top_table(table: &[CategorySummary], k: usize) -> Vec<RankedRow> {
    top_k(table, Jurisdiction::DOMESTIC, Metric::TechLevel, k).into_iter().map(Into::into).collect()
}

/// Domestic weakest categories.
#[must_use]
pub fn bottom_table(table: &[CategorySummary], k: usize) -> Vec<RankedRow> {
    bottom_k(table, Jurisdiction::DOMESTIC, Metric::TechLevel, k)
        .into_iter()
        .map(Into::into)
        .collect()
}

/// A category in the full cross-jurisdiction comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    /// 1-based rank by domestic level.
    pub rank: usize,
    pub tech_type: Option<TechType>,
    pub category: String,
    /// Technology level per requested jurisdiction, in request order.
    pub levels: Vec<(Jurisdiction, f64)>,
    pub leading_jurisdiction: Option<String>,
}

/// Every category ranked by domestic level (descending, `NaN` last).
#[must_use]
pub fn comparison_table(
    table: &[CategorySummary],
    jurisdictions: &[Jurisdiction],
) -> Vec<ComparisonRow> {
    let mut sorted: Vec<&CategorySummary> = table.iter().collect();
    sorted.sort_by(|a, b| descending_nan_last(a.domestic_level(), b.domestic_level()));
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, s)| ComparisonRow {
            rank: i + 1,
            tech_type: s.tech_type,
            category: s.category.clone(),
            levels: jurisdictions.iter().map(|&j| (j, s.value(j, Metric::TechLevel))).collect(),
            leading_jurisdiction: s.leading_jurisdiction.clone(),
        })
        .collect()
}

/// Per-jurisdiction row of the drill-down level/gap tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JurisdictionRow {
    pub jurisdiction: Jurisdiction,
    pub level: f64,
    pub gap: f64,
    /// Only the domestic jurisdiction carries a group.
    pub group: Option<TechGroup>,
    pub is_leader: bool,
}

#[must_use]
pub fn jurisdiction_table(
    summary: &CategorySummary,
    jurisdictions: &[Jurisdiction],
) -> Vec<JurisdictionRow> {
    let top = leader(summary, Metric::TechLevel, jurisdictions);
    jurisdictions
        .iter()
        .map(|&j| JurisdictionRow {
            jurisdiction: j,
            level: summary.value(j, Metric::TechLevel),
            gap: summary.value(j, Metric::TechGap),
            group: if j.is_domestic() { summary.domestic_group } else { None },
            is_leader: top == Some(j),
        })
        .collect()
}

/// Per-jurisdiction R&D capability row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResearchRow {
    pub jurisdiction: Jurisdiction,
    pub basic: f64,
    pub applied: f64,
    pub rd_trend: Option<String>,
}

#[must_use]
pub fn research_table(
    summary: &CategorySummary,
    jurisdictions: &[Jurisdiction],
) -> Vec<ResearchRow> {
    jurisdictions
        .iter()
        .map(|&j| {
            let scores = summary.jurisdiction(j);
            ResearchRow {
                jurisdiction: j,
                basic: scores.basic_research,
                applied: scores.applied_research,
                rd_trend: scores.rd_trend.clone(),
            }
        })
        .collect()
}
