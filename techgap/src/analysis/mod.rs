//! Analysis logic for assessment data
//!
//! Pure functions over observations and category summaries, separated from
//! the chart builders and the TUI presentation layer.

pub mod aggregate;
pub mod insights;
pub mod ranking;

pub use aggregate::{
    aggregate_by_category, first_mode, nan_mean, summarize, CategorySummary, JurisdictionSummary,
};
pub use insights::{DataInfo, OverviewInsights, ResearchComparison, Signal};
pub use ranking::{
    best_category, best_value, bottom_k, jurisdiction_standings, leader, leaders_by_category,
    top_k, Standing,
};

use crate::domain::Scope;

/// Rows of `table` whose type falls inside `scope`, in table order.
#[must_use]
pub fn filter_scope(table: &[CategorySummary], scope: Scope) -> Vec<CategorySummary> {
    table.iter().filter(|s| scope.includes(s.tech_type)).cloned().collect()
}
