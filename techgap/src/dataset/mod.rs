//! Assessment dataset: raw observations and their category summaries.
//!
//! # Data Flow
//!
//! ```text
//! tracker.xlsx ──► reader::read_table() ──► RawTable
//!                                              │ schema::ColumnIndex
//!                                              ▼
//!                                       Vec<Observation>
//!                                              │ analysis::aggregate_by_category()
//!                                              ▼
//!                                     Vec<CategorySummary>
//! ```
//!
//! [`load_dataset`] performs the whole pipeline; [`cache::load_cached`]
//! memoizes it per input path for the lifetime of the process.

pub mod cache;
pub mod reader;
pub mod schema;

use log::{info, warn};
use serde::Serialize;
use std::path::Path;
use std::str::FromStr;

use crate::analysis::{aggregate_by_category, CategorySummary};
use crate::domain::{Jurisdiction, LoadError, Metric, TechGroup, TechType};
use reader::{Cell, RawTable};
use schema::{ColumnIndex, Field};

pub use cache::load_cached;

/// Scores recorded for one jurisdiction on one observation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JurisdictionScores {
    pub tech_level: Option<f64>,
    pub tech_gap: Option<f64>,
    pub rd_trend: Option<String>,
    pub basic_research: Option<f64>,
    pub applied_research: Option<f64>,
}

impl JurisdictionScores {
    #[must_use]
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::TechLevel => self.tech_level,
            Metric::TechGap => self.tech_gap,
            Metric::BasicResearch => self.basic_research,
            Metric::AppliedResearch => self.applied_research,
        }
    }

    fn set_metric(&mut self, metric: Metric, value: Option<f64>) {
        match metric {
            Metric::TechLevel => self.tech_level = value,
            Metric::TechGap => self.tech_gap = value,
            Metric::BasicResearch => self.basic_research = value,
            Metric::AppliedResearch => self.applied_research = value,
        }
    }
}

/// One row of the assessment sheet (a detailed technology item).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub detail: String,
    pub category: String,
    pub tech_type: Option<TechType>,
    pub leading_jurisdiction: Option<String>,
    pub domestic_group: Option<TechGroup>,
    /// Indexed by [`Jurisdiction::index`].
    pub scores: [JurisdictionScores; 5],
}

impl Observation {
    /// Observation with no scores recorded.
    #[must_use]
    pub fn new(detail: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            category: category.into(),
            tech_type: None,
            leading_jurisdiction: None,
            domestic_group: None,
            scores: Default::default(),
        }
    }

    #[must_use]
    pub fn scores(&self, jurisdiction: Jurisdiction) -> &JurisdictionScores {
        &self.scores[jurisdiction.index()]
    }

    pub fn scores_mut(&mut self, jurisdiction: Jurisdiction) -> &mut JurisdictionScores {
        &mut self.scores[jurisdiction.index()]
    }

    #[must_use]
    pub fn metric(&self, jurisdiction: Jurisdiction, metric: Metric) -> Option<f64> {
        self.scores(jurisdiction).metric(metric)
    }

    /// Builder-style setter, mostly for tests and fixtures.
    #[must_use]
    pub fn with_metric(mut self, jurisdiction: Jurisdiction, metric: Metric, value: f64) -> Self {
        self.scores_mut(jurisdiction).set_metric(metric, Some(value));
        self
    }
}

/// Loaded dataset: observations in file order and their category summaries.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub observations: Vec<Observation>,
    pub summaries: Vec<CategorySummary>,
}

impl Dataset {
    /// Build a dataset, aggregating summaries from the observations.
    #[must_use]
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        let summaries = aggregate_by_category(&observations);
        Self { observations, summaries }
    }

    /// Category names in sorted order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        // summaries are already ordered by category name
        self.summaries.iter().map(|s| s.category.as_str()).collect()
    }

    #[must_use]
    pub fn summary(&self, category: &str) -> Option<&CategorySummary> {
        self.summaries.iter().find(|s| s.category == category)
    }

    /// Observations of one category, in file order.
    #[must_use]
    pub fn details(&self, category: &str) -> Vec<&Observation> {
        self.observations.iter().filter(|o| o.category == category).collect()
    }
}

/// Load and aggregate the assessment sheet at `path`.
///
/// # Errors
/// Returns a [`LoadError`] for a missing or unreadable file, a header row that
/// lacks required columns, an unrecognised categorical value, or a table with
/// no usable rows.
pub fn load_dataset(path: &Path, sheet: usize) -> Result<Dataset, LoadError> {
    let table = reader::read_table(path, sheet)?;
    let observations = parse_observations(&table)?;
    let dataset = Dataset::from_observations(observations);
    info!(
        "Loaded {} observations in {} categories from {}",
        dataset.observations.len(),
        dataset.summaries.len(),
        path.display()
    );
    Ok(dataset)
}

/// Convert raw rows into observations.
///
/// Fully blank rows and rows without a category are skipped. Numeric cells
/// that are blank or not numbers become missing values.
///
/// # Errors
/// Returns [`LoadError::MissingColumns`] when the header row does not match the
/// schema, [`LoadError::InvalidValue`] for an unknown type or group label, and
/// [`LoadError::Empty`] when no observations remain.
pub fn parse_observations(table: &RawTable) -> Result<Vec<Observation>, LoadError> {
    let index = ColumnIndex::resolve(&table.headers)?;
    let mut observations = Vec::with_capacity(table.rows.len());

    for (row_idx, row) in table.rows.iter().enumerate() {
        // 1-based, counting the header row, to match what a spreadsheet shows
        let line = row_idx + 2;
        if row.iter().all(Cell::is_blank) {
            continue;
        }

        let text = |field: Field| table.cell(row_idx, index.position(field)).as_text();
        let Some(category) = text(Field::Category) else {
            warn!("Skipping row {line}: no category");
            continue;
        };

        let mut obs = Observation::new(text(Field::Detail).unwrap_or_default(), category);
        obs.tech_type = parse_label(text(Field::Type), Field::Type, line)?;
        obs.domestic_group = parse_label(text(Field::DomesticGroup), Field::DomesticGroup, line)?;
        obs.leading_jurisdiction = text(Field::LeadingJurisdiction);

        for j in Jurisdiction::ALL {
            let scores = obs.scores_mut(j);
            for m in Metric::ALL {
                let value = table.cell(row_idx, index.position(Field::Metric(j, m))).as_number();
                scores.set_metric(m, value);
            }
            scores.rd_trend = text(Field::RdTrend(j));
        }
        observations.push(obs);
    }

    if observations.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(observations)
}

fn parse_label<T: FromStr>(
    value: Option<String>,
    field: Field,
    line: usize,
) -> Result<Option<T>, LoadError> {
    value
        .map(|v| {
            v.parse::<T>().map_err(|_| LoadError::InvalidValue {
                row: line,
                column: field.canonical(),
                value: v.clone(),
            })
        })
        .transpose()
}
