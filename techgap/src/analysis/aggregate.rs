//! Category aggregation for assessment observations.
//!
//! Collapses detail-level observations into one [`CategorySummary`] per
//! category:
//!
//! | Field kind                    | Reduction                               |
//! |-------------------------------|-----------------------------------------|
//! | level / gap / research scores | mean, missing values ignored            |
//! | group, R&D trends, leader     | mode, ties to the first value seen      |
//! | type                          | first non-missing value                 |
//! | detail count                  | number of observations                  |
//!
//! A mean over no values is `NaN`; a mode over no values is `None`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::dataset::Observation;
use crate::domain::{Jurisdiction, Metric, TechGroup, TechType};

/// Aggregated scores for one jurisdiction within a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JurisdictionSummary {
    pub tech_level: f64,
    pub tech_gap: f64,
    pub basic_research: f64,
    pub applied_research: f64,
    /// Most frequent R&D activity trend.
    pub rd_trend: Option<String>,
}

impl Default for JurisdictionSummary {
    fn default() -> Self {
        Self {
            tech_level: f64::NAN,
            tech_gap: f64::NAN,
            basic_research: f64::NAN,
            applied_research: f64::NAN,
            rd_trend: None,
        }
    }
}

impl JurisdictionSummary {
    #[must_use]
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::TechLevel => self.tech_level,
            Metric::TechGap => self.tech_gap,
            Metric::BasicResearch => self.basic_research,
            Metric::AppliedResearch => self.applied_research,
        }
    }

    pub fn set_metric(&mut self, metric: Metric, value: f64) {
        match metric {
            Metric::TechLevel => self.tech_level = value,
            Metric::TechGap => self.tech_gap = value,
            Metric::BasicResearch => self.basic_research = value,
            Metric::AppliedResearch => self.applied_research = value,
        }
    }
}

/// One row per distinct category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub tech_type: Option<TechType>,
    /// Most frequent domestic technology group.
    pub domestic_group: Option<TechGroup>,
    /// Most frequent recorded leading jurisdiction.
    pub leading_jurisdiction: Option<String>,
    /// Indexed by [`Jurisdiction::index`].
    pub jurisdictions: [JurisdictionSummary; 5],
    /// Number of observations aggregated.
    pub detail_count: usize,
}

impl CategorySummary {
    /// Summary with every numeric field `NaN`.
    #[must_use]
    pub fn empty(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            tech_type: None,
            domestic_group: None,
            leading_jurisdiction: None,
            jurisdictions: Default::default(),
            detail_count: 0,
        }
    }

    #[must_use]
    pub fn jurisdiction(&self, jurisdiction: Jurisdiction) -> &JurisdictionSummary {
        &self.jurisdictions[jurisdiction.index()]
    }

    pub fn jurisdiction_mut(&mut self, jurisdiction: Jurisdiction) -> &mut JurisdictionSummary {
        &mut self.jurisdictions[jurisdiction.index()]
    }

    #[must_use]
    pub fn value(&self, jurisdiction: Jurisdiction, metric: Metric) -> f64 {
        self.jurisdiction(jurisdiction).metric(metric)
    }

    /// Domestic technology level, the default ranking key.
    #[must_use]
    pub fn domestic_level(&self) -> f64 {
        self.value(Jurisdiction::DOMESTIC, Metric::TechLevel)
    }

    #[must_use]
    pub fn domestic_gap(&self) -> f64 {
        self.value(Jurisdiction::DOMESTIC, Metric::TechGap)
    }
}

/// Mean of the present values; `NaN` when there are none.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn nan_mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Most frequent present value; ties go to the value encountered first.
#[must_use]
pub fn first_mode<T, I>(values: I) -> Option<T>
where
    T: PartialEq,
    I: IntoIterator<Item = Option<T>>,
{
    // Distinct values in first-seen order with their counts
    let mut counts: Vec<(T, usize)> = Vec::new();
    for value in values.into_iter().flatten() {
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value, 1)),
        }
    }

    let mut best: Option<(T, usize)> = None;
    for (value, n) in counts {
        if best.as_ref().map_or(true, |(_, best_n)| n > *best_n) {
            best = Some((value, n));
        }
    }
    best.map(|(value, _)| value)
}

/// Aggregate observations into one summary per category, ordered by name.
///
/// Deterministic: the same input always yields the same rows in the same
/// order, regardless of how often it is run.
#[must_use]
pub fn aggregate_by_category(observations: &[Observation]) -> Vec<CategorySummary> {
    let mut groups: BTreeMap<&str, Vec<&Observation>> = BTreeMap::new();
    for obs in observations {
        groups.entry(obs.category.as_str()).or_default().push(obs);
    }

    groups.into_iter().map(|(category, rows)| summarize(category, &rows)).collect()
}

/// Reduce the observations of a single category.
#[must_use]
pub fn summarize(category: &str, rows: &[&Observation]) -> CategorySummary {
    let mut summary = CategorySummary::empty(category);
    summary.detail_count = rows.len();
    summary.tech_type = rows.iter().find_map(|o| o.tech_type);
    summary.domestic_group = first_mode(rows.iter().map(|o| o.domestic_group));
    summary.leading_jurisdiction =
        first_mode(rows.iter().map(|o| o.leading_jurisdiction.clone()));

    for j in Jurisdiction::ALL {
        let target = summary.jurisdiction_mut(j);
        for m in Metric::ALL {
            target.set_metric(m, nan_mean(rows.iter().map(|o| o.metric(j, m))));
        }
        target.rd_trend = first_mode(rows.iter().map(|o| o.scores(j).rd_trend.clone()));
    }
    summary
}
