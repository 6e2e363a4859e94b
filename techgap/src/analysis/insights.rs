//! Derived headline metrics and qualitative labels.
//!
//! The thresholds here drive the badges and delta captions shown next to the
//! headline numbers on the overview and drill-down pages.

use serde::Serialize;

use super::aggregate::{nan_mean, CategorySummary};
use super::ranking::{best_category, best_value};
use crate::dataset::Dataset;
use crate::domain::{Jurisdiction, Metric, Scope, TechGroup, TechType};

/// Domestic mean level above which the domestic jurisdiction ranks 3rd of 5.
pub const THIRD_PLACE_LEVEL: f64 = 78.0;
/// Domestic mean gap (years) below which the gap counts as excellent.
pub const EXCELLENT_GAP_YEARS: f64 = 3.0;
/// Domestic mean gap (years) below which the gap counts as average.
pub const AVERAGE_GAP_YEARS: f64 = 4.0;
/// Mean research score above which R&D capability counts as excellent.
pub const EXCELLENT_RESEARCH_SCORE: f64 = 75.0;

/// Traffic-light classification of a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Good,
    Fair,
    Poor,
}

impl Signal {
    /// Technology level: >= 85 good, >= 70 fair.
    #[must_use]
    pub fn for_level(level: f64) -> Self {
        if level >= 85.0 {
            Signal::Good
        } else if level >= 70.0 {
            Signal::Fair
        } else {
            Signal::Poor
        }
    }

    /// Technology gap in years: <= 2 good, <= 4 fair.
    #[must_use]
    pub fn for_gap(gap: f64) -> Self {
        if gap <= 2.0 {
            Signal::Good
        } else if gap <= 4.0 {
            Signal::Fair
        } else {
            Signal::Poor
        }
    }

    #[must_use]
    pub fn for_metric(metric: Metric, value: f64) -> Self {
        match metric {
            Metric::TechGap => Signal::for_gap(value),
            _ => Signal::for_level(value),
        }
    }
}

/// Badge text for a technology group.
#[must_use]
pub fn group_badge(group: Option<TechGroup>) -> &'static str {
    match group {
        Some(TechGroup::Leading) => "[1st]",
        Some(TechGroup::CatchingUp) => "[2nd]",
        Some(TechGroup::Lagging) => "[3rd]",
        None => "[?]",
    }
}

/// Truncate to `max_chars` characters, appending `...` when shortened.
#[must_use]
pub fn truncate_label(name: &str, max_chars: usize) -> String {
    if name.chars().count() > max_chars {
        let head: String = name.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        name.to_string()
    }
}

/// A headline number with its caption.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Headline {
    pub label: &'static str,
    pub value: String,
    pub delta: Option<String>,
}

/// Overview page summary for the domestic jurisdiction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewInsights {
    pub scope: Scope,
    pub average_level: f64,
    pub average_gap: f64,
    pub leading_count: usize,
    pub total_count: usize,
    pub best_category: Option<String>,
}

impl OverviewInsights {
    /// Compute the domestic headline over an already scope-filtered table.
    #[must_use]
    pub fn compute(table: &[CategorySummary], scope: Scope) -> Self {
        Self {
            scope,
            average_level: nan_mean(table.iter().map(|s| Some(s.domestic_level()))),
            average_gap: nan_mean(table.iter().map(|s| Some(s.domestic_gap()))),
            leading_count: table
                .iter()
                .filter(|s| s.domestic_group == Some(TechGroup::Leading))
                .count(),
            total_count: table.len(),
            best_category: best_category(table, Jurisdiction::DOMESTIC, Metric::TechLevel)
                .map(|s| s.category.clone()),
        }
    }

    /// Caption under the mean level.
    #[must_use]
    pub fn level_delta(&self) -> &'static str {
        if self.average_level > THIRD_PLACE_LEVEL {
            "Global #3"
        } else {
            "Needs improvement"
        }
    }

    /// Caption under the mean gap.
    #[must_use]
    pub fn gap_delta(&self) -> &'static str {
        if self.average_gap < EXCELLENT_GAP_YEARS {
            "Excellent"
        } else {
            "Average"
        }
    }

    /// Ordinal rank phrase among the five jurisdictions.
    #[must_use]
    pub fn rank_phrase(&self) -> &'static str {
        if self.average_level > THIRD_PLACE_LEVEL {
            "3rd"
        } else {
            "4th"
        }
    }

    #[must_use]
    pub fn gap_quality(&self) -> &'static str {
        if self.average_gap < EXCELLENT_GAP_YEARS {
            "excellent"
        } else if self.average_gap < AVERAGE_GAP_YEARS {
            "average"
        } else {
            "needs improvement"
        }
    }

    /// The four headline tiles.
    #[must_use]
    pub fn headlines(&self) -> Vec<Headline> {
        vec![
            Headline {
                label: "Domestic avg level",
                value: Metric::TechLevel.format_value(self.average_level),
                delta: Some(self.level_delta().to_string()),
            },
            Headline {
                label: "Avg technology gap",
                value: Metric::TechGap.format_value(self.average_gap),
                delta: Some(self.gap_delta().to_string()),
            },
            Headline {
                label: "Leading fields",
                value: self.leading_count.to_string(),
                delta: Some(format!("of {} total", self.total_count)),
            },
            Headline {
                label: "Best field",
                value: self
                    .best_category
                    .as_deref()
                    .map_or_else(|| "N/A".to_string(), |c| truncate_label(c, 12)),
                delta: None,
            },
        ]
    }

    /// Insight sentences shown under the comparison charts.
    #[must_use]
    pub fn sentences(&self) -> Vec<String> {
        vec![
            format!(
                "Technology level: {} ranks {} of 5 jurisdictions",
                Metric::TechLevel.format_value(self.average_level),
                self.rank_phrase()
            ),
            format!(
                "Technology gap: {} behind the global best on average, {}",
                Metric::TechGap.format_value(self.average_gap),
                self.gap_quality()
            ),
            format!("Competitive edge: leading position in {} fields", self.leading_count),
        ]
    }
}

/// Domestic R&D capability against the best jurisdiction in one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResearchComparison {
    pub basic: f64,
    pub applied: f64,
    /// Best basic score minus the domestic score.
    pub basic_gap: f64,
    /// Best applied score minus the domestic score.
    pub applied_gap: f64,
}

impl ResearchComparison {
    #[must_use]
    pub fn compute(summary: &CategorySummary) -> Self {
        let domestic = summary.jurisdiction(Jurisdiction::DOMESTIC);
        let gap = |metric: Metric, own: f64| {
            best_value(summary, metric, &Jurisdiction::ALL).map_or(f64::NAN, |best| best - own)
        };
        Self {
            basic: domestic.basic_research,
            applied: domestic.applied_research,
            basic_gap: gap(Metric::BasicResearch, domestic.basic_research),
            applied_gap: gap(Metric::AppliedResearch, domestic.applied_research),
        }
    }

    /// `Excellent` when the mean of basic and applied exceeds 75.
    #[must_use]
    pub fn verdict(&self) -> &'static str {
        if (self.basic + self.applied) / 2.0 > EXCELLENT_RESEARCH_SCORE {
            "Excellent"
        } else {
            "Average"
        }
    }
}

/// Narrative text for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryDescription {
    pub description: &'static str,
    pub domestic_status: &'static str,
    pub global_trend: &'static str,
}

const FALLBACK_DESCRIPTION: CategoryDescription = CategoryDescription {
    description: "A detailed description of this field has not been written yet.",
    domestic_status: "Domestic status analysis has not been written yet.",
    global_trend: "Global trend analysis has not been written yet.",
};

const DESCRIPTIONS: &[(&str, CategoryDescription)] = &[
    (
        "원자력발전",
        CategoryDescription {
            description: "Safe and efficient power generation through next-generation reactors.",
            domestic_status: "Catching-up group with APR1400 commercialised; \
                              roughly 4th in the world.",
            global_trend: "US small modular reactor development is accelerating while \
                           China builds large-capacity plants.",
        },
    ),
    (
        "태양광",
        CategoryDescription {
            description: "Photovoltaic conversion of solar energy into electricity.",
            domestic_status: "Catching-up group on high-efficiency silicon cells; \
                              roughly 3rd in the world.",
            global_trend: "Chinese manufacturing is surging while Europe pushes \
                           perovskite next-generation cells.",
        },
    ),
    (
        "수자원관리",
        CategoryDescription {
            description: "Technologies addressing water scarcity and floods under climate change.",
            domestic_status: "Catching-up group with desalination and smart-water systems; \
                              top tier in Asia.",
            global_trend: "EU circular-economy water reuse is rising while Israeli and \
                           Australian smart-water technology spreads.",
        },
    ),
];

/// Description for a category, or a placeholder.
#[must_use]
pub fn describe(category: &str) -> CategoryDescription {
    DESCRIPTIONS
        .iter()
        .find(|(name, _)| *name == category)
        .map_or(FALLBACK_DESCRIPTION, |(_, d)| *d)
}

/// Paper / patent counts for the publications tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PublicationSample {
    pub jurisdiction: Jurisdiction,
    pub papers: u32,
    pub patents: u32,
    pub growth: &'static str,
}

/// Demonstration figures, not derived from the input file.
pub const SAMPLE_PUBLICATIONS: [PublicationSample; 5] = [
    PublicationSample { jurisdiction: Jurisdiction::Kr, papers: 156, patents: 89, growth: "+12%" },
    PublicationSample { jurisdiction: Jurisdiction::Cn, papers: 324, patents: 156, growth: "+28%" },
    PublicationSample { jurisdiction: Jurisdiction::Jp, papers: 198, patents: 134, growth: "+8%" },
    PublicationSample { jurisdiction: Jurisdiction::Us, papers: 289, patents: 201, growth: "+15%" },
    PublicationSample { jurisdiction: Jurisdiction::Eu, papers: 234, patents: 167, growth: "+11%" },
];

/// Dataset size figures for the info panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataInfo {
    pub categories: usize,
    pub details: usize,
    pub mitigation_categories: usize,
    pub adaptation_categories: usize,
    pub jurisdictions: usize,
}

impl DataInfo {
    #[must_use]
    pub fn compute(dataset: &Dataset) -> Self {
        let count_type = |t: TechType| {
            dataset.summaries.iter().filter(|s| s.tech_type == Some(t)).count()
        };
        Self {
            categories: dataset.summaries.len(),
            details: dataset.observations.len(),
            mitigation_categories: count_type(TechType::Mitigation),
            adaptation_categories: count_type(TechType::Adaptation),
            jurisdictions: Jurisdiction::ALL.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(category: &str, level: f64, gap: f64, group: Option<TechGroup>) -> CategorySummary {
        let mut s = CategorySummary::empty(category);
        let kr = s.jurisdiction_mut(Jurisdiction::Kr);
        kr.tech_level = level;
        kr.tech_gap = gap;
        s.domestic_group = group;
        s
    }

    #[test]
    fn test_signals() {
        assert_eq!(Signal::for_level(85.0), Signal::Good);
        assert_eq!(Signal::for_level(70.0), Signal::Fair);
        assert_eq!(Signal::for_level(69.9), Signal::Poor);
        assert_eq!(Signal::for_gap(2.0), Signal::Good);
        assert_eq!(Signal::for_gap(4.0), Signal::Fair);
        assert_eq!(Signal::for_gap(4.1), Signal::Poor);
        assert_eq!(Signal::for_metric(Metric::TechGap, 1.0), Signal::Good);
    }

    #[test]
    fn test_truncate_label_counts_characters() {
        assert_eq!(truncate_label("수소에너지저장기술", 4), "수소에너...");
        assert_eq!(truncate_label("Wind", 10), "Wind");
        assert_eq!(truncate_label("abcdefghijk", 10), "abcdefghij...");
    }

    #[test]
    fn test_overview_insights() {
        let table = vec![
            summary("Solar", 84.0, 2.0, Some(TechGroup::Leading)),
            summary("Wind", 76.0, 3.0, Some(TechGroup::CatchingUp)),
            summary("Nuclear", 90.0, 1.0, Some(TechGroup::Leading)),
        ];
        let insights = OverviewInsights::compute(&table, Scope::All);
        assert!((insights.average_level - 250.0 / 3.0).abs() < 1e-9);
        assert!((insights.average_gap - 2.0).abs() < 1e-9);
        assert_eq!(insights.leading_count, 2);
        assert_eq!(insights.total_count, 3);
        assert_eq!(insights.best_category.as_deref(), Some("Nuclear"));
        assert_eq!(insights.level_delta(), "Global #3");
        assert_eq!(insights.gap_delta(), "Excellent");
        assert_eq!(insights.rank_phrase(), "3rd");
        assert_eq!(insights.gap_quality(), "excellent");

        let headlines = insights.headlines();
        assert_eq!(headlines.len(), 4);
        assert_eq!(headlines[0].value, "83.3%");
        assert_eq!(headlines[2].delta.as_deref(), Some("of 3 total"));
    }

    #[test]
    fn test_weak_overview_labels() {
        let table = vec![summary("Solar", 70.0, 3.5, None)];
        let insights = OverviewInsights::compute(&table, Scope::All);
        assert_eq!(insights.level_delta(), "Needs improvement");
        assert_eq!(insights.gap_delta(), "Average");
        assert_eq!(insights.rank_phrase(), "4th");
        assert_eq!(insights.gap_quality(), "average");

        let empty = OverviewInsights::compute(&[], Scope::Adaptation);
        assert!(empty.average_level.is_nan());
        assert_eq!(empty.best_category, None);
        assert_eq!(empty.headlines()[3].value, "N/A");
    }

    #[test]
    fn test_research_comparison() {
        let mut s = CategorySummary::empty("Solar");
        for (j, basic, applied) in [
            (Jurisdiction::Kr, 70.0, 80.0),
            (Jurisdiction::Us, 95.0, 90.0),
            (Jurisdiction::Cn, f64::NAN, 92.0),
        ] {
            s.jurisdiction_mut(j).basic_research = basic;
            s.jurisdiction_mut(j).applied_research = applied;
        }
        let cmp = ResearchComparison::compute(&s);
        assert!((cmp.basic_gap - 25.0).abs() < 1e-9);
        assert!((cmp.applied_gap - 12.0).abs() < 1e-9);
        assert_eq!(cmp.verdict(), "Average");
    }

    #[test]
    fn test_describe_falls_back() {
        assert!(describe("태양광").description.contains("Photovoltaic"));
        assert_eq!(describe("Unknown"), FALLBACK_DESCRIPTION);
    }
}
