//! Page view models and the headless JSON report.
//!
//! Each dashboard page is a pure function of the loaded [`Dataset`] and the
//! current selection. The TUI recomputes the visible page on every key press;
//! `--headless` serializes the same structs with `serde_json`.

use serde::Serialize;
use std::io::Write;

use crate::analysis::insights::{
    describe, group_badge, CategoryDescription, Headline, PublicationSample, SAMPLE_PUBLICATIONS,
};
use crate::analysis::{
    filter_scope, jurisdiction_standings, summarize, CategorySummary, DataInfo, OverviewInsights,
    ResearchComparison, Signal, Standing,
};
use crate::charts::tables::{
    bottom_table, comparison_table, jurisdiction_table, overview_rows, research_table,
    top_table, ComparisonRow, JurisdictionRow, OverviewRow, RankedRow, ResearchRow,
    RANKED_TABLE_ROWS,
};
use crate::charts::{bar_comparison, category_bars, heatmap, radar, BarSeries, Heatmap, Radar};
use crate::dataset::Dataset;
use crate::domain::{Jurisdiction, Metric, Page, Scope};

/// Domestic-centred overview, restricted to the scope.
#[derive(Debug, Clone, Serialize)]
pub struct OverviewPage {
    pub insights: OverviewInsights,
    pub headlines: Vec<Headline>,
    pub sentences: Vec<String>,
    pub level_bars: BarSeries,
    pub gap_bars: BarSeries,
    pub heatmap: Heatmap,
    pub rows: Vec<OverviewRow>,
}

#[must_use]
pub fn overview_page(dataset: &Dataset, scope: Scope, jurisdictions: &[Jurisdiction]) -> OverviewPage {
    let table = filter_scope(&dataset.summaries, scope);
    let insights = OverviewInsights::compute(&table, scope);
    OverviewPage {
        headlines: insights.headlines(),
        sentences: insights.sentences(),
        insights,
        level_bars: bar_comparison(&table, Metric::TechLevel, jurisdictions),
        gap_bars: bar_comparison(&table, Metric::TechGap, jurisdictions),
        heatmap: heatmap(&table, jurisdictions),
        rows: overview_rows(&table),
    }
}

/// Cross-jurisdiction comparison. Only the radar honours the scope.
#[derive(Debug, Clone, Serialize)]
pub struct CountriesPage {
    pub radar: Radar,
    pub standings: Vec<Standing>,
    pub heatmap: Heatmap,
    pub top: Vec<RankedRow>,
    pub bottom: Vec<RankedRow>,
    pub comparison: Vec<ComparisonRow>,
}

#[must_use]
pub fn countries_page(
    dataset: &Dataset,
    scope: Scope,
    jurisdictions: &[Jurisdiction],
) -> CountriesPage {
    let table = &dataset.summaries;
    CountriesPage {
        radar: radar(table, scope, jurisdictions),
        standings: jurisdiction_standings(table, jurisdictions),
        heatmap: heatmap(table, jurisdictions),
        top: top_table(table, RANKED_TABLE_ROWS),
        bottom: bottom_table(table, RANKED_TABLE_ROWS),
        comparison: comparison_table(table, jurisdictions),
    }
}

/// Drill-down into one category, or one sub-technology of it.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryPage {
    pub category: String,
    /// Selected sub-technology; `None` shows the category mean.
    pub detail: Option<String>,
    /// Sub-technologies of the category, in file order.
    pub details: Vec<String>,
    pub description: CategoryDescription,
    pub summary: CategorySummary,
    pub level_signal: Option<Signal>,
    pub gap_signal: Option<Signal>,
    pub badge: &'static str,
    pub level_bars: BarSeries,
    pub gap_bars: BarSeries,
    pub jurisdictions: Vec<JurisdictionRow>,
    pub research: Vec<ResearchRow>,
    pub research_comparison: ResearchComparison,
    /// Illustrative figures, not read from the input.
    pub sample_publications: Vec<PublicationSample>,
}

/// Build the drill-down for `category`; `None` if the category (or the named
/// sub-technology within it) does not exist.
#[must_use]
pub fn category_page(
    dataset: &Dataset,
    category: &str,
    detail: Option<&str>,
    jurisdictions: &[Jurisdiction],
) -> Option<CategoryPage> {
    let observations = dataset.details(category);
    let summary = match detail {
        // a single observation aggregates to itself
        Some(name) => {
            let obs = observations.iter().copied().find(|o| o.detail == name)?;
            summarize(category, &[obs])
        }
        None => dataset.summary(category)?.clone(),
    };

    let (level, gap) = (summary.domestic_level(), summary.domestic_gap());
    Some(CategoryPage {
        category: category.to_string(),
        detail: detail.map(str::to_string),
        details: observations.iter().map(|o| o.detail.clone()).collect(),
        description: describe(category),
        level_signal: (!level.is_nan()).then(|| Signal::for_level(level)),
        gap_signal: (!gap.is_nan()).then(|| Signal::for_gap(gap)),
        badge: group_badge(summary.domestic_group),
        level_bars: category_bars(&summary, Metric::TechLevel, jurisdictions),
        gap_bars: category_bars(&summary, Metric::TechGap, jurisdictions),
        jurisdictions: jurisdiction_table(&summary, jurisdictions),
        research: research_table(&summary, jurisdictions),
        research_comparison: ResearchComparison::compute(&summary),
        sample_publications: SAMPLE_PUBLICATIONS
            .into_iter()
            .filter(|p| jurisdictions.contains(&p.jurisdiction))
            .collect(),
        summary,
    })
}

/// Rendered content of one page.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "page", rename_all = "lowercase")]
pub enum PageReport {
    Overview(Box<OverviewPage>),
    Countries(Box<CountriesPage>),
    Category(Box<CategoryPage>),
}

/// Headless output: dataset facts plus one page.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub input: String,
    pub scope: Scope,
    pub jurisdictions: Vec<Jurisdiction>,
    pub data_info: DataInfo,
    pub view: PageReport,
}

/// Selection a report is built from.
#[derive(Debug, Clone)]
pub struct ReportRequest<'a> {
    pub input: String,
    pub page: Page,
    pub scope: Scope,
    pub jurisdictions: &'a [Jurisdiction],
    /// Category for the drill-down page; defaults to the first category.
    pub category: Option<&'a str>,
    pub detail: Option<&'a str>,
}

/// Build the report for `request`.
///
/// # Errors
/// Returns an error naming the category when the drill-down target does not
/// exist.
pub fn build_report(dataset: &Dataset, request: &ReportRequest<'_>) -> anyhow::Result<Report> {
    let js = request.jurisdictions;
    let view = match request.page {
        Page::Overview => PageReport::Overview(Box::new(overview_page(dataset, request.scope, js))),
        Page::Countries => {
            PageReport::Countries(Box::new(countries_page(dataset, request.scope, js)))
        }
        Page::Category => {
            let category = request
                .category
                .or_else(|| dataset.categories().first().copied())
                .ok_or_else(|| anyhow::anyhow!("Dataset has no categories"))?;
            let page = category_page(dataset, category, request.detail, js).ok_or_else(|| {
                anyhow::anyhow!("Unknown category or sub-technology: {category}")
            })?;
            PageReport::Category(Box::new(page))
        }
    };

    Ok(Report {
        input: request.input.clone(),
        scope: request.scope,
        jurisdictions: js.to_vec(),
        data_info: DataInfo::compute(dataset),
        view,
    })
}

/// Pretty-print `report` as JSON.
///
/// `NaN` values serialize as `null`.
///
/// # Errors
/// Returns an error if writing fails.
pub fn write_report<W: Write>(mut out: W, report: &Report) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut out, report)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Observation;
    use crate::domain::{TechGroup, TechType};

    fn dataset() -> Dataset {
        let mut solar_a = Observation::new("PERC", "태양광")
            .with_metric(Jurisdiction::Kr, Metric::TechLevel, 80.0)
            .with_metric(Jurisdiction::Us, Metric::TechLevel, 100.0)
            .with_metric(Jurisdiction::Kr, Metric::TechGap, 3.0);
        solar_a.tech_type = Some(TechType::Mitigation);
        solar_a.domestic_group = Some(TechGroup::CatchingUp);
        let mut solar_b = Observation::new("Tandem", "태양광")
            .with_metric(Jurisdiction::Kr, Metric::TechLevel, 90.0)
            .with_metric(Jurisdiction::Kr, Metric::TechGap, 1.0);
        solar_b.tech_type = Some(TechType::Mitigation);
        let mut water = Observation::new("Desalination", "수자원관리")
            .with_metric(Jurisdiction::Kr, Metric::TechLevel, 70.0);
        water.tech_type = Some(TechType::Adaptation);
        Dataset::from_observations(vec![solar_a, solar_b, water])
    }

    #[test]
    fn test_overview_page_respects_scope() {
        let ds = dataset();
        let page = overview_page(&ds, Scope::Mitigation, &Jurisdiction::ALL);
        assert_eq!(page.insights.total_count, 1);
        assert!((page.insights.average_level - 85.0).abs() < 1e-9);
        assert_eq!(page.rows.len(), 1);

        let all = overview_page(&ds, Scope::All, &Jurisdiction::ALL);
        assert_eq!(all.rows.len(), 2);
        assert_eq!(all.heatmap.rows.len(), 2);
    }

    #[test]
    fn test_category_page_uses_mean_or_single_detail() {
        let ds = dataset();
        let mean = category_page(&ds, "태양광", None, &Jurisdiction::ALL).unwrap();
        assert!((mean.summary.domestic_level() - 85.0).abs() < 1e-9);
        assert_eq!(mean.details, vec!["PERC", "Tandem"]);
        assert!(mean.description.description.contains("Photovoltaic"));

        let single = category_page(&ds, "태양광", Some("Tandem"), &Jurisdiction::ALL).unwrap();
        assert!((single.summary.domestic_level() - 90.0).abs() < 1e-9);
        assert_eq!(single.summary.detail_count, 1);
        assert_eq!(single.level_signal, Some(Signal::Good));

        assert!(category_page(&ds, "태양광", Some("Nope"), &Jurisdiction::ALL).is_none());
        assert!(category_page(&ds, "Nope", None, &Jurisdiction::ALL).is_none());
    }

    #[test]
    fn test_publications_follow_jurisdiction_selection() {
        let ds = dataset();
        let page =
            category_page(&ds, "태양광", None, &[Jurisdiction::Kr, Jurisdiction::Eu]).unwrap();
        assert_eq!(page.sample_publications.len(), 2);
        assert_eq!(page.level_bars.bars.len(), 2);
    }

    #[test]
    fn test_report_serializes_page_tag_and_nulls() {
        let ds = dataset();
        let request = ReportRequest {
            input: "tracker.csv".into(),
            page: Page::Category,
            scope: Scope::All,
            jurisdictions: &Jurisdiction::ALL,
            category: None,
            detail: None,
        };
        let report = build_report(&ds, &request).unwrap();
        let mut buf = Vec::new();
        write_report(&mut buf, &report).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["view"]["page"], "category");
        // categories are ordered by name, 수자원관리 sorts first
        assert_eq!(json["view"]["category"], "수자원관리");
        assert!(json["view"]["summary"]["jurisdictions"][1]["tech_level"].is_null());
        assert_eq!(json["data_info"]["details"], 3);
    }

    #[test]
    fn test_report_unknown_category_is_an_error() {
        let ds = dataset();
        let request = ReportRequest {
            input: String::new(),
            page: Page::Category,
            scope: Scope::All,
            jurisdictions: &Jurisdiction::ALL,
            category: Some("Geothermal"),
            detail: None,
        };
        assert!(build_report(&ds, &request).is_err());
    }
}
