//! Ranking and extremum selectors over category summaries.
//!
//! All selectors are stable: equal keys keep table order, and a jurisdiction
//! tie goes to whichever comes first in the jurisdiction list passed in.
//! `NaN` keys never rank.

use serde::Serialize;

use super::aggregate::{nan_mean, CategorySummary};
use crate::domain::{Jurisdiction, Metric};

/// Technology level at or above which a jurisdiction counts as leading a category.
pub const LEADING_LEVEL_THRESHOLD: f64 = 90.0;

fn ranked<'a>(
    table: &'a [CategorySummary],
    jurisdiction: Jurisdiction,
    metric: Metric,
    descending: bool,
) -> Vec<&'a CategorySummary> {
    let mut rows: Vec<&CategorySummary> =
        table.iter().filter(|s| !s.value(jurisdiction, metric).is_nan()).collect();
    // sort_by is stable, which preserves table order for equal keys
    rows.sort_by(|a, b| {
        let (a, b) = (a.value(jurisdiction, metric), b.value(jurisdiction, metric));
        if descending {
            b.total_cmp(&a)
        } else {
            a.total_cmp(&b)
        }
    });
    rows
}

/// The `k` categories with the largest value of `metric` for `jurisdiction`.
#[must_use]
pub fn top_k(
    table: &[CategorySummary],
    jurisdiction: Jurisdiction,
    metric: Metric,
    k: usize,
) -> Vec<&CategorySummary> {
    let mut rows = ranked(table, jurisdiction, metric, true);
    rows.truncate(k);
    rows
}

/// The `k` categories with the smallest value of `metric` for `jurisdiction`.
#[must_use]
pub fn bottom_k(
    table: &[CategorySummary],
    jurisdiction: Jurisdiction,
    metric: Metric,
    k: usize,
) -> Vec<&CategorySummary> {
    let mut rows = ranked(table, jurisdiction, metric, false);
    rows.truncate(k);
    rows
}

/// Jurisdiction holding the maximum `metric` for one category.
///
/// Ties go to the jurisdiction listed first; `None` when every value is `NaN`.
#[must_use]
pub fn leader(
    summary: &CategorySummary,
    metric: Metric,
    jurisdictions: &[Jurisdiction],
) -> Option<Jurisdiction> {
    let mut best: Option<(Jurisdiction, f64)> = None;
    for &j in jurisdictions {
        let value = summary.value(j, metric);
        if value.is_nan() {
            continue;
        }
        if best.map_or(true, |(_, best_value)| value > best_value) {
            best = Some((j, value));
        }
    }
    best.map(|(j, _)| j)
}

/// Leader per category, in table order.
#[must_use]
pub fn leaders_by_category<'a>(
    table: &'a [CategorySummary],
    metric: Metric,
    jurisdictions: &[Jurisdiction],
) -> Vec<(&'a str, Option<Jurisdiction>)> {
    table.iter().map(|s| (s.category.as_str(), leader(s, metric, jurisdictions))).collect()
}

/// Category with the largest value (first on ties).
#[must_use]
pub fn best_category(
    table: &[CategorySummary],
    jurisdiction: Jurisdiction,
    metric: Metric,
) -> Option<&CategorySummary> {
    top_k(table, jurisdiction, metric, 1).into_iter().next()
}

/// Largest non-`NaN` value of `metric` across jurisdictions for one category.
#[must_use]
pub fn best_value(
    summary: &CategorySummary,
    metric: Metric,
    jurisdictions: &[Jurisdiction],
) -> Option<f64> {
    leader(summary, metric, jurisdictions).map(|j| summary.value(j, metric))
}

/// Cross-category standing of one jurisdiction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub jurisdiction: Jurisdiction,
    /// Mean technology level across categories.
    pub average_level: f64,
    /// Categories where the technology level is at least [`LEADING_LEVEL_THRESHOLD`].
    pub leading_count: usize,
    /// 1-based rank by `average_level`, descending.
    pub rank: usize,
}

/// Rank jurisdictions by their mean technology level.
///
/// Returned in rank order; equal means keep the order of `jurisdictions`.
#[must_use]
pub fn jurisdiction_standings(
    table: &[CategorySummary],
    jurisdictions: &[Jurisdiction],
) -> Vec<Standing> {
    let mut standings: Vec<Standing> = jurisdictions
        .iter()
        .map(|&j| Standing {
            jurisdiction: j,
            average_level: nan_mean(table.iter().map(|s| Some(s.value(j, Metric::TechLevel)))),
            leading_count: table
                .iter()
                .filter(|s| s.value(j, Metric::TechLevel) >= LEADING_LEVEL_THRESHOLD)
                .count(),
            rank: 0,
        })
        .collect();

    standings.sort_by(|a, b| {
        // NaN averages sort last
        match (a.average_level.is_nan(), b.average_level.is_nan()) {
            (false, false) => b.average_level.total_cmp(&a.average_level),
            (a_nan, b_nan) => a_nan.cmp(&b_nan),
        }
    });
    for (i, standing) in standings.iter_mut().enumerate() {
        standing.rank = i + 1;
    }
    standings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(category: &str, levels: [f64; 5]) -> CategorySummary {
        let mut s = CategorySummary::empty(category);
        for j in Jurisdiction::ALL {
            s.jurisdiction_mut(j).tech_level = levels[j.index()];
        }
        s
    }

    fn table() -> Vec<CategorySummary> {
        vec![
            summary("A", [80.0, 85.0, 90.0, 100.0, 95.0]),
            summary("B", [92.0, 70.0, 88.0, 100.0, 93.0]),
            summary("C", [70.0, 95.0, 80.0, 90.0, 100.0]),
            summary("D", [f64::NAN, 60.0, 75.0, 100.0, 85.0]),
        ]
    }

    fn names(rows: &[&CategorySummary]) -> Vec<String> {
        rows.iter().map(|s| s.category.clone()).collect()
    }

    #[test]
    fn test_top_and_bottom_k() {
        let t = table();
        assert_eq!(names(&top_k(&t, Jurisdiction::Kr, Metric::TechLevel, 2)), vec!["B", "A"]);
        assert_eq!(names(&bottom_k(&t, Jurisdiction::Kr, Metric::TechLevel, 2)), vec!["C", "A"]);
        // NaN rows never rank
        assert_eq!(top_k(&t, Jurisdiction::Kr, Metric::TechLevel, 10).len(), 3);
    }

    #[test]
    fn test_equal_keys_keep_table_order() {
        let t = table();
        assert_eq!(
            names(&top_k(&t, Jurisdiction::Us, Metric::TechLevel, 3)),
            vec!["A", "B", "D"]
        );
    }

    #[test]
    fn test_top_and_bottom_cover_small_tables_without_overlap() {
        let t: Vec<_> = (0..20)
            .map(|i| summary(&format!("cat{i:02}"), [f64::from(i) * 1.5 + 50.0; 5]))
            .collect();
        let top = top_k(&t, Jurisdiction::Kr, Metric::TechLevel, 10);
        let bottom = bottom_k(&t, Jurisdiction::Kr, Metric::TechLevel, 10);
        let mut all: Vec<String> = names(&top).into_iter().chain(names(&bottom)).collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 20);
    }

    #[test]
    fn test_leader_ties_follow_jurisdiction_order() {
        let t = table();
        assert_eq!(leader(&t[0], Metric::TechLevel, &Jurisdiction::ALL), Some(Jurisdiction::Us));
        // C: EU 100 is the max
        assert_eq!(leader(&t[2], Metric::TechLevel, &Jurisdiction::ALL), Some(Jurisdiction::Eu));

        let tied = summary("T", [100.0, 90.0, 100.0, 100.0, 80.0]);
        assert_eq!(leader(&tied, Metric::TechLevel, &Jurisdiction::ALL), Some(Jurisdiction::Kr));
        let reordered = [Jurisdiction::Us, Jurisdiction::Jp, Jurisdiction::Kr];
        assert_eq!(leader(&tied, Metric::TechLevel, &reordered), Some(Jurisdiction::Us));
    }

    #[test]
    fn test_leader_of_all_nan_is_none() {
        let s = CategorySummary::empty("X");
        assert_eq!(leader(&s, Metric::TechLevel, &Jurisdiction::ALL), None);
        assert_eq!(best_value(&s, Metric::TechLevel, &Jurisdiction::ALL), None);
    }

    #[test]
    fn test_leader_detection_is_stable() {
        let t = table();
        let first = leaders_by_category(&t, Metric::TechLevel, &Jurisdiction::ALL);
        let second = leaders_by_category(&t, Metric::TechLevel, &Jurisdiction::ALL);
        assert_eq!(first, second);
        assert_eq!(first[1], ("B", Some(Jurisdiction::Us)));
    }

    #[test]
    fn test_standings() {
        let t = table();
        let standings = jurisdiction_standings(&t, &Jurisdiction::ALL);
        assert_eq!(standings[0].jurisdiction, Jurisdiction::Us);
        assert_eq!(standings[0].rank, 1);
        assert_eq!(standings[0].leading_count, 4);
        assert!((standings[0].average_level - 97.5).abs() < 1e-9);

        let kr = standings.iter().find(|s| s.jurisdiction == Jurisdiction::Kr).unwrap();
        // mean of 80, 92, 70 (NaN ignored)
        assert!((kr.average_level - 80.666_666).abs() < 1e-3);
        assert_eq!(kr.leading_count, 1);
    }

    #[test]
    fn test_best_category() {
        let t = table();
        let best = best_category(&t, Jurisdiction::Cn, Metric::TechLevel).unwrap();
        assert_eq!(best.category, "C");
        assert!(best_category(&[], Jurisdiction::Cn, Metric::TechLevel).is_none());
    }
}
