//! Domain types providing compile-time safety and self-documentation
//!
//! The assessment sheet compares one domestic jurisdiction against four
//! reference jurisdictions. Enums here replace the string codes the source
//! sheet uses (`kr_tech_level`, `감축`, `선도`, ...) so the rest of the crate
//! never matches on raw text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five assessed jurisdictions.
///
/// `ALL` fixes the iteration order used everywhere ties are broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Jurisdiction {
    Kr,
    Cn,
    Jp,
    Us,
    Eu,
}

impl Jurisdiction {
    /// All jurisdictions in canonical order (domestic first).
    pub const ALL: [Jurisdiction; 5] =
        [Jurisdiction::Kr, Jurisdiction::Cn, Jurisdiction::Jp, Jurisdiction::Us, Jurisdiction::Eu];

    /// The domestic jurisdiction every view is centred on.
    pub const DOMESTIC: Jurisdiction = Jurisdiction::Kr;

    /// Position in [`Jurisdiction::ALL`], used to index per-jurisdiction arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Jurisdiction::Kr => 0,
            Jurisdiction::Cn => 1,
            Jurisdiction::Jp => 2,
            Jurisdiction::Us => 3,
            Jurisdiction::Eu => 4,
        }
    }

    /// Column prefix in canonical headers (`kr_tech_level`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Jurisdiction::Kr => "kr",
            Jurisdiction::Cn => "cn",
            Jurisdiction::Jp => "jp",
            Jurisdiction::Us => "us",
            Jurisdiction::Eu => "eu",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Jurisdiction::Kr => "Korea",
            Jurisdiction::Cn => "China",
            Jurisdiction::Jp => "Japan",
            Jurisdiction::Us => "USA",
            Jurisdiction::Eu => "EU",
        }
    }

    /// Label used as the header prefix in the source workbook.
    #[must_use]
    pub const fn source_label(self) -> &'static str {
        match self {
            Jurisdiction::Kr => "한국",
            Jurisdiction::Cn => "중국",
            Jurisdiction::Jp => "일본",
            Jurisdiction::Us => "미국",
            Jurisdiction::Eu => "EU",
        }
    }

    #[must_use]
    pub const fn is_domestic(self) -> bool {
        matches!(self, Jurisdiction::Kr)
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Jurisdiction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Jurisdiction::ALL
            .into_iter()
            .find(|j| {
                s.eq_ignore_ascii_case(j.code())
                    || s.eq_ignore_ascii_case(j.label())
                    || s == j.source_label()
            })
            .ok_or_else(|| format!("unknown jurisdiction: {s}"))
    }
}

/// Mitigation vs adaptation technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechType {
    Mitigation,
    Adaptation,
}

impl TechType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TechType::Mitigation => "mitigation",
            TechType::Adaptation => "adaptation",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            TechType::Mitigation => "Mitigation",
            TechType::Adaptation => "Adaptation",
        }
    }
}

impl fmt::Display for TechType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TechType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "감축" => Ok(TechType::Mitigation),
            "적응" => Ok(TechType::Adaptation),
            other if other.eq_ignore_ascii_case("mitigation") => Ok(TechType::Mitigation),
            other if other.eq_ignore_ascii_case("adaptation") => Ok(TechType::Adaptation),
            other => Err(format!("unknown technology type: {other}")),
        }
    }
}

/// Domestic technology-group classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TechGroup {
    Leading,
    CatchingUp,
    Lagging,
}

impl TechGroup {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TechGroup::Leading => "leading",
            TechGroup::CatchingUp => "catching-up",
            TechGroup::Lagging => "lagging",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            TechGroup::Leading => "Leading",
            TechGroup::CatchingUp => "Catching-up",
            TechGroup::Lagging => "Lagging",
        }
    }
}

impl fmt::Display for TechGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TechGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "선도" => Ok(TechGroup::Leading),
            "추격" => Ok(TechGroup::CatchingUp),
            "후발" => Ok(TechGroup::Lagging),
            other if other.eq_ignore_ascii_case("leading") => Ok(TechGroup::Leading),
            other if other.eq_ignore_ascii_case("catching-up") => Ok(TechGroup::CatchingUp),
            other if other.eq_ignore_ascii_case("lagging") => Ok(TechGroup::Lagging),
            other => Err(format!("unknown technology group: {other}")),
        }
    }
}

/// Numeric per-jurisdiction field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Technology level relative to the global best, in percent
    TechLevel,
    /// Technology gap to the global best, in years
    TechGap,
    /// Basic-research capability score
    BasicResearch,
    /// Applied-research capability score
    AppliedResearch,
}

impl Metric {
    pub const ALL: [Metric; 4] =
        [Metric::TechLevel, Metric::TechGap, Metric::BasicResearch, Metric::AppliedResearch];

    /// Suffix in canonical column names (`kr_tech_level`).
    #[must_use]
    pub const fn column_suffix(self) -> &'static str {
        match self {
            Metric::TechLevel => "tech_level",
            Metric::TechGap => "tech_gap",
            Metric::BasicResearch => "basic_research",
            Metric::AppliedResearch => "applied_research",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Metric::TechLevel => "Technology level",
            Metric::TechGap => "Technology gap",
            Metric::BasicResearch => "Basic research",
            Metric::AppliedResearch => "Applied research",
        }
    }

    /// Format a value with the metric's unit (`85.0%`, `2.5y`).
    #[must_use]
    pub fn format_value(self, value: f64) -> String {
        if value.is_nan() {
            return "N/A".to_string();
        }
        match self {
            Metric::TechLevel => format!("{value:.1}%"),
            Metric::TechGap => format!("{value:.1}y"),
            Metric::BasicResearch | Metric::AppliedResearch => format!("{value:.1}"),
        }
    }
}

/// Type filter applied to category tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    All,
    Mitigation,
    Adaptation,
}

impl Scope {
    /// Whether a category of the given type is inside this scope.
    ///
    /// Categories with an unknown type only appear under `All`.
    #[must_use]
    pub fn includes(self, tech_type: Option<TechType>) -> bool {
        match self {
            Scope::All => true,
            Scope::Mitigation => tech_type == Some(TechType::Mitigation),
            Scope::Adaptation => tech_type == Some(TechType::Adaptation),
        }
    }

    /// Cycle All -> Mitigation -> Adaptation -> All.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Scope::All => Scope::Mitigation,
            Scope::Mitigation => Scope::Adaptation,
            Scope::Adaptation => Scope::All,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Scope::All => "All technologies",
            Scope::Mitigation => "Mitigation",
            Scope::Adaptation => "Adaptation",
        }
    }
}

/// Dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    /// Domestic headline, level/gap bars, heatmap and detail table
    #[default]
    Overview,
    /// Radar, standings, heatmap and ranked tables across jurisdictions
    Countries,
    /// Drill-down into one category or sub-technology
    Category,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Overview, Page::Countries, Page::Category];

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Page::Overview => Page::Countries,
            Page::Countries => Page::Category,
            Page::Category => Page::Overview,
        }
    }

    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Page::Overview => Page::Category,
            Page::Countries => Page::Overview,
            Page::Category => Page::Countries,
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Page::Overview => 0,
            Page::Countries => 1,
            Page::Category => 2,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::Countries => "Jurisdictions",
            Page::Category => "Category",
        }
    }
}
