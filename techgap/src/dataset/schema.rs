//! Column schema for the assessment sheet.
//!
//! Every column is known under two names: the header printed in the source
//! workbook (`한국-기술 수준 (%)`) and a canonical snake-case name
//! (`kr_tech_level`) used by the CSV exports. Either is accepted on load, so
//! an exported detail table can be loaded back as input.

use std::collections::HashMap;

use crate::domain::{Jurisdiction, LoadError, Metric};

/// A logical column of the observation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Detail,
    Category,
    Type,
    LeadingJurisdiction,
    DomesticGroup,
    Metric(Jurisdiction, Metric),
    RdTrend(Jurisdiction),
}

impl Field {
    /// All fields in export column order.
    #[must_use]
    pub fn all() -> Vec<Field> {
        let mut fields = vec![Field::Detail, Field::Category, Field::Type, Field::LeadingJurisdiction];
        for j in Jurisdiction::ALL {
            fields.push(Field::Metric(j, Metric::TechLevel));
            fields.push(Field::Metric(j, Metric::TechGap));
        }
        fields.push(Field::DomesticGroup);
        for j in Jurisdiction::ALL {
            fields.push(Field::RdTrend(j));
            fields.push(Field::Metric(j, Metric::BasicResearch));
            fields.push(Field::Metric(j, Metric::AppliedResearch));
        }
        fields
    }

    /// Canonical snake-case column name.
    #[must_use]
    pub fn canonical(self) -> String {
        match self {
            Field::Detail => "tech_detail".to_string(),
            Field::Category => "tech_category".to_string(),
            Field::Type => "type".to_string(),
            Field::LeadingJurisdiction => "leading_country".to_string(),
            Field::DomesticGroup => format!("{}_tech_group", Jurisdiction::DOMESTIC.code()),
            Field::Metric(j, m) => format!("{}_{}", j.code(), m.column_suffix()),
            Field::RdTrend(j) => format!("{}_rd_trend", j.code()),
        }
    }

    /// Header as printed in the source workbook.
    #[must_use]
    pub fn source(self) -> String {
        match self {
            Field::Detail => "세부기술".to_string(),
            Field::Category => "중분류".to_string(),
            Field::Type => "감축/적응".to_string(),
            Field::LeadingJurisdiction => "최고 기술 보유국".to_string(),
            Field::DomesticGroup => {
                format!("{}-기술 수준 그룹", Jurisdiction::DOMESTIC.source_label())
            }
            Field::Metric(j, m) => {
                let suffix = match m {
                    Metric::TechLevel => "기술 수준 (%)",
                    Metric::TechGap => "기술 격차 (년)",
                    Metric::BasicResearch => "기초 연구 역량(점)",
                    Metric::AppliedResearch => "응용 개발 연구 역량(점)",
                };
                format!("{}-{suffix}", j.source_label())
            }
            Field::RdTrend(j) => format!("{}-연구 개발 활동 경향", j.source_label()),
        }
    }
}

/// Normalize a header cell: drop a leading BOM and surrounding whitespace.
#[must_use]
pub fn normalize_header(raw: &str) -> &str {
    raw.trim_start_matches('\u{feff}').trim()
}

/// Resolved position of every [`Field`] in a concrete header row.
#[derive(Debug, Clone)]
pub struct ColumnIndex {
    positions: HashMap<Field, usize>,
}

impl ColumnIndex {
    /// Match a header row against the schema.
    ///
    /// # Errors
    /// Returns [`LoadError::MissingColumns`] listing every field that matched
    /// neither its source nor its canonical header.
    pub fn resolve(headers: &[String]) -> Result<Self, LoadError> {
        let lookup: HashMap<&str, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (normalize_header(h), i))
            .rev() // first occurrence wins on duplicate headers
            .collect();

        let mut positions = HashMap::new();
        let mut missing = Vec::new();
        for field in Field::all() {
            let canonical = field.canonical();
            let found = lookup
                .get(field.source().as_str())
                .or_else(|| lookup.get(canonical.as_str()))
                .copied();
            match found {
                Some(idx) => {
                    positions.insert(field, idx);
                }
                None => missing.push(canonical),
            }
        }

        if missing.is_empty() {
            Ok(Self { positions })
        } else {
            Err(LoadError::MissingColumns(missing))
        }
    }

    /// Column position of a field.
    #[must_use]
    pub fn position(&self, field: Field) -> usize {
        // resolve() guarantees every field is present
        self.positions[&field]
    }
}
