//! BOM-prefixed CSV exports of the summary and detail tables.
//!
//! Floats are written with `f64`'s `Display`, the shortest text that parses
//! back to the same value, so a written table reloads bit-for-bit. Missing
//! values and `NaN` are written as empty cells.

use std::io::Write;

use crate::analysis::CategorySummary;
use crate::dataset::reader::{read_csv, Cell, UTF8_BOM};
use crate::dataset::schema::{normalize_header, Field};
use crate::dataset::Observation;
use crate::domain::{ExportError, Jurisdiction, LoadError, Metric, TechGroup, TechType};

/// Column of the category summary export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SummaryColumn {
    Category,
    Type,
    DetailCount,
    LeadingJurisdiction,
    DomesticGroup,
    Metric(Jurisdiction, Metric),
    RdTrend(Jurisdiction),
}

impl SummaryColumn {
    fn all() -> Vec<SummaryColumn> {
        let mut columns = vec![
            SummaryColumn::Category,
            SummaryColumn::Type,
            SummaryColumn::DetailCount,
            SummaryColumn::LeadingJurisdiction,
            SummaryColumn::DomesticGroup,
        ];
        for j in Jurisdiction::ALL {
            columns.extend(Metric::ALL.map(|m| SummaryColumn::Metric(j, m)));
            columns.push(SummaryColumn::RdTrend(j));
        }
        columns
    }

    fn name(self) -> String {
        match self {
            SummaryColumn::Category => Field::Category.canonical(),
            SummaryColumn::Type => Field::Type.canonical(),
            SummaryColumn::DetailCount => "detail_count".to_string(),
            SummaryColumn::LeadingJurisdiction => Field::LeadingJurisdiction.canonical(),
            SummaryColumn::DomesticGroup => Field::DomesticGroup.canonical(),
            SummaryColumn::Metric(j, m) => Field::Metric(j, m).canonical(),
            SummaryColumn::RdTrend(j) => Field::RdTrend(j).canonical(),
        }
    }

    fn value(self, summary: &CategorySummary) -> String {
        match self {
            SummaryColumn::Category => summary.category.clone(),
            SummaryColumn::Type => text_cell(summary.tech_type.map(TechType::as_str)),
            SummaryColumn::DetailCount => summary.detail_count.to_string(),
            SummaryColumn::LeadingJurisdiction => {
                text_cell(summary.leading_jurisdiction.as_deref())
            }
            SummaryColumn::DomesticGroup => text_cell(summary.domestic_group.map(TechGroup::as_str)),
            SummaryColumn::Metric(j, m) => float_cell(summary.value(j, m)),
            SummaryColumn::RdTrend(j) => text_cell(summary.jurisdiction(j).rd_trend.as_deref()),
        }
    }
}

fn float_cell(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

fn text_cell(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

fn detail_value(field: Field, obs: &Observation) -> String {
    match field {
        Field::Detail => obs.detail.clone(),
        Field::Category => obs.category.clone(),
        Field::Type => text_cell(obs.tech_type.map(TechType::as_str)),
        Field::LeadingJurisdiction => text_cell(obs.leading_jurisdiction.as_deref()),
        Field::DomesticGroup => text_cell(obs.domestic_group.map(TechGroup::as_str)),
        Field::Metric(j, m) => obs.metric(j, m).map(float_cell).unwrap_or_default(),
        Field::RdTrend(j) => text_cell(obs.scores(j).rd_trend.as_deref()),
    }
}

/// Write the category summary table.
///
/// # Errors
/// Returns [`ExportError`] when the underlying writer fails.
pub fn write_summary_csv<W: Write>(mut out: W, table: &[CategorySummary]) -> Result<(), ExportError> {
    out.write_all(UTF8_BOM)?;
    let columns = SummaryColumn::all();
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(columns.iter().map(|c| c.name()))?;
    for summary in table {
        writer.write_record(columns.iter().map(|c| c.value(summary)))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the raw observation table with canonical headers.
///
/// The output is itself a valid input file.
///
/// # Errors
/// Returns [`ExportError`] when the underlying writer fails.
pub fn write_detail_csv<W: Write>(mut out: W, observations: &[Observation]) -> Result<(), ExportError> {
    out.write_all(UTF8_BOM)?;
    let fields = Field::all();
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(fields.iter().map(|f| f.canonical()))?;
    for obs in observations {
        writer.write_record(fields.iter().map(|&f| detail_value(f, obs)))?;
    }
    writer.flush()?;
    Ok(())
}

/// Parse a table written by [`write_summary_csv`].
///
/// # Errors
/// Returns [`LoadError::MissingColumns`] when a summary column is absent and
/// [`LoadError::InvalidValue`] for an unparseable type, group or count.
pub fn read_summary_csv(bytes: &[u8]) -> Result<Vec<CategorySummary>, LoadError> {
    let table = read_csv(bytes)?;
    let columns = SummaryColumn::all();

    let mut positions = Vec::with_capacity(columns.len());
    let mut missing = Vec::new();
    for column in &columns {
        let name = column.name();
        match table.headers.iter().position(|h| normalize_header(h) == name) {
            Some(idx) => positions.push((*column, idx)),
            None => missing.push(name),
        }
    }
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing));
    }

    let mut summaries = Vec::with_capacity(table.rows.len());
    for (row_idx, row) in table.rows.iter().enumerate() {
        if row.iter().all(Cell::is_blank) {
            continue;
        }
        let line = row_idx + 2;
        let mut summary = CategorySummary::empty(String::new());
        for &(column, idx) in &positions {
            let cell = table.cell(row_idx, idx);
            let invalid = |value: String| LoadError::InvalidValue {
                row: line,
                column: column.name(),
                value,
            };
            match column {
                SummaryColumn::Category => summary.category = cell.as_text().unwrap_or_default(),
                SummaryColumn::Type => {
                    summary.tech_type =
                        cell.as_text().map(|v| v.parse().map_err(|_| invalid(v))).transpose()?;
                }
                SummaryColumn::DetailCount => {
                    summary.detail_count = match cell.as_text() {
                        Some(v) => v.parse().map_err(|_| invalid(v))?,
                        None => 0,
                    };
                }
                SummaryColumn::LeadingJurisdiction => summary.leading_jurisdiction = cell.as_text(),
                SummaryColumn::DomesticGroup => {
                    summary.domestic_group =
                        cell.as_text().map(|v| v.parse().map_err(|_| invalid(v))).transpose()?;
                }
                SummaryColumn::Metric(j, m) => {
                    summary.jurisdiction_mut(j).set_metric(m, cell.as_number().unwrap_or(f64::NAN));
                }
                SummaryColumn::RdTrend(j) => summary.jurisdiction_mut(j).rd_trend = cell.as_text(),
            }
        }
        summaries.push(summary);
    }
    Ok(summaries)
}
