//! Raw table readers for the supported input formats.
//!
//! Spreadsheets (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`) are read through
//! calamine; delimited text (`.csv`) through the csv crate. Both produce the
//! same [`RawTable`]: one header row plus untyped data rows.

use calamine::{open_workbook_auto, Data, Reader};
use log::debug;
use std::path::Path;

use crate::domain::LoadError;

/// UTF-8 byte-order mark written by the exporter and by spreadsheet tools.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A single untyped cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Numeric value, coercing numeric-looking text. Anything else is missing.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) if v.is_finite() => Some(*v),
            Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Trimmed, non-empty text. Numbers are rendered without a trailing `.0`.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Number(v) => Some(v.to_string()),
            Cell::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
        }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.as_text().is_none()
    }
}

impl From<&Data> for Cell {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: &Data) -> Self {
        match value {
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Bool(b) => Cell::Text(b.to_string()),
            Data::DateTime(dt) => Cell::Number(dt.as_f64()),
            Data::Error(_) | Data::Empty => Cell::Empty,
        }
    }
}

/// Header row plus data rows, as read from the file.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Cell at `(row, col)`; short rows read as empty.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows.get(row).and_then(|r| r.get(col)).unwrap_or(&Cell::Empty)
    }
}

/// Input formats recognised by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Spreadsheet,
    Csv,
}

impl InputFormat {
    /// Detect the format from the file extension (case-insensitive).
    #[must_use]
    pub fn detect(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(InputFormat::Spreadsheet),
            "csv" => Some(InputFormat::Csv),
            _ => None,
        }
    }
}

/// Read the raw table from `path`.
///
/// `sheet` selects the worksheet for spreadsheet inputs and is ignored for CSV.
///
/// # Errors
/// Returns a [`LoadError`] when the file is missing, has an unsupported
/// extension, or cannot be parsed.
pub fn read_table(path: &Path, sheet: usize) -> Result<RawTable, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    match InputFormat::detect(path) {
        Some(InputFormat::Spreadsheet) => read_spreadsheet(path, sheet),
        Some(InputFormat::Csv) => read_csv(&std::fs::read(path)?),
        None => Err(LoadError::UnsupportedFormat(path.to_path_buf())),
    }
}

fn read_spreadsheet(path: &Path, sheet: usize) -> Result<RawTable, LoadError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|source| LoadError::Workbook { path: path.to_path_buf(), source })?;
    let range = workbook
        .worksheet_range_at(sheet)
        .ok_or_else(|| LoadError::NoSheet { path: path.to_path_buf(), index: sheet })?
        .map_err(|source| LoadError::Workbook { path: path.to_path_buf(), source })?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or(LoadError::MissingHeader)?
        .iter()
        .map(|c| Cell::from(c).as_text().unwrap_or_default())
        .collect();
    let rows: Vec<Vec<Cell>> = rows.map(|r| r.iter().map(Cell::from).collect()).collect();

    debug!("Read {} rows x {} columns from sheet {sheet}", rows.len(), headers.len());
    Ok(RawTable { headers, rows })
}

/// Parse delimited text. A leading UTF-8 BOM is ignored.
///
/// # Errors
/// Returns [`LoadError::Csv`] on malformed input and
/// [`LoadError::MissingHeader`] when the input is empty.
pub fn read_csv(bytes: &[u8]) -> Result<RawTable, LoadError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(String::is_empty) {
        return Err(LoadError::MissingHeader);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|s| if s.trim().is_empty() { Cell::Empty } else { Cell::Text(s.to_string()) })
                .collect(),
        );
    }

    debug!("Read {} rows x {} columns from CSV", rows.len(), headers.len());
    Ok(RawTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_numeric_coercion() {
        assert_eq!(Cell::Number(80.0).as_number(), Some(80.0));
        assert_eq!(Cell::Text(" 72.5 ".into()).as_number(), Some(72.5));
        assert_eq!(Cell::Text("n/a".into()).as_number(), None);
        assert_eq!(Cell::Text("NaN".into()).as_number(), None);
        assert_eq!(Cell::Empty.as_number(), None);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(Cell::Text("  상승 ".into()).as_text(), Some("상승".to_string()));
        assert_eq!(Cell::Text("   ".into()).as_text(), None);
        assert_eq!(Cell::Number(3.0).as_text(), Some("3".to_string()));
        assert!(Cell::Empty.is_blank());
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(InputFormat::detect(Path::new("a/tracker.XLSX")), Some(InputFormat::Spreadsheet));
        assert_eq!(InputFormat::detect(Path::new("t.csv")), Some(InputFormat::Csv));
        assert_eq!(InputFormat::detect(Path::new("t.json")), None);
        assert_eq!(InputFormat::detect(Path::new("noext")), None);
    }

    #[test]
    fn test_read_csv_strips_bom_and_blank_cells() {
        let input = "\u{feff}a,b,c\n1,,x\n2,3\n";
        let table = read_csv(input.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["a", "b", "c"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.cell(0, 1), &Cell::Empty);
        assert_eq!(table.cell(0, 2), &Cell::Text("x".into()));
        // short row reads as empty
        assert_eq!(table.cell(1, 2), &Cell::Empty);
    }

    #[test]
    fn test_read_table_missing_file() {
        let err = read_table(Path::new("/definitely/not/here.xlsx"), 0).unwrap_err();
        assert!(err.is_not_found());
    }
}
