//! Table export
//!
//! Writes the aggregated category table and the raw observation table as two
//! timestamped CSV files. Currently the only export format.

pub mod csv;

pub use self::csv::{read_summary_csv, write_detail_csv, write_summary_csv};

use chrono::NaiveDateTime;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::dataset::Dataset;
use crate::domain::ExportError;

/// Which table an export file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Summary,
    Detail,
}

impl ExportKind {
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            ExportKind::Summary => "category_summary",
            ExportKind::Detail => "detail_data",
        }
    }
}

/// `{prefix}_YYYYMMDD_HHMM.csv`
#[must_use]
pub fn export_filename(kind: ExportKind, at: NaiveDateTime) -> String {
    format!("{}_{}.csv", kind.prefix(), at.format("%Y%m%d_%H%M"))
}

/// Paths of one completed export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub summary: PathBuf,
    pub detail: PathBuf,
}

fn create(path: &Path) -> Result<BufWriter<File>, ExportError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| ExportError::WriteFailed { path: path.to_path_buf(), source })
}

/// Write both tables into `dir`, stamped with `at`.
///
/// Existing files with the same name are overwritten.
///
/// # Errors
/// Returns [`ExportError`] if a file cannot be created or written.
pub fn export_dataset(
    dir: &Path,
    dataset: &Dataset,
    at: NaiveDateTime,
) -> Result<ExportPaths, ExportError> {
    let paths = ExportPaths {
        summary: dir.join(export_filename(ExportKind::Summary, at)),
        detail: dir.join(export_filename(ExportKind::Detail, at)),
    };

    let mut out = create(&paths.summary)?;
    write_summary_csv(&mut out, &dataset.summaries)?;
    out.flush()?;

    let mut out = create(&paths.detail)?;
    write_detail_csv(&mut out, &dataset.observations)?;
    out.flush()?;

    info!(
        "Exported {} categories to {} and {} observations to {}",
        dataset.summaries.len(),
        paths.summary.display(),
        dataset.observations.len(),
        paths.detail.display()
    );
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_export_filename() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(14, 7, 59).unwrap();
        assert_eq!(export_filename(ExportKind::Summary, at), "category_summary_20240305_1407.csv");
        assert_eq!(export_filename(ExportKind::Detail, at), "detail_data_20240305_1407.csv");
    }

    #[test]
    fn test_export_into_missing_directory_fails() {
        let dataset = Dataset::from_observations(Vec::new());
        let at = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let err = export_dataset(Path::new("/no/such/dir"), &dataset, at).unwrap_err();
        assert!(matches!(err, ExportError::WriteFailed { .. }));
    }
}
