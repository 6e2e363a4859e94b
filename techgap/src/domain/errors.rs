//! Structured error types for techgap
//!
//! Using thiserror for automatic Display implementation and error chaining.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load the assessment workbook.
///
/// This is the only error the dashboard reports for input: any variant halts
/// rendering for the session.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Unsupported input format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Failed to open workbook {}: {source}", .path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Workbook {} has no sheet at index {index}", .path.display())]
    NoSheet { path: PathBuf, index: usize },

    #[error("Input has no header row")]
    MissingHeader,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Invalid value {value:?} in column {column} (row {row})")]
    InvalidValue { row: usize, column: String, value: String },

    #[error("Input contains no observations")]
    Empty,

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LoadError {
    /// True when the input file itself could not be found.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            LoadError::NotFound(_) => true,
            LoadError::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write export file {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_display() {
        let err = LoadError::MissingColumns(vec!["kr_tech_level".into(), "type".into()]);
        assert_eq!(err.to_string(), "Missing required columns: kr_tech_level, type");
    }

    #[test]
    fn test_invalid_value_display() {
        let err = LoadError::InvalidValue {
            row: 7,
            column: "kr_tech_group".to_string(),
            value: "최고".to_string(),
        };
        assert!(err.to_string().contains("kr_tech_group"));
        assert!(err.to_string().contains("row 7"));
    }

    #[test]
    fn test_not_found_detection() {
        assert!(LoadError::NotFound(PathBuf::from("x.xlsx")).is_not_found());
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(LoadError::Io(io).is_not_found());
        assert!(!LoadError::Empty.is_not_found());
    }
}
