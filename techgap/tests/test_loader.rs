use std::path::{Path, PathBuf};
use std::sync::Arc;

use techgap::dataset::{load_cached, load_dataset};
use techgap::domain::{Jurisdiction, LoadError, Metric, TechGroup, TechType};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_load_csv_with_source_headers() {
    let dataset = load_dataset(&fixture("tracker_sample.csv"), 0).expect("Failed to load CSV");

    // the row without a category is skipped
    assert_eq!(dataset.observations.len(), 5);
    assert_eq!(dataset.categories(), vec!["수자원관리", "원자력발전", "태양광"]);

    let solar = dataset.summary("태양광").expect("Missing solar category");
    assert_eq!(solar.detail_count, 2);
    assert_eq!(solar.tech_type, Some(TechType::Mitigation));
    assert!(approx(solar.domestic_level(), 85.0));
    assert!(approx(solar.domestic_gap(), 2.5));
    // one applied score is blank; the mean skips it
    assert!(approx(solar.value(Jurisdiction::Kr, Metric::BasicResearch), 75.0));
    assert!(approx(solar.value(Jurisdiction::Kr, Metric::AppliedResearch), 75.0));
    // 추격 and 선도 tie; the first one seen wins
    assert_eq!(solar.domestic_group, Some(TechGroup::CatchingUp));
    assert_eq!(solar.leading_jurisdiction.as_deref(), Some("미국"));
    assert_eq!(solar.jurisdiction(Jurisdiction::Kr).rd_trend.as_deref(), Some("상승"));

    let water = dataset.summary("수자원관리").expect("Missing water category");
    assert_eq!(water.tech_type, Some(TechType::Adaptation));
    assert!(approx(water.domestic_level(), 77.0));
    assert!(approx(water.domestic_gap(), 4.0));
    assert_eq!(water.domestic_group, Some(TechGroup::Lagging));
}

#[test]
fn test_workbook_matches_csv() {
    let csv = load_dataset(&fixture("tracker_sample.csv"), 0).expect("Failed to load CSV");
    let xlsx = load_dataset(&fixture("tracker_sample.xlsx"), 0).expect("Failed to load workbook");

    assert_eq!(xlsx.observations.len(), csv.observations.len());
    assert_eq!(xlsx.summaries, csv.summaries);
}

#[test]
fn test_workbook_sheet_out_of_range() {
    let err = load_dataset(&fixture("tracker_sample.xlsx"), 3).unwrap_err();
    assert!(matches!(err, LoadError::NoSheet { index: 3, .. }), "got {err:?}");
}

#[test]
fn test_missing_file() {
    let err = load_dataset(Path::new("/nonexistent/tracker2020.xlsx"), 0).unwrap_err();
    assert!(matches!(err, LoadError::NotFound(_)));
    assert!(err.is_not_found());

    let err = load_cached(Path::new("/nonexistent/tracker2020.xlsx"), 0).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracker.txt");
    std::fs::write(&path, "tech_category\n").unwrap();

    let err = load_dataset(&path, 0).unwrap_err();
    assert!(matches!(err, LoadError::UnsupportedFormat(_)), "got {err:?}");
}

#[test]
fn test_missing_columns_are_listed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.csv");
    std::fs::write(&path, "tech_detail,tech_category,kr_tech_level\nPERC,태양광,80\n").unwrap();

    match load_dataset(&path, 0) {
        Err(LoadError::MissingColumns(missing)) => {
            assert!(missing.contains(&"type".to_string()));
            assert!(missing.contains(&"eu_applied_research".to_string()));
            assert!(!missing.contains(&"kr_tech_level".to_string()));
        }
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

#[test]
fn test_unknown_type_label_reports_row() {
    let source = std::fs::read_to_string(fixture("tracker_sample.csv")).unwrap();
    let broken = source.replacen(",감축,", ",기타,", 1);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    std::fs::write(&path, broken).unwrap();

    match load_dataset(&path, 0) {
        Err(LoadError::InvalidValue { row, column, value }) => {
            assert_eq!(row, 2);
            assert_eq!(column, "type");
            assert_eq!(value, "기타");
        }
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn test_header_only_input_is_empty() {
    let source = std::fs::read_to_string(fixture("tracker_sample.csv")).unwrap();
    let header = source.lines().next().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("header_only.csv");
    std::fs::write(&path, format!("{header}\n")).unwrap();

    assert!(matches!(load_dataset(&path, 0), Err(LoadError::Empty)));
}

#[test]
fn test_cached_load_is_shared() {
    let path = fixture("tracker_sample.csv");
    let first = load_cached(&path, 0).expect("Failed to load");
    let second = load_cached(&path, 0).expect("Failed to load");
    assert!(Arc::ptr_eq(&first, &second));
}
