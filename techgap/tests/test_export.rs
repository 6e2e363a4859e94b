use chrono::{NaiveDate, NaiveDateTime};
use std::path::{Path, PathBuf};

use techgap::dataset::load_dataset;
use techgap::export::{export_dataset, read_summary_csv};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn stamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 12, 1).unwrap().and_hms_opt(9, 30, 0).unwrap()
}

#[test]
fn test_export_writes_both_files() {
    let dataset = load_dataset(&fixture("tracker_sample.csv"), 0).expect("Failed to load");
    let dir = tempfile::tempdir().unwrap();

    let paths = export_dataset(dir.path(), &dataset, stamp()).expect("Export failed");

    assert_eq!(paths.summary, dir.path().join("category_summary_20201201_0930.csv"));
    assert_eq!(paths.detail, dir.path().join("detail_data_20201201_0930.csv"));
    for path in [&paths.summary, &paths.detail] {
        let bytes = std::fs::read(path).unwrap();
        assert!(bytes.starts_with(b"\xEF\xBB\xBF"), "{} has no BOM", path.display());
    }
}

#[test]
fn test_summary_export_reads_back() {
    let dataset = load_dataset(&fixture("tracker_sample.csv"), 0).expect("Failed to load");
    let dir = tempfile::tempdir().unwrap();
    let paths = export_dataset(dir.path(), &dataset, stamp()).expect("Export failed");

    let bytes = std::fs::read(&paths.summary).unwrap();
    let table = read_summary_csv(&bytes).expect("Failed to parse summary export");
    assert_eq!(table, dataset.summaries);
}

#[test]
fn test_detail_export_is_valid_input() {
    let dataset = load_dataset(&fixture("tracker_sample.csv"), 0).expect("Failed to load");
    let dir = tempfile::tempdir().unwrap();
    let paths = export_dataset(dir.path(), &dataset, stamp()).expect("Export failed");

    // canonical headers are accepted in place of the source headers
    let reloaded = load_dataset(&paths.detail, 0).expect("Failed to reload detail export");
    assert_eq!(reloaded.observations, dataset.observations);
    assert_eq!(reloaded.summaries, dataset.summaries);
}

#[test]
fn test_export_overwrites_same_minute() {
    let dataset = load_dataset(&fixture("tracker_sample.csv"), 0).expect("Failed to load");
    let dir = tempfile::tempdir().unwrap();

    let first = export_dataset(dir.path(), &dataset, stamp()).expect("Export failed");
    let second = export_dataset(dir.path(), &dataset, stamp()).expect("Export failed");

    assert_eq!(first, second);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
}
