use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/tracker_sample.csv")
}

fn techgap(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_techgap"))
        .args(args)
        .env("RUST_LOG", "info")
        .stdin(Stdio::null())
        .output()
        .expect("Failed to run techgap")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_headless_report_succeeds() {
    let input = fixture();
    let output = techgap(&[input.to_str().unwrap(), "--headless"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Invalid JSON on stdout");
    assert_eq!(parsed["view"]["page"], "overview");
    // the load summary is logged once
    assert_eq!(stderr(&output).matches("Loaded 5 observations").count(), 1);
}

#[test]
fn test_missing_input_exits_noinput() {
    let output = techgap(&["/nonexistent/tracker2020.xlsx", "--headless"]);
    assert_eq!(output.status.code(), Some(66));
    assert!(stderr(&output).contains("error:"));
}

#[test]
fn test_schema_error_exits_dataerr() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("other.csv");
    std::fs::write(&path, "a,b\n1,2\n").unwrap();

    let output = techgap(&[path.to_str().unwrap(), "--headless"]);
    assert_eq!(output.status.code(), Some(65), "stderr: {}", stderr(&output));
}

#[test]
fn test_unknown_category_exits_usage() {
    let input = fixture();
    let output = techgap(&[
        input.to_str().unwrap(),
        "--headless",
        "--page",
        "category",
        "--category",
        "ZZZ",
    ]);
    assert_eq!(output.status.code(), Some(2), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("ZZZ"));
}

#[test]
fn test_export_failure_exits_error() {
    let input = fixture();
    let output = techgap(&[input.to_str().unwrap(), "--headless", "--export", "/nonexistent/exports"]);
    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("CSV export failed"));
}
