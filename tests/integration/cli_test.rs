//! Integration tests for the jsonsheet binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn run_jsonsheet(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jsonsheet"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute jsonsheet")
}

fn write_files(dir: &Path, count: usize) {
    for i in 0..count {
        fs::write(dir.join(format!("f{:03}.json", i)), format!(r#"{{"n": {}}}"#, i)).unwrap();
    }
}

fn listed(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .map(|entries| {
            entries
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn test_generates_dated_workbook() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    fs::create_dir_all(input.path().join("nested")).unwrap();
    fs::write(input.path().join("a.json"), r#"{"name": "Alice"}"#).unwrap();
    fs::write(input.path().join("nested/b.json"), r#"[{"name": "Bob"}]"#).unwrap();
    fs::write(input.path().join("notes.txt"), "not json").unwrap();

    let result = run_jsonsheet(&[
        input.path().to_str().unwrap(),
        "--output-dir",
        output.path().to_str().unwrap(),
    ]);

    let stdout = String::from_utf8_lossy(&result.stdout);
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(result.status.success(), "stderr: {}", stderr);
    assert!(stdout.contains("2 files found"), "stdout: {}", stdout);
    assert!(stdout.contains("nested/b.json"), "stdout: {}", stdout);
    assert!(stdout.contains("Excel file generated successfully!"), "stdout: {}", stdout);

    let expected = format!(
        "combined-json-data-{}.xlsx",
        chrono::Utc::now().date_naive().format("%Y-%m-%d")
    );
    assert_eq!(listed(output.path()), vec![expected]);
}

#[test]
fn test_scan_only_writes_nothing() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write_files(input.path(), 3);

    let result = run_jsonsheet(&[
        input.path().to_str().unwrap(),
        "-o",
        output.path().to_str().unwrap(),
        "--scan-only",
    ]);

    assert!(result.status.success());
    assert!(String::from_utf8_lossy(&result.stdout).contains("3 files found"));
    assert!(listed(output.path()).is_empty());
}

#[test]
fn test_listing_is_cut_after_fifty_files() {
    let input = tempdir().unwrap();
    write_files(input.path(), 60);

    let result = run_jsonsheet(&[input.path().to_str().unwrap(), "--scan-only"]);
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("... and 10 more files"), "stdout: {}", stdout);
    assert!(!stdout.contains("f059.json"));

    let result = run_jsonsheet(&[input.path().to_str().unwrap(), "--scan-only", "--list"]);
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("f059.json"));
    assert!(!stdout.contains("more files"));
}

#[test]
fn test_report_file_is_written() {
    let input = tempdir().unwrap();
    let report = tempdir().unwrap();
    write_files(input.path(), 2);
    let report_path = report.path().join("count.txt");

    let result = run_jsonsheet(&[
        input.path().to_str().unwrap(),
        "--scan-only",
        "--report",
        report_path.to_str().unwrap(),
    ]);

    assert!(result.status.success());
    let text = fs::read_to_string(report_path).unwrap();
    assert!(text.starts_with("JSON File Count Report"));
    assert!(text.contains("JSON files found: 2"));
    assert!(text.contains("f001.json"));
}

#[test]
fn test_too_many_files_fails() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write_files(input.path(), 101);

    let result = run_jsonsheet(&[
        input.path().to_str().unwrap(),
        "-o",
        output.path().to_str().unwrap(),
    ]);

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Too many files"), "stderr: {}", stderr);
    assert!(stderr.contains("101"));
    assert!(listed(output.path()).is_empty());
}

#[test]
fn test_missing_folder_fails() {
    let tmp = tempdir().unwrap();
    let missing = tmp.path().join("does-not-exist");

    let result = run_jsonsheet(&[missing.to_str().unwrap(), "--scan-only"]);

    assert!(!result.status.success());
    assert!(!String::from_utf8_lossy(&result.stderr).is_empty());
}

#[test]
fn test_bad_file_is_reported_not_fatal() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    fs::write(input.path().join("good.json"), r#"{"ok": true}"#).unwrap();
    fs::write(input.path().join("bad.json"), "{ nope").unwrap();

    let result = run_jsonsheet(&[
        input.path().to_str().unwrap(),
        "-o",
        output.path().to_str().unwrap(),
    ]);

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("1 files with errors"), "stdout: {}", stdout);
    assert_eq!(listed(output.path()).len(), 1);
}
