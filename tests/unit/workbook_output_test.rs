//! Read generated workbooks back with calamine

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::NaiveDate;
use jsonsheet::conversion::{export_folder, ExportConfig};
use jsonsheet::fs::MemoryDirectory;
use jsonsheet::workbook::{emit_on, CellValue, DirectorySink, Sheet, Workbook};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn cell(range: &Range<Data>, row: u32, col: u32) -> Data {
    range.get_value((row, col)).cloned().unwrap_or(Data::Empty)
}

fn text(value: &str) -> Data {
    Data::String(value.to_string())
}

fn open(path: impl AsRef<Path>) -> calamine::Sheets<std::io::BufReader<std::fs::File>> {
    open_workbook_auto(path).unwrap()
}

fn export_three_files(out: &Path) -> String {
    let root = MemoryDirectory::new("root")
        .with_file("a.json", r#"{"x":1,"y":{"z":2}}"#)
        .with_file("b.json", r#"[{"x":3,"tags":["p","q"],"ok":true,"gone":null}]"#)
        .with_file("c.json", r#""not-an-object""#);
    let mut sink = DirectorySink::new(out);

    let report = export_folder(&root, &ExportConfig::default(), &mut sink).unwrap();
    report.receipt.location
}

#[test]
fn test_workbook_has_data_then_summary() {
    let out = tempdir().unwrap();
    let location = export_three_files(out.path());

    let workbook = open(&location);
    assert_eq!(workbook.sheet_names(), vec!["Combined Data", "Summary"]);
}

#[test]
fn test_data_sheet_contents() {
    let out = tempdir().unwrap();
    let location = export_three_files(out.path());

    let mut workbook = open(&location);
    let data = workbook.worksheet_range("Combined Data").unwrap();

    let header: Vec<Data> = (0..7).map(|c| cell(&data, 0, c)).collect();
    assert_eq!(
        header,
        vec![
            text("x"),
            text("y.z"),
            text("_source_file"),
            text("_row_index"),
            text("tags"),
            text("ok"),
            text("gone"),
        ]
    );

    assert_eq!(cell(&data, 1, 0), Data::Float(1.0));
    assert_eq!(cell(&data, 1, 1), Data::Float(2.0));
    assert_eq!(cell(&data, 1, 2), text("a.json"));
    assert_eq!(cell(&data, 1, 3), Data::Float(0.0));

    assert_eq!(cell(&data, 2, 0), Data::Float(3.0));
    assert_eq!(cell(&data, 2, 1), Data::Empty);
    assert_eq!(cell(&data, 2, 2), text("b.json"));
    assert_eq!(cell(&data, 2, 4), text(r#"["p","q"]"#));
    assert_eq!(cell(&data, 2, 5), Data::Bool(true));
    assert_eq!(cell(&data, 2, 6), Data::Empty);

    // c.json contributes no rows
    assert_eq!(cell(&data, 3, 2), Data::Empty);
}

#[test]
fn test_summary_sheet_layout() {
    let out = tempdir().unwrap();
    let location = export_three_files(out.path());

    let mut workbook = open(&location);
    let summary = workbook.worksheet_range("Summary").unwrap();

    let expected = vec![
        (0, text("Processing Summary"), Data::Empty),
        (1, Data::Empty, Data::Empty),
        (2, text("Total Files Processed:"), Data::Float(2.0)),
        (3, text("Total Records:"), Data::Float(2.0)),
        (4, text("Files with Errors:"), Data::Float(1.0)),
        (5, Data::Empty, Data::Empty),
        (6, text("Processed Files:"), Data::Empty),
        (7, text("a.json"), Data::Empty),
        (8, text("b.json"), Data::Empty),
        (9, Data::Empty, Data::Empty),
        (10, text("Files with Errors:"), Data::Empty),
        (11, text("c.json"), Data::Empty),
    ];

    for (row, first, second) in expected {
        assert_eq!(cell(&summary, row, 0), first, "row {} column A", row);
        assert_eq!(cell(&summary, row, 1), second, "row {} column B", row);
    }
}

#[test]
fn test_file_name_is_date_stamped() {
    let out = tempdir().unwrap();
    let mut workbook = Workbook::new();
    let mut sheet = Sheet::new("Combined Data");
    sheet.push_row(vec![CellValue::text("only")]);
    workbook.push_sheet(sheet);

    let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    let mut sink = DirectorySink::new(out.path());
    let receipt = emit_on(&workbook, &ExportConfig::default(), date, &mut sink).unwrap();

    assert_eq!(receipt.file_name, "combined-json-data-2024-12-31.xlsx");
    let written = out.path().join(&receipt.file_name);
    assert_eq!(std::fs::metadata(&written).unwrap().len() as usize, receipt.byte_len);

    let mut reopened = open(&written);
    let range = reopened.worksheet_range("Combined Data").unwrap();
    assert_eq!(cell(&range, 0, 0), text("only"));
}

#[test]
fn test_empty_folder_still_writes_both_sheets() {
    let out = tempdir().unwrap();
    let mut sink = DirectorySink::new(out.path());
    let report = export_folder(&MemoryDirectory::new("empty"), &ExportConfig::default(), &mut sink)
        .unwrap();

    let mut workbook = open(&report.receipt.location);
    assert_eq!(workbook.sheet_names(), vec!["Combined Data", "Summary"]);

    let summary = workbook.worksheet_range("Summary").unwrap();
    assert_eq!(cell(&summary, 2, 1), Data::Float(0.0));
    assert_eq!(cell(&summary, 3, 1), Data::Float(0.0));
}

#[test]
fn test_overlong_text_is_truncated() {
    let out = tempdir().unwrap();
    let long = "x".repeat(40_000);
    let root = MemoryDirectory::new("root")
        .with_file("big.json", format!(r#"{{"blob": "{}"}}"#, long));
    let mut sink = DirectorySink::new(out.path());

    let report = export_folder(&root, &ExportConfig::default(), &mut sink).unwrap();
    assert_eq!(report.summary.total_records, 1);

    let mut workbook = open(&report.receipt.location);
    let data = workbook.worksheet_range("Combined Data").unwrap();
    match cell(&data, 1, 0) {
        Data::String(s) => assert_eq!(s.chars().count(), 32_767),
        other => panic!("expected text, got {:?}", other),
    }
}
