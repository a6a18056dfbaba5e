//! In-memory workbook model and XLSX output

pub mod emit;

pub use emit::{
    emit, emit_on, file_name_for, to_xlsx_bytes, DirectorySink, DownloadSink, EmitReceipt,
    MemorySink, SavedFile, XLSX_MIME_TYPE,
};

use serde_json::Value;

use crate::conversion::flatten::FlatRow;

/// A single spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Blank,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }
}

impl From<&Value> for CellValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Blank,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => n
                .as_f64()
                .map(Self::Number)
                .unwrap_or_else(|| Self::Text(n.to_string())),
            Value::String(s) => Self::Text(s.clone()),
            // Arrays (and any stray object) occupy one cell as compact JSON
            other => Self::Text(other.to_string()),
        }
    }
}

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A named sheet: rows of cells, top to bottom
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Build a table: a header row of the union of keys in first-seen order,
    /// then one row per record with blanks for missing keys.
    pub fn from_records(name: impl Into<String>, records: &[FlatRow]) -> Self {
        let mut sheet = Self::new(name);
        let columns = column_union(records);
        if columns.is_empty() {
            return sheet;
        }

        sheet
            .rows
            .push(columns.iter().map(|c| CellValue::text(c.as_str())).collect());

        for record in records {
            let row = columns
                .iter()
                .map(|column| {
                    record
                        .get(column.as_str())
                        .map(CellValue::from)
                        .unwrap_or(CellValue::Blank)
                })
                .collect();
            sheet.rows.push(row);
        }

        sheet
    }

    /// Append a row
    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    /// Append an empty row
    pub fn push_blank(&mut self) {
        self.rows.push(Vec::new());
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Union of record keys in first-seen order
pub fn column_union(records: &[FlatRow]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut columns = Vec::new();
    for record in records {
        for key in record.keys() {
            if seen.insert(key.as_str()) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

/// An ordered collection of sheets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}
