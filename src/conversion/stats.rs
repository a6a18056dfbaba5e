//! Processing summary for a generated workbook

use serde::{Deserialize, Serialize};

use crate::workbook::{CellValue, Sheet};

/// Which files contributed records and which failed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingSummary {
    /// Files whose content produced records (possibly zero, for an empty array)
    pub processed_files: Vec<String>,
    /// Files that could not be read, parsed or flattened
    pub errored_files: Vec<String>,
    /// Number of records in the combined sheet
    pub total_records: usize,
}

impl ProcessingSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn processed_count(&self) -> usize {
        self.processed_files.len()
    }

    pub fn error_count(&self) -> usize {
        self.errored_files.len()
    }

    /// Render the fixed-layout summary sheet
    pub fn to_sheet(&self, name: &str) -> Sheet {
        let mut sheet = Sheet::new(name);

        sheet.push_row(vec!["Processing Summary".into()]);
        sheet.push_blank();
        sheet.push_row(vec![
            "Total Files Processed:".into(),
            self.processed_count().into(),
        ]);
        sheet.push_row(vec!["Total Records:".into(), self.total_records.into()]);
        sheet.push_row(vec!["Files with Errors:".into(), self.error_count().into()]);
        sheet.push_blank();

        sheet.push_row(vec!["Processed Files:".into()]);
        for file in &self.processed_files {
            sheet.push_row(vec![CellValue::text(file.as_str())]);
        }
        sheet.push_blank();

        sheet.push_row(vec!["Files with Errors:".into()]);
        for file in &self.errored_files {
            sheet.push_row(vec![CellValue::text(file.as_str())]);
        }

        sheet
    }

    /// Get a formatted one-line summary
    pub fn summary(&self) -> String {
        format!(
            "Processed {} files, {} records, {} files with errors",
            self.processed_count(),
            self.total_records,
            self.error_count()
        )
    }

    /// Export to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
