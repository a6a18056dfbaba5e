//! Serialize a [`Workbook`] to XLSX and hand it to a download sink

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_xlsxwriter::{XlsxError, Workbook as XlsxWorkbook};

use super::{CellValue, Workbook};
use crate::conversion::config::ExportConfig;
use crate::error::{ExportError, ExportResult};

/// MIME type of Office Open XML spreadsheets
pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Excel's maximum number of characters in a cell
const MAX_CELL_CHARS: usize = 32_767;

/// Destination for a generated file
pub trait DownloadSink {
    /// Save `bytes` under `file_name`, returning a description of where it went
    fn save(&mut self, file_name: &str, mime_type: &str, bytes: &[u8]) -> ExportResult<String>;
}

/// Writes downloads into a directory, creating it if needed
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn save(&mut self, file_name: &str, _mime_type: &str, bytes: &[u8]) -> ExportResult<String> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            ExportError::io(format!("cannot create {}", self.dir.display()), e)
        })?;

        let path = self.dir.join(file_name);
        std::fs::write(&path, bytes)
            .map_err(|e| ExportError::io(format!("cannot write {}", path.display()), e))?;

        Ok(path.display().to_string())
    }
}

/// A file captured by [`MemorySink`]
#[derive(Debug, Clone, PartialEq)]
pub struct SavedFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Keeps downloads in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub saved: Vec<SavedFile>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DownloadSink for MemorySink {
    fn save(&mut self, file_name: &str, mime_type: &str, bytes: &[u8]) -> ExportResult<String> {
        self.saved.push(SavedFile {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            bytes: bytes.to_vec(),
        });
        Ok(format!("memory:{}", file_name))
    }
}

/// What an emit produced
#[derive(Debug, Clone, PartialEq)]
pub struct EmitReceipt {
    pub file_name: String,
    pub byte_len: usize,
    pub location: String,
}

/// Date-stamped output file name, e.g. `combined-json-data-2024-05-01.xlsx`
pub fn file_name_for(prefix: &str, date: NaiveDate) -> String {
    format!("{}-{}.xlsx", prefix, date.format("%Y-%m-%d"))
}

/// Serialize and save the workbook, stamped with today's UTC date
pub fn emit(
    workbook: &Workbook,
    config: &ExportConfig,
    sink: &mut dyn DownloadSink,
) -> ExportResult<EmitReceipt> {
    emit_on(workbook, config, chrono::Utc::now().date_naive(), sink)
}

/// Serialize and save the workbook, stamped with `date`
pub fn emit_on(
    workbook: &Workbook,
    config: &ExportConfig,
    date: NaiveDate,
    sink: &mut dyn DownloadSink,
) -> ExportResult<EmitReceipt> {
    let bytes = to_xlsx_bytes(workbook)?;
    let file_name = file_name_for(&config.file_name_prefix, date);
    let location = sink.save(&file_name, XLSX_MIME_TYPE, &bytes)?;

    log::info!("Saved {} ({} bytes) to {}", file_name, bytes.len(), location);

    Ok(EmitReceipt {
        file_name,
        byte_len: bytes.len(),
        location,
    })
}

/// Serialize the workbook to XLSX bytes
pub fn to_xlsx_bytes(workbook: &Workbook) -> ExportResult<Vec<u8>> {
    let mut xlsx = XlsxWorkbook::new();

    for sheet in &workbook.sheets {
        let worksheet = xlsx.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (row_index, row) in sheet.rows.iter().enumerate() {
            let row_num = u32::try_from(row_index).map_err(|_| XlsxError::RowColumnLimitError)?;

            for (col_index, cell) in row.iter().enumerate() {
                let col_num = u16::try_from(col_index).map_err(|_| XlsxError::RowColumnLimitError)?;

                match cell {
                    CellValue::Blank => {}
                    CellValue::Text(text) => {
                        worksheet.write_string(row_num, col_num, fit_cell_text(text, &sheet.name))?;
                    }
                    CellValue::Number(n) => {
                        worksheet.write_number(row_num, col_num, *n)?;
                    }
                    CellValue::Bool(b) => {
                        worksheet.write_boolean(row_num, col_num, *b)?;
                    }
                }
            }
        }
    }

    Ok(xlsx.save_to_buffer()?)
}

fn fit_cell_text<'a>(text: &'a str, sheet: &str) -> &'a str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => {
            log::warn!(
                "Truncating a {}-byte value in sheet '{}' to {} characters",
                text.len(),
                sheet,
                MAX_CELL_CHARS
            );
            &text[..cut]
        }
        None => text,
    }
}
