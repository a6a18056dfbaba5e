//! Combine per-file read results into the two-sheet workbook

use serde_json::Value;

use crate::conversion::config::{ExportConfig, ROW_INDEX_COLUMN, SOURCE_FILE_COLUMN};
use crate::conversion::flatten::{flatten_value, FlatRow};
use crate::conversion::limits::check_file_count;
use crate::conversion::stats::ProcessingSummary;
use crate::error::{json_kind, ExportResult, FileError};
use crate::parser::FileReadResult;
use crate::workbook::{Sheet, Workbook};

/// Result of assembling a batch of files
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledWorkbook {
    /// Every record in file order, tagged with its source
    pub records: Vec<FlatRow>,
    pub summary: ProcessingSummary,
    /// "Combined Data" followed by "Summary"
    pub workbook: Workbook,
}

/// Build the combined workbook from read results.
///
/// Fails with `ExportError::TooManyFiles` before doing any work when the batch
/// exceeds the ceiling. Individual file failures only land in the summary.
pub fn assemble(
    results: &[FileReadResult],
    config: &ExportConfig,
) -> ExportResult<AssembledWorkbook> {
    check_file_count(results.len(), config)?;

    let mut records = Vec::new();
    let mut summary = ProcessingSummary::new();

    for result in results {
        let rows = match &result.content {
            Ok(data) => file_records(&result.source_path, data, config),
            Err(e) => Err(e.clone()),
        };

        match rows {
            Ok(rows) => {
                log::debug!("{}: {} records", result.source_path, rows.len());
                records.extend(rows);
                summary.processed_files.push(result.source_path.clone());
            }
            Err(e) => {
                log::warn!("Error processing {}: {}", result.source_path, e);
                summary.errored_files.push(result.source_path.clone());
            }
        }
    }

    summary.total_records = records.len();

    let mut workbook = Workbook::new();
    workbook.push_sheet(Sheet::from_records(&config.data_sheet_name, &records));
    workbook.push_sheet(summary.to_sheet(&config.summary_sheet_name));

    log::info!("{}", summary.summary());

    Ok(AssembledWorkbook {
        records,
        summary,
        workbook,
    })
}

/// Turn one file's parsed content into tagged records.
///
/// Array elements that are not objects become rows holding only the metadata
/// columns. A flatten failure drops the whole file.
fn file_records(
    source: &str,
    data: &Value,
    config: &ExportConfig,
) -> Result<Vec<FlatRow>, FileError> {
    match data {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| -> Result<FlatRow, FileError> {
                let row = match item {
                    Value::Object(_) => flatten_value(item, config.max_depth)
                        .map_err(|e| FileError::Flatten { index, source: e })?,
                    other => {
                        log::debug!(
                            "{}: element {} is {}, writing an empty row",
                            source,
                            index,
                            json_kind(other)
                        );
                        FlatRow::new()
                    }
                };
                Ok(tag_row(row, source, index))
            })
            .collect(),
        Value::Object(_) => {
            let row = flatten_value(data, config.max_depth).map_err(|e| FileError::Flatten {
                index: 0,
                source: e,
            })?;
            Ok(vec![tag_row(row, source, 0)])
        }
        other => Err(FileError::Shape {
            kind: json_kind(other),
        }),
    }
}

fn tag_row(mut row: FlatRow, source: &str, index: usize) -> FlatRow {
    row.insert(SOURCE_FILE_COLUMN.to_string(), Value::from(source));
    row.insert(ROW_INDEX_COLUMN.to_string(), Value::from(index));
    row
}
