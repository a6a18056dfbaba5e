//! JSON to workbook conversion
//!
//! This module contains the flattening and assembly logic, configuration, and
//! the processing summary.

pub mod assemble;
pub mod config;
pub mod flatten;
pub mod limits;
pub mod stats;

pub use assemble::{assemble, AssembledWorkbook};
pub use config::ExportConfig;
pub use flatten::{flatten, flatten_value, FlatRow};
pub use stats::ProcessingSummary;

use indicatif::ProgressBar;

use crate::error::ExportResult;
use crate::fs::DirectoryHandle;
use crate::parser::{read_all_with_progress, walk_matching};
use crate::workbook::{emit, DownloadSink, EmitReceipt};

/// Outcome of a complete folder export
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub summary: ProcessingSummary,
    pub receipt: EmitReceipt,
}

/// Read `paths` under `root`, assemble the workbook and emit it.
///
/// The ceiling is checked before any file is opened.
pub fn export_paths(
    root: &dyn DirectoryHandle,
    paths: &[String],
    config: &ExportConfig,
    sink: &mut dyn DownloadSink,
    progress: &ProgressBar,
) -> ExportResult<ExportReport> {
    limits::check_file_count(paths.len(), config)?;

    let results = read_all_with_progress(root, paths, progress);
    let assembled = assemble(&results, config)?;
    let receipt = emit(&assembled.workbook, config, sink)?;

    Ok(ExportReport {
        summary: assembled.summary,
        receipt,
    })
}

/// Discover, read, assemble and emit in one call
pub fn export_folder(
    root: &dyn DirectoryHandle,
    config: &ExportConfig,
    sink: &mut dyn DownloadSink,
) -> ExportResult<ExportReport> {
    let paths = walk_matching(root, &config.json_suffix);
    export_paths(root, &paths, config, sink, &ProgressBar::hidden())
}
