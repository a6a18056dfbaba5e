//! Folder session: select a folder, scan it, generate the workbook
//!
//! This is the state a front end drives. It owns the directory handle between
//! the scan and the generate step and reports every outcome as a
//! [`GenerateOutcome`] message instead of failing.

use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use serde::Serialize;

use crate::conversion::{export_paths, ExportConfig};
use crate::error::{ExportError, ExportResult, HandleResult};
use crate::fs::DirectoryHandle;
use crate::parser::walk_matching;
use crate::workbook::DownloadSink;

/// Number of files shown before a listing is cut short
pub const PREVIEW_LIMIT: usize = 50;

/// What the user chose to scan
#[derive(Debug)]
pub enum FolderInput {
    /// A live handle from a folder picker
    Handle(Box<dyn DirectoryHandle>),
    /// A typed path with no handle behind it; always rejected
    Path(String),
}

/// Host capability that lets the user choose a folder
pub trait FolderPicker {
    /// Whether the host can offer folder selection at all
    fn is_supported(&self) -> bool {
        true
    }

    /// Ask for a folder. `Ok(None)` means the user cancelled.
    fn pick(&self) -> HandleResult<Option<Box<dyn DirectoryHandle>>>;
}

/// Result of scanning a folder
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport {
    pub folder_name: String,
    pub file_count: usize,
    pub files: Vec<String>,
    pub last_scanned: DateTime<Utc>,
}

impl ScanReport {
    /// "1 file found" / "N files found"
    pub fn count_label(&self) -> String {
        let noun = if self.file_count == 1 { "file" } else { "files" };
        format!("{} {} found", self.file_count, noun)
    }

    /// The first `limit` files and how many were left out
    pub fn preview(&self, limit: usize) -> (&[String], usize) {
        let shown = self.files.len().min(limit);
        (&self.files[..shown], self.files.len() - shown)
    }

    /// Plain-text file count report
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str("JSON File Count Report\n");
        out.push_str("======================\n\n");
        out.push_str(&format!("Folder: {}\n", self.folder_name));
        out.push_str(&format!(
            "Scanned on: {}\n",
            self.last_scanned.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        out.push_str(&format!("JSON files found: {}\n", self.file_count));

        if !self.files.is_empty() {
            out.push_str("\nFiles:\n");
            for file in &self.files {
                out.push_str(&format!("  {}\n", file));
            }
        }

        out
    }
}

/// Reported result of a generate attempt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateOutcome {
    pub success: bool,
    pub message: String,
    /// Where the workbook was saved, on success
    pub saved_to: Option<String>,
}

impl GenerateOutcome {
    fn failed(error: &ExportError) -> Self {
        Self {
            success: false,
            message: error.user_message(),
            saved_to: None,
        }
    }
}

/// One user's folder-to-workbook session
#[derive(Debug)]
pub struct FolderSession {
    config: ExportConfig,
    handle: Option<Box<dyn DirectoryHandle>>,
    report: Option<ScanReport>,
}

impl FolderSession {
    pub fn new(config: ExportConfig) -> ExportResult<Self> {
        config.validate().map_err(ExportError::configuration)?;
        Ok(Self {
            config,
            handle: None,
            report: None,
        })
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// The latest scan, if any
    pub fn report(&self) -> Option<&ScanReport> {
        self.report.as_ref()
    }

    /// Let the user pick a folder and scan it.
    ///
    /// Returns `Ok(None)` if the user cancelled; the session is left as it was.
    pub fn choose_folder(
        &mut self,
        picker: &dyn FolderPicker,
    ) -> ExportResult<Option<&ScanReport>> {
        if !picker.is_supported() {
            return Err(ExportError::UnsupportedEnvironment);
        }

        match picker.pick()? {
            Some(handle) => self.scan_folder(FolderInput::Handle(handle)).map(Some),
            None => {
                log::info!("Folder selection cancelled");
                Ok(None)
            }
        }
    }

    /// Scan a folder for JSON files, replacing any previous scan
    pub fn scan_folder(&mut self, input: FolderInput) -> ExportResult<&ScanReport> {
        let handle = match input {
            FolderInput::Handle(handle) => handle,
            FolderInput::Path(path) => return Err(ExportError::RequiresLiveHandle { path }),
        };

        let files = walk_matching(handle.as_ref(), &self.config.json_suffix);
        log::info!("Found {} JSON files in {}", files.len(), handle.name());

        let report = ScanReport {
            folder_name: handle.name().to_string(),
            file_count: files.len(),
            files,
            last_scanned: Utc::now(),
        };

        self.handle = Some(handle);
        Ok(&*self.report.insert(report))
    }

    /// Generate and save the workbook for the scanned folder
    pub fn generate(&mut self, sink: &mut dyn DownloadSink) -> GenerateOutcome {
        self.generate_with_progress(sink, &ProgressBar::hidden())
    }

    /// Like [`generate`](Self::generate), advancing `progress` per file read
    pub fn generate_with_progress(
        &mut self,
        sink: &mut dyn DownloadSink,
        progress: &ProgressBar,
    ) -> GenerateOutcome {
        let (Some(handle), Some(report)) = (&self.handle, &self.report) else {
            return GenerateOutcome::failed(&ExportError::NoFolderSelected);
        };

        progress.set_length(report.files.len() as u64);

        match export_paths(handle.as_ref(), &report.files, &self.config, sink, progress) {
            Ok(export) => GenerateOutcome {
                success: true,
                message: format!(
                    "Excel file generated successfully! {} ({})",
                    export.receipt.file_name,
                    export.summary.summary()
                ),
                saved_to: Some(export.receipt.location),
            },
            Err(e) => {
                progress.finish_and_clear();
                log::error!("Error generating Excel file: {}", e);
                GenerateOutcome::failed(&e)
            }
        }
    }

    /// Forget the folder and its scan
    pub fn reset(&mut self) {
        self.handle = None;
        self.report = None;
    }
}
