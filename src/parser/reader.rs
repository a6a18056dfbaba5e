//! Read and parse every discovered JSON file, one result per path

use indicatif::ProgressBar;
use serde_json::Value;

use crate::error::FileError;
use crate::fs::DirectoryHandle;
use crate::parser::{parse_json_text, resolver::resolve};

/// Outcome of reading one discovered file
#[derive(Debug, Clone, PartialEq)]
pub struct FileReadResult {
    pub source_path: String,
    pub content: Result<Value, FileError>,
}

impl FileReadResult {
    pub fn ok(source_path: impl Into<String>, data: Value) -> Self {
        Self {
            source_path: source_path.into(),
            content: Ok(data),
        }
    }

    pub fn failed(source_path: impl Into<String>, error: FileError) -> Self {
        Self {
            source_path: source_path.into(),
            content: Err(error),
        }
    }

    /// Parsed data, if the file was read and parsed
    pub fn data(&self) -> Option<&Value> {
        self.content.as_ref().ok()
    }

    /// Human-readable failure, if any
    pub fn error_message(&self) -> Option<String> {
        self.content.as_ref().err().map(|e| e.to_string())
    }

    pub fn is_error(&self) -> bool {
        self.content.is_err()
    }
}

/// Read all `paths` relative to `root`
pub fn read_all(root: &dyn DirectoryHandle, paths: &[String]) -> Vec<FileReadResult> {
    read_all_with_progress(root, paths, &ProgressBar::hidden())
}

/// Read all `paths`, advancing `progress` once per file
pub fn read_all_with_progress(
    root: &dyn DirectoryHandle,
    paths: &[String],
    progress: &ProgressBar,
) -> Vec<FileReadResult> {
    let mut results = Vec::with_capacity(paths.len());

    for path in paths {
        progress.set_message(path.clone());
        let content = read_one(root, path);
        if let Err(e) = &content {
            log::warn!("Error reading {}: {}", path, e);
        } else {
            log::debug!("Read {}", path);
        }
        results.push(FileReadResult {
            source_path: path.clone(),
            content,
        });
        progress.inc(1);
    }

    progress.finish_and_clear();
    results
}

fn read_one(root: &dyn DirectoryHandle, path: &str) -> Result<Value, FileError> {
    let file = resolve(root, path).map_err(FileError::Resolution)?;
    let text = file.read_text().map_err(FileError::Read)?;
    Ok(parse_json_text(&text)?)
}
