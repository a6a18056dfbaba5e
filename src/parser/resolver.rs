//! Resolve a discovered path back to a file handle

use crate::error::HandleResult;
use crate::fs::{DirectoryHandle, FileHandle};

/// Walk `path` one segment at a time from `root` and open the final file.
///
/// Nothing is created; any missing segment fails with `HandleError::NotFound`.
pub fn resolve(root: &dyn DirectoryHandle, path: &str) -> HandleResult<Box<dyn FileHandle>> {
    let mut segments: Vec<&str> = path.split('/').collect();
    // split always yields at least one segment
    let file_name = segments.pop().unwrap_or_default();

    let mut current: Option<Box<dyn DirectoryHandle>> = None;
    for segment in segments {
        let next = match &current {
            Some(dir) => dir.get_child_directory(segment)?,
            None => root.get_child_directory(segment)?,
        };
        current = Some(next);
    }

    match &current {
        Some(dir) => dir.get_child_file(file_name),
        None => root.get_child_file(file_name),
    }
}
