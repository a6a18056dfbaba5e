//! Directory handles backed by the local filesystem

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{check_entry_name, DirEntry, DirectoryHandle, EntryKind, FileHandle};
use crate::error::{HandleError, HandleResult};

/// A folder on disk. Children can only be reached by name from an opened root.
#[derive(Debug, Clone)]
pub struct FsDirectory {
    name: String,
    path: PathBuf,
}

impl FsDirectory {
    /// Open a folder as the root of a scan
    pub fn open(path: impl AsRef<Path>) -> HandleResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let metadata = std::fs::metadata(path).map_err(|e| HandleError::from_io(&display, &e))?;
        if !metadata.is_dir() {
            return Err(HandleError::NotADirectory { name: display });
        }

        let path = dunce::canonicalize(path).map_err(|e| HandleError::from_io(&display, &e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self { name, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn child_path(&self, name: &str) -> HandleResult<PathBuf> {
        check_entry_name(name)?;
        Ok(self.path.join(name))
    }
}

impl DirectoryHandle for FsDirectory {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_children(&self) -> HandleResult<Vec<DirEntry>> {
        let mut entries = Vec::new();

        let walker = WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| {
                let io = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                HandleError::from_io(&self.name, &io)
            })?;

            let Some(name) = entry.file_name().to_str() else {
                log::warn!(
                    "Skipping entry with non UTF-8 name in {}: {}",
                    self.path.display(),
                    entry.file_name().to_string_lossy()
                );
                continue;
            };

            let file_type = entry.file_type();
            let kind = if file_type.is_dir() {
                EntryKind::Directory
            } else if file_type.is_file() {
                EntryKind::File
            } else {
                log::debug!("Skipping special entry {}", entry.path().display());
                continue;
            };

            entries.push(DirEntry {
                name: name.to_string(),
                kind,
            });
        }

        Ok(entries)
    }

    fn get_child_directory(&self, name: &str) -> HandleResult<Box<dyn DirectoryHandle>> {
        let path = self.child_path(name)?;
        let metadata =
            std::fs::symlink_metadata(&path).map_err(|e| HandleError::from_io(name, &e))?;
        if !metadata.is_dir() {
            return Err(HandleError::NotADirectory {
                name: name.to_string(),
            });
        }

        Ok(Box::new(FsDirectory {
            name: name.to_string(),
            path,
        }))
    }

    fn get_child_file(&self, name: &str) -> HandleResult<Box<dyn FileHandle>> {
        let path = self.child_path(name)?;
        let metadata =
            std::fs::symlink_metadata(&path).map_err(|e| HandleError::from_io(name, &e))?;
        if !metadata.is_file() {
            return Err(HandleError::NotAFile {
                name: name.to_string(),
            });
        }

        Ok(Box::new(FsFile {
            name: name.to_string(),
            path,
        }))
    }
}

/// A file reached through an [`FsDirectory`]
#[derive(Debug, Clone)]
pub struct FsFile {
    name: String,
    path: PathBuf,
}

impl FileHandle for FsFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_text(&self) -> HandleResult<String> {
        let bytes = std::fs::read(&self.path).map_err(|e| HandleError::from_io(&self.name, &e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
