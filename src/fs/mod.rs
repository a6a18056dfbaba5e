//! Capability-style access to a folder tree
//!
//! The scanning pipeline never sees raw paths. It is handed a [`DirectoryHandle`]
//! for the chosen folder and can only list and descend from there, which keeps the
//! walker and resolver testable against [`MemoryDirectory`].

pub mod memory;
pub mod native;

pub use memory::MemoryDirectory;
pub use native::FsDirectory;

use std::fmt;

use crate::error::{HandleError, HandleResult};

/// Kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// A named child of a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
        }
    }
}

/// Handle to a folder the user granted access to
pub trait DirectoryHandle: fmt::Debug {
    /// Display name of the folder (not a path)
    fn name(&self) -> &str;

    /// List immediate children in a stable order
    fn list_children(&self) -> HandleResult<Vec<DirEntry>>;

    /// Open a named child directory. Never creates it.
    fn get_child_directory(&self, name: &str) -> HandleResult<Box<dyn DirectoryHandle>>;

    /// Open a named child file. Never creates it.
    fn get_child_file(&self, name: &str) -> HandleResult<Box<dyn FileHandle>>;
}

/// Handle to a single file inside a granted folder
pub trait FileHandle: fmt::Debug {
    fn name(&self) -> &str;

    /// Read the whole file as text
    fn read_text(&self) -> HandleResult<String>;
}

/// Reject names that could step outside the current directory
pub(crate) fn check_entry_name(name: &str) -> HandleResult<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        return Err(HandleError::invalid_name(name));
    }
    Ok(())
}
