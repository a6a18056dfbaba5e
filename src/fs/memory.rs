//! In-memory folder tree implementing [`DirectoryHandle`]

use std::sync::Arc;

use super::{check_entry_name, DirEntry, DirectoryHandle, EntryKind, FileHandle};
use crate::error::{HandleError, HandleResult};

#[derive(Debug, Clone)]
enum Node {
    File(Arc<str>),
    Directory(Vec<(String, Node)>),
    /// A directory whose listing and traversal always fail
    Locked,
}

/// An in-memory folder. Entries are listed in insertion order.
///
/// ```
/// use jsonsheet::fs::{DirectoryHandle, MemoryDirectory};
///
/// let root = MemoryDirectory::new("data")
///     .with_file("a.json", r#"{"x": 1}"#)
///     .with_file("nested/b.json", "[]");
/// assert_eq!(root.list_children().unwrap().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryDirectory {
    name: String,
    children: Arc<Vec<(String, Node)>>,
}

impl MemoryDirectory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Arc::new(Vec::new()),
        }
    }

    /// Add a file at a slash-separated path, creating parent directories
    pub fn with_file(self, path: &str, content: impl Into<String>) -> Self {
        let content: String = content.into();
        self.insert(path, Node::File(Arc::from(content)))
    }

    /// Add an empty directory at a slash-separated path
    pub fn with_dir(self, path: &str) -> Self {
        self.insert(path, Node::Directory(Vec::new()))
    }

    /// Add a directory that cannot be listed or opened
    pub fn with_locked_dir(self, path: &str) -> Self {
        self.insert(path, Node::Locked)
    }

    fn insert(mut self, path: &str, node: Node) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let children = Arc::make_mut(&mut self.children);
        insert_at(children, &segments, node);
        self
    }

    fn find(&self, name: &str) -> HandleResult<&Node> {
        check_entry_name(name)?;
        self.children
            .iter()
            .find(|(child, _)| child == name)
            .map(|(_, node)| node)
            .ok_or_else(|| HandleError::not_found(name))
    }
}

fn insert_at(children: &mut Vec<(String, Node)>, segments: &[&str], node: Node) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };

    if rest.is_empty() {
        match children.iter_mut().find(|(name, _)| name == first) {
            Some((_, existing)) => *existing = node,
            None => children.push((first.to_string(), node)),
        }
        return;
    }

    let index = match children.iter().position(|(name, _)| name == first) {
        Some(index) => index,
        None => {
            children.push((first.to_string(), Node::Directory(Vec::new())));
            children.len() - 1
        }
    };

    if !matches!(children[index].1, Node::Directory(_)) {
        children[index].1 = Node::Directory(Vec::new());
    }
    if let Node::Directory(grandchildren) = &mut children[index].1 {
        insert_at(grandchildren, rest, node);
    }
}

impl DirectoryHandle for MemoryDirectory {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_children(&self) -> HandleResult<Vec<DirEntry>> {
        Ok(self
            .children
            .iter()
            .map(|(name, node)| DirEntry {
                name: name.clone(),
                kind: match node {
                    Node::File(_) => EntryKind::File,
                    Node::Directory(_) | Node::Locked => EntryKind::Directory,
                },
            })
            .collect())
    }

    fn get_child_directory(&self, name: &str) -> HandleResult<Box<dyn DirectoryHandle>> {
        match self.find(name)? {
            Node::Directory(children) => Ok(Box::new(MemoryDirectory {
                name: name.to_string(),
                children: Arc::new(children.clone()),
            })),
            Node::Locked => Err(HandleError::Io {
                name: name.to_string(),
                message: "permission denied".to_string(),
            }),
            Node::File(_) => Err(HandleError::NotADirectory {
                name: name.to_string(),
            }),
        }
    }

    fn get_child_file(&self, name: &str) -> HandleResult<Box<dyn FileHandle>> {
        match self.find(name)? {
            Node::File(content) => Ok(Box::new(MemoryFile {
                name: name.to_string(),
                content: Arc::clone(content),
            })),
            _ => Err(HandleError::NotAFile {
                name: name.to_string(),
            }),
        }
    }
}

/// A file inside a [`MemoryDirectory`]
#[derive(Debug, Clone)]
pub struct MemoryFile {
    name: String,
    content: Arc<str>,
}

impl FileHandle for MemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_text(&self) -> HandleResult<String> {
        Ok(self.content.to_string())
    }
}
