//! Recursive JSON file discovery over a directory handle

use crate::conversion::config::JSON_SUFFIX;
use crate::fs::{DirectoryHandle, EntryKind};
use crate::parser::filter::has_suffix_ignore_case;

/// Find JSON files under `root`, returning slash-joined paths relative to it.
///
/// A subtree that cannot be listed or opened is logged and skipped; the rest of
/// the walk continues.
pub fn walk(root: &dyn DirectoryHandle) -> Vec<String> {
    walk_matching(root, JSON_SUFFIX)
}

/// Like [`walk`], selecting files whose name ends in `suffix` (ASCII case-insensitive)
pub fn walk_matching(root: &dyn DirectoryHandle, suffix: &str) -> Vec<String> {
    let mut files = Vec::new();
    walk_into(root, "", suffix, &mut files);
    files
}

fn walk_into(dir: &dyn DirectoryHandle, relative: &str, suffix: &str, files: &mut Vec<String>) {
    let entries = match dir.list_children() {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Error scanning directory '{}': {}", display_dir(relative), e);
            return;
        }
    };

    for entry in entries {
        let full_path = join_path(relative, &entry.name);

        match entry.kind {
            EntryKind::File => {
                if has_suffix_ignore_case(&entry.name, suffix) {
                    files.push(full_path);
                }
            }
            EntryKind::Directory => match dir.get_child_directory(&entry.name) {
                Ok(child) => walk_into(child.as_ref(), &full_path, suffix, files),
                Err(e) => log::warn!("Error scanning directory '{}': {}", full_path, e),
            },
        }
    }
}

/// Join a relative directory path and an entry name with "/"
pub fn join_path(relative: &str, name: &str) -> String {
    if relative.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", relative, name)
    }
}

fn display_dir(relative: &str) -> &str {
    if relative.is_empty() {
        "."
    } else {
        relative
    }
}
