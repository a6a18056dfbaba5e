//! Walking and resolving JSON files in a real folder

use std::fs;

use jsonsheet::error::HandleError;
use jsonsheet::fs::{DirectoryHandle, FsDirectory};
use jsonsheet::parser::{read_all, resolve, walk};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::tempdir;

fn build_tree() -> tempfile::TempDir {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    fs::create_dir_all(root.join("inner/deeper")).unwrap();
    fs::create_dir_all(root.join("empty")).unwrap();

    fs::write(root.join("a.json"), r#"{"id": 1}"#).unwrap();
    fs::write(root.join("b.JSON"), r#"[{"id": 2}]"#).unwrap();
    fs::write(root.join("c.txt"), "plain text").unwrap();
    fs::write(root.join("inner/d.json"), r#"{"id": 4}"#).unwrap();
    fs::write(root.join("inner/deeper/e.Json"), r#"{"id": 5}"#).unwrap();
    fs::write(root.join("inner/json"), "no suffix").unwrap();
    tmp
}

#[test]
fn test_walk_finds_json_recursively() {
    let tmp = build_tree();
    let root = FsDirectory::open(tmp.path()).unwrap();

    assert_eq!(
        walk(&root),
        vec!["a.json", "b.JSON", "inner/d.json", "inner/deeper/e.Json"]
    );
}

#[test]
fn test_walk_then_resolve_every_path() {
    let tmp = build_tree();
    let root = FsDirectory::open(tmp.path()).unwrap();

    for path in walk(&root) {
        let file = resolve(&root, &path).unwrap();
        assert!(path.ends_with(file.name()));
        assert!(!file.read_text().unwrap().is_empty());
    }
}

#[test]
fn test_resolve_missing_segment_fails() {
    let tmp = build_tree();
    let root = FsDirectory::open(tmp.path()).unwrap();

    assert!(resolve(&root, "nope/d.json").unwrap_err().is_not_found());
    assert!(resolve(&root, "inner/missing.json").unwrap_err().is_not_found());
    assert!(matches!(
        resolve(&root, "inner"),
        Err(HandleError::NotAFile { .. })
    ));
}

#[test]
fn test_file_deleted_after_scan_becomes_read_error() {
    let tmp = build_tree();
    let root = FsDirectory::open(tmp.path()).unwrap();
    let paths = walk(&root);

    fs::remove_file(tmp.path().join("inner/d.json")).unwrap();
    let results = read_all(&root, &paths);

    assert_eq!(results.len(), 4);
    assert_eq!(results[0].data(), Some(&json!({"id": 1})));
    assert!(results[2].is_error());
    assert_eq!(results[2].source_path, "inner/d.json");
    assert!(!results[3].is_error());
}

#[test]
fn test_root_name_is_folder_name() {
    let tmp = tempdir().unwrap();
    let folder = tmp.path().join("my-data");
    fs::create_dir(&folder).unwrap();

    let root = FsDirectory::open(&folder).unwrap();
    assert_eq!(root.name(), "my-data");
    assert!(walk(&root).is_empty());
}

#[test]
fn test_bom_and_invalid_utf8_are_tolerated() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("bom.json"), "\u{feff}{\"k\": \"v\"}").unwrap();
    fs::write(tmp.path().join("latin.json"), b"{\"k\": \"caf\xe9\"}").unwrap();

    let root = FsDirectory::open(tmp.path()).unwrap();
    let results = read_all(&root, &walk(&root));

    assert_eq!(results[0].source_path, "bom.json");
    assert_eq!(results[0].data(), Some(&json!({"k": "v"})));
    assert_eq!(results[1].data(), Some(&json!({"k": "caf\u{fffd}"})));
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_not_followed() {
    let tmp = build_tree();
    let outside = tempdir().unwrap();
    fs::write(outside.path().join("secret.json"), "{}").unwrap();
    std::os::unix::fs::symlink(outside.path(), tmp.path().join("link")).unwrap();

    let root = FsDirectory::open(tmp.path()).unwrap();
    assert!(!walk(&root).iter().any(|p| p.starts_with("link")));
}
