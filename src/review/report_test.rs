use super::report::{render_sections, report_path, write_report, Section};
use crate::cli::ReviewMode;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
fn test_report_path_single_and_multi() {
    assert_eq!(
        report_path(Path::new("foo.py"), ReviewMode::Single),
        PathBuf::from("foo_review.md")
    );
    assert_eq!(
        report_path(Path::new("foo.py"), ReviewMode::MultiAgent),
        PathBuf::from("fooMultiAgent_review.md")
    );
}

#[test]
fn test_report_path_keeps_directory() {
    assert_eq!(
        report_path(Path::new("src/pkg.v2/module.py"), ReviewMode::Single),
        PathBuf::from("src/pkg.v2/module_review.md")
    );
    assert_eq!(
        report_path(Path::new("/abs/archive.tar.py"), ReviewMode::MultiAgent),
        PathBuf::from("/abs/archive.tarMultiAgent_review.md")
    );
}

#[test]
fn test_report_path_without_extension() {
    assert_eq!(
        report_path(Path::new("scripts/run"), ReviewMode::Single),
        PathBuf::from("scripts/run_review.md")
    );
}

#[test]
fn test_render_sections() {
    let sections = vec![
        Section::new("Functions", "compute, normalize"),
        Section::new("Issues", "<no issues>"),
        Section::new("Refactored Code", "```python\npass\n```"),
    ];
    assert_eq!(
        render_sections(&sections),
        "# Functions\ncompute, normalize\n\n# Issues\n<no issues>\n\n# Refactored Code\n```python\npass\n```"
    );
}

#[test]
fn test_write_report_replaces_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("foo_review.md");
    fs::write(&path, "stale").unwrap();

    write_report(&path, "fresh review").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "fresh review");
    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .flatten()
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_write_report_missing_directory_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("foo_review.md");
    let result = write_report(&path, "content");
    assert!(matches!(result, Err(crate::app_error::AppError::Io(_))));
    assert!(!path.exists());
}
