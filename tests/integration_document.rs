//! Integration tests for opening and saving documents
//!
//! These tests use temporary directories to check that documents keep their
//! encoding, path and modified state across open and save.

use encoding_rs::UTF_8;
use quill::quill::document::Document;
use quill::quill::find_panel::{FindPanel, TextBuffer};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_open_reads_content_and_path() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let path = temp_dir.path().join("notes.txt");
    fs::write(&path, "line one\nline two").expect("failed to write file");

    let document = Document::open(&path).expect("document should open");

    assert_eq!(document.content(), "line one\nline two");
    assert_eq!(document.file_path.as_deref(), Some(path.as_path()));
    assert_eq!(document.encoding(), UTF_8);
    assert!(!document.is_modified());
    assert!(document.title().ends_with("notes.txt"));
}

#[test]
fn test_open_missing_file_fails() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    assert!(Document::open(temp_dir.path().join("missing.txt")).is_err());
}

#[test]
fn test_save_writes_edits_and_clears_modified() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let path = temp_dir.path().join("notes.txt");
    fs::write(&path, "draft").expect("failed to write file");

    let mut document = Document::open(&path).expect("document should open");
    document.set_text("final".to_string());
    assert!(document.is_modified());
    document.save().expect("save should succeed");

    assert!(!document.is_modified());
    assert_eq!(fs::read_to_string(&path).expect("file should exist"), "final");
}

#[test]
fn test_save_as_sets_path() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let path = temp_dir.path().join("new.txt");

    let mut document = Document::from("fresh text".to_string());
    document.save_as(&path).expect("save as should succeed");

    assert_eq!(document.file_path.as_deref(), Some(path.as_path()));
    assert_eq!(fs::read_to_string(&path).expect("file should exist"), "fresh text");
    document.save().expect("save to remembered path should succeed");
}

#[test]
fn test_save_keeps_single_byte_encoding() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let path = temp_dir.path().join("latin.txt");
    let original = b"Caf\xE9 cr\xE8me br\xFBl\xE9e, d\xE9j\xE0 vu, na\xEFve fa\xE7ade";
    fs::write(&path, original).expect("failed to write file");

    let mut document = Document::open(&path).expect("document should open");
    assert_ne!(document.encoding(), UTF_8);
    let content = document.text();
    document.set_text(content.replace("vu", "lu"));
    document.save().expect("save should succeed");

    let bytes = fs::read(&path).expect("file should exist");
    assert_eq!(bytes.len(), original.len(), "single-byte encoding should be kept");
}

#[test]
fn test_replace_through_panel_and_save() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let path = temp_dir.path().join("story.txt");
    fs::write(&path, "The cat sat.\nThe Cat ran.").expect("failed to write file");

    let mut document = Document::open(&path).expect("document should open");
    let mut panel = FindPanel::new();
    panel.open();
    panel.set_term("cat");
    panel.set_replacement("dog");
    panel.find_all(&document);
    assert_eq!(panel.matches().len(), 2);
    assert!(panel.replace_all(&mut document));
    document.save().expect("save should succeed");

    assert_eq!(
        fs::read_to_string(&path).expect("file should exist"),
        "The dog sat.\nThe dog ran."
    );
}
