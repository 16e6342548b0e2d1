// tests/file_tests.rs
use std::fs;
use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use jsonquill::config::Config;
use jsonquill::document::node::JsonValue;
use jsonquill::document::parser::parse_json;
use jsonquill::document::path::JsonPath;
use jsonquill::document::tree::{DocumentOrigin, JsonTree};
use jsonquill::editor::session::{EditSession, LeafInput, MessageLevel};
use jsonquill::file::loader::{load_json_file, load_json_from_reader};
use jsonquill::file::saver::save_json_file;
use jsonquill::EditError;
use tempfile::TempDir;

#[test]
fn test_load_records_origin() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("doc.json");
    fs::write(&path, r#"{"a": [1, 2]}"#).unwrap();

    let tree = load_json_file(&path).unwrap();
    assert_eq!(tree.origin(), &DocumentOrigin::Loaded(path.clone()));
    assert_eq!(tree.root().child_count(), 1);
}

#[test]
fn test_load_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    assert!(load_json_file(dir.path().join("missing.json")).is_err());
}

#[test]
fn test_load_invalid_json_reports_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{\"a\": }").unwrap();

    let err = load_json_file(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<EditError>(),
        Some(EditError::Parse(_))
    ));
}

#[test]
fn test_save_uses_indent_and_trailing_newline() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.json");
    let tree = parse_json(r#"{"a": [1]}"#).unwrap();

    save_json_file(&path, &tree, &Config::default()).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "{\n    \"a\": [\n        1\n    ]\n}\n"
    );

    let two = Config {
        indent_size: 2,
        ..Config::default()
    };
    save_json_file(&path, &tree, &two).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "{\n  \"a\": [\n    1\n  ]\n}\n"
    );
}

#[test]
fn test_save_preserves_non_ascii() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("intl.json");
    let tree = parse_json(r#"{"grüße": "日本語"}"#).unwrap();

    save_json_file(&path, &tree, &Config::default()).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"grüße\": \"日本語\""));
    assert_eq!(load_json_file(&path).unwrap().root(), tree.root());
}

#[test]
fn test_gzip_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("doc.json.gz");
    let tree = parse_json(r#"{"z": 1, "a": "two"}"#).unwrap();

    save_json_file(&path, &tree, &Config::default()).unwrap();

    // The file on disk really is gzip
    let mut decoded = String::new();
    GzDecoder::new(fs::File::open(&path).unwrap())
        .read_to_string(&mut decoded)
        .unwrap();
    assert!(decoded.starts_with("{\n    \"z\": 1"));

    let loaded = load_json_file(&path).unwrap();
    assert_eq!(loaded.root(), tree.root());
}

#[test]
fn test_load_from_reader_detects_gzip() {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(br#"{"piped": true}"#).unwrap();
    let compressed = encoder.finish().unwrap();

    let tree = load_json_from_reader(compressed.as_slice()).unwrap();
    assert_eq!(tree.origin(), &DocumentOrigin::Fresh);
    assert!(tree
        .contains(&JsonPath::root().child("piped")));

    let plain = load_json_from_reader(&b"[1, 2]"[..]).unwrap();
    assert_eq!(plain.root().child_count(), 2);
}

#[test]
fn test_load_from_reader_rejects_invalid_utf8() {
    let err = load_json_from_reader(&[0x22, 0xff, 0xfe, 0x22][..]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<EditError>(),
        Some(EditError::Encoding(_))
    ));
}

#[test]
fn test_save_rejects_non_finite_number() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nan.json");
    let tree = JsonTree::new(JsonValue::Array(vec![JsonValue::from(f64::INFINITY)]));

    let err = save_json_file(&path, &tree, &Config::default()).unwrap_err();
    assert_eq!(
        err.downcast_ref::<EditError>(),
        Some(&EditError::NonFiniteNumber("/0".to_string()))
    );
    assert!(!path.exists());
    assert!(!dir.path().join("nan.tmp").exists());
}

#[test]
fn test_large_unsigned_survives_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("big.json");
    let tree = parse_json("[18446744073709551615]").unwrap();

    save_json_file(&path, &tree, &Config::default()).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[\n    18446744073709551615\n]\n"
    );
}

// ============================================================================
// Session File Tests
// ============================================================================

#[test]
fn test_session_edit_and_save_to_origin() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("doc.json");
    fs::write(&path, r#"{"name": "old"}"#).unwrap();

    let mut session = EditSession::empty();
    session.load_file(&path).unwrap();
    let id = session
        .index()
        .find_path(&JsonPath::root().child("name"))
        .unwrap();
    session.select(id).unwrap();
    session
        .update_active_leaf(LeafInput::Text("new".to_string()))
        .unwrap();

    let saved = session.save(None, &Config::default()).unwrap();
    assert_eq!(saved, path);
    assert_eq!(
        session.message().unwrap().text,
        format!("File saved successfully to {}", path.display())
    );
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "{\n    \"name\": \"new\"\n}\n"
    );
}

#[test]
fn test_session_save_fresh_document_needs_path() {
    let dir = TempDir::new().unwrap();
    let mut session = EditSession::empty();
    session.new_document();

    assert!(session.save(None, &Config::default()).is_err());
    let message = session.message().unwrap();
    assert_eq!(message.level, MessageLevel::Error);
    assert!(message.text.starts_with("Error saving file: "));

    let target = dir.path().join("new.json");
    session.save(Some(&target), &Config::default()).unwrap();
    assert_eq!(
        session.tree().unwrap().origin(),
        &DocumentOrigin::Loaded(target.clone())
    );
    // Later saves go to the same file
    assert_eq!(session.save(None, &Config::default()).unwrap(), target);
}

#[test]
fn test_session_save_without_document() {
    let dir = TempDir::new().unwrap();
    let mut session = EditSession::empty();
    let target = dir.path().join("nothing.json");

    assert!(session.save(Some(&target), &Config::default()).is_err());
    assert!(!target.exists());
}

#[test]
fn test_session_load_failure_unloads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "[1,").unwrap();

    let mut session = EditSession::new(parse_json("{}").unwrap());
    assert!(session.load_file(&path).is_err());

    assert!(!session.has_document());
    assert!(session.index().is_empty());
    let message = session.message().unwrap();
    assert_eq!(message.level, MessageLevel::Error);
    assert!(message
        .text
        .starts_with("Error: Failed to read or parse file."));
}

#[test]
fn test_session_load_reader() {
    let mut session = EditSession::empty();
    session.load_reader(&br#"{"piped": [1]}"#[..]).unwrap();
    assert!(session.has_document());
    assert_eq!(session.tree().unwrap().origin(), &DocumentOrigin::Fresh);
    assert_eq!(session.index().len(), 3);
}

#[test]
fn test_session_load_reader_failure_leaves_no_document() {
    let mut session = EditSession::empty();
    assert!(session.load_reader(&b"{bad"[..]).is_err());

    assert!(!session.has_document());
    assert!(session.index().is_empty());
    let message = session.message().unwrap();
    assert_eq!(message.level, MessageLevel::Error);
    assert!(message.text.starts_with("Error: Failed to read or parse input."));

    // The session stays usable
    session.new_document();
    assert!(session.has_document());
}
