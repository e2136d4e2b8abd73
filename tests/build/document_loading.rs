//! Tests for corpus parsing and record validation.

use super::common::{GENERATED_INDEX, GENERATED_SOURCE};
use docsift::testing::make_record;
use docsift::{parse_corpus, Category, RecordStore, SearchError};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_corpus(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write corpus");
    file
}

fn load_file(file: &NamedTempFile) -> docsift::Result<RecordStore> {
    let source = std::fs::read_to_string(file.path()).expect("Failed to read corpus");
    RecordStore::from_json(&source)
}

// ============================================================================
// ACCEPTED SHAPES
// ============================================================================

#[test]
fn test_load_bare_array() {
    let file = write_corpus(
        r##"[{"location": "#a", "page": "Home", "title": "A", "text": "alpha", "category": "function"}]"##,
    );
    let store = load_file(&file).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(
        store.get(0),
        Some(&make_record("#a", "A", "alpha", Category::Function))
    );
}

#[test]
fn test_load_docs_object() {
    let file = write_corpus(r##"{"docs": [{"location": "#a"}, {"location": "#b"}]}"##);
    let store = load_file(&file).unwrap();
    assert_eq!(store.len(), 2);
}

#[test]
fn test_load_generated_js_artifact() {
    let records = parse_corpus(&GENERATED_SOURCE).unwrap();
    assert_eq!(records.len(), 11, "{} should hold 11 records", GENERATED_INDEX);

    // strict loading rejects the page-root records
    let err = RecordStore::from_json(&GENERATED_SOURCE).unwrap_err();
    assert!(matches!(err, SearchError::InvalidRecord { position: 0, .. }));

    let (store, skipped) = RecordStore::from_json_lenient(&GENERATED_SOURCE).unwrap();
    assert_eq!(store.len(), 7);
    let positions: Vec<usize> = skipped
        .iter()
        .filter_map(|e| match e {
            SearchError::InvalidRecord { position, .. } => Some(*position),
            _ => None,
        })
        .collect();
    assert_eq!(positions, vec![0, 2, 3, 4]);
}

#[test]
fn test_generated_categories() {
    let (store, _) = RecordStore::from_json_lenient(&GENERATED_SOURCE).unwrap();
    let counts = store.category_counts();
    assert_eq!(counts.get(&Category::Section), Some(&1));
    assert_eq!(counts.get(&Category::Function), Some(&1));
    assert_eq!(counts.get(&Category::Method), Some(&5));
    assert_eq!(counts.get(&Category::Page), None);
}

#[test]
fn test_input_order_preserved() {
    let file = write_corpus(
        r##"[{"location": "#z"}, {"location": "#a"}, {"location": "#m"}]"##,
    );
    let store = load_file(&file).unwrap();
    let order: Vec<&str> = store.iter().map(|r| r.location.as_str()).collect();
    assert_eq!(order, vec!["#z", "#a", "#m"]);
}

// ============================================================================
// DEFAULTS AND NORMALIZATION
// ============================================================================

#[test]
fn test_missing_fields_default_to_empty() {
    let store = RecordStore::from_json(r##"[{"location": "#bare"}]"##).unwrap();
    let record = store.get(0).unwrap();
    assert_eq!(record.page, "");
    assert_eq!(record.title, "");
    assert_eq!(record.text, "");
    assert_eq!(record.category, Category::Other);
}

#[test]
fn test_null_and_unknown_category_become_other() {
    let store = RecordStore::from_json(
        r##"[{"location": "#a", "category": null}, {"location": "#b", "category": "macro"}]"##,
    )
    .unwrap();
    assert!(store.iter().all(|r| r.category == Category::Other));
}

#[test]
fn test_category_tag_case_insensitive() {
    let store = RecordStore::from_json(r##"[{"location": "#a", "category": "Function"}]"##)
        .unwrap();
    assert_eq!(store.get(0).unwrap().category, Category::Function);
}

// ============================================================================
// REJECTIONS
// ============================================================================

#[test]
fn test_empty_location_rejected_with_position() {
    let err = RecordStore::from_json(r##"[{"location": "#ok"}, {"location": ""}]"##).unwrap_err();
    assert!(matches!(err, SearchError::InvalidRecord { position: 1, .. }));
}

#[test]
fn test_missing_location_rejected() {
    let err = RecordStore::from_json(r##"[{"title": "orphan"}]"##).unwrap_err();
    assert!(matches!(err, SearchError::InvalidRecord { position: 0, .. }));
}

#[test]
fn test_non_string_category_rejected() {
    for category in ["3", "true", "[\"function\"]", "{\"kind\": \"function\"}"] {
        let source = format!(r##"[{{"location": "#a", "category": {}}}]"##, category);
        let err = RecordStore::from_json(&source).unwrap_err();
        assert!(
            matches!(err, SearchError::InvalidRecord { position: 0, .. }),
            "category {} should be rejected, got {:?}",
            category,
            err
        );
    }
}

#[test]
fn test_non_object_record_rejected() {
    let err = RecordStore::from_json(r##"[{"location": "#a"}, 42]"##).unwrap_err();
    assert!(matches!(err, SearchError::InvalidRecord { position: 1, .. }));
}

#[test]
fn test_unparseable_corpus() {
    for source in ["not json", "{\"pages\": []}", "42", "{\"docs\": 7}"] {
        assert!(
            matches!(RecordStore::from_json(source), Err(SearchError::Corpus(_))),
            "{:?} should be a corpus error",
            source
        );
    }
}

#[test]
fn test_empty_corpus_is_fine() {
    let file = write_corpus("[]");
    assert!(load_file(&file).unwrap().is_empty());
}
