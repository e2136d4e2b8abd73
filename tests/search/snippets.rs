//! Snippet windows and highlight spans.

use super::common::{locations, make_raw, search, GENERATED_SESSION};
use docsift::utils::char_slice;
use docsift::{fold, EngineConfig, RawRecord, SearchOptions, SearchSession};

fn session_with_window(records: Vec<RawRecord>, window: usize) -> SearchSession {
    let config = EngineConfig {
        snippet_window: window,
        ..EngineConfig::default()
    };
    SearchSession::build_with_config(records, config).unwrap()
}

#[test]
fn test_spans_cover_matching_words() {
    let results = search(&GENERATED_SESSION, "kurtosis");
    let record = GENERATED_SESSION.store().get(results[0].record_index).unwrap();
    let snippet = &results[0].snippet;

    assert!(!snippet.matches.is_empty());
    for span in &snippet.matches {
        assert_eq!(span.term, "kurtosis");
        assert_eq!(fold(char_slice(&record.text, span.start, span.end)), "kurtosis");
    }
}

#[test]
fn test_window_respects_size() {
    let text = format!(
        "{} the quick estimator {}",
        "padding ".repeat(40),
        "trailing ".repeat(40)
    );
    let session = session_with_window(vec![make_raw("#x", "", &text, "function")], 60);
    let results = search(&session, "estimator");
    let snippet = &results[0].snippet;

    assert!(snippet.end - snippet.start <= 60);
    assert_eq!(snippet.matches.len(), 1);
    assert!(snippet.excerpt(&text).contains("estimator"));
}

#[test]
fn test_window_finds_densest_cluster() {
    let text = format!(
        "bins {} bins edges bins edges {}",
        "filler ".repeat(50),
        "filler ".repeat(50)
    );
    let session = session_with_window(vec![make_raw("#x", "", &text, "function")], 50);
    let snippet = &search(&session, "bins edges")[0].snippet;

    assert_eq!(snippet.matches.len(), 4);
    assert!(snippet.start > 0);
}

#[test]
fn test_prefix_match_span_names_query_term() {
    let session = session_with_window(
        vec![make_raw("#x", "", "Update the moments of the histogram.", "method")],
        160,
    );
    let results = search(&session, "moment");
    let span = &results[0].snippet.matches[0];
    assert_eq!(span.term, "moment");
    assert_eq!(
        char_slice("Update the moments of the histogram.", span.start, span.end),
        "moments"
    );
}

#[test]
fn test_multibyte_offsets_are_chars() {
    let results = search(&GENERATED_SESSION, "μold");
    assert_eq!(locations(&results).len(), 1);
    let record = GENERATED_SESSION.store().get(results[0].record_index).unwrap();
    for span in &results[0].snippet.matches {
        assert_eq!(char_slice(&record.text, span.start, span.end), "μold");
    }
}

#[test]
fn test_title_only_match_has_empty_spans() {
    let session = session_with_window(
        vec![make_raw("#s", "UncertainHistogramming", "", "section")],
        160,
    );
    let results = search(&session, "uncertainhistogramming");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].snippet.start, 0);
    assert_eq!(results[0].snippet.end, 0);
    assert!(results[0].snippet.matches.is_empty());
}

#[test]
fn test_serialized_shape() {
    let results = search(&GENERATED_SESSION, "skewness");
    let json = serde_json::to_value(&results[0]).unwrap();
    let object = json.as_object().unwrap();

    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["category", "location", "page", "score", "snippet", "title"]
    );
    assert_eq!(json["category"], "method");
    assert!(json["snippet"]["matches"].is_array());
}

#[test]
fn test_options_shape_round_trip() {
    let options = SearchOptions::new().limit(5).categories(["function"]);
    let json = serde_json::to_string(&options).unwrap();
    assert!(json.contains("\"categoryFilter\""));
}
