//! Shared test utilities and fixtures.

#![allow(dead_code)]

use docsift::{
    EngineConfig, RawRecord, SearchOptions, SearchResult, SearchSession,
};
use std::sync::LazyLock;

// Re-export canonical test utilities from docsift::testing
pub use docsift::testing::{api_corpus, histogram_corpus, make_raw};

// ============================================================================
// FIXTURES
// ============================================================================

/// The generated `search_index.js` of a small Julia package.
pub const GENERATED_INDEX: &str = "data/fixtures/search_index.js";

/// Fixture source, read once.
pub static GENERATED_SOURCE: LazyLock<String> = LazyLock::new(|| {
    std::fs::read_to_string(GENERATED_INDEX).expect("Failed to read generated index fixture")
});

/// Session over the generated fixture. Its page-root records have empty
/// locations, so it loads leniently.
pub static GENERATED_SESSION: LazyLock<SearchSession> = LazyLock::new(|| {
    let (session, skipped) =
        SearchSession::from_json_lenient(&GENERATED_SOURCE, EngineConfig::default())
            .expect("Fixture should parse");
    assert_eq!(skipped.len(), 4, "fixture has four empty-location records");
    session
});

// ============================================================================
// HELPERS
// ============================================================================

/// Build a session, panicking on invalid records.
pub fn session(records: Vec<RawRecord>) -> SearchSession {
    SearchSession::build(records).expect("Failed to build session")
}

/// Search with default options.
pub fn search(session: &SearchSession, query: &str) -> Vec<SearchResult> {
    session
        .search(query, &SearchOptions::new())
        .expect("Search failed")
}

/// Every ranked result, with no page limit.
pub fn search_all(session: &SearchSession, query: &str) -> Vec<SearchResult> {
    session
        .search(query, &SearchOptions::new().limit(i64::MAX))
        .expect("Search failed")
}

/// Locations of results, in rank order.
pub fn locations(results: &[SearchResult]) -> Vec<&str> {
    results.iter().map(|r| r.location.as_str()).collect()
}

/// Assert results are sorted by (score DESC, record index ASC).
pub fn assert_ranked(results: &[SearchResult]) {
    for pair in results.windows(2) {
        assert!(
            pair[0].score > pair[1].score
                || (pair[0].score == pair[1].score && pair[0].record_index < pair[1].record_index),
            "ranking violated: {} ({}) before {} ({})",
            pair[0].location,
            pair[0].score,
            pair[1].location,
            pair[1].score
        );
    }
}
