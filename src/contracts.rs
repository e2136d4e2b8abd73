//! Runtime contracts for the index and the ranking.
//!
//! Debug-mode assertions for the invariants the rest of the crate leans on:
//!
//! 1. Are **zero-cost in release builds** (use `debug_assert!`)
//! 2. Provide **early failure detection** during development
//! 3. Mirror the invariant lists at the top of `inverted.rs` and `scoring`
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function            | Invariant                                   |
//! |------------------------------|---------------------------------------------|
//! | `check_posting_list_valid`   | POSTINGS_BY_RECORD, POSITIONS_INCREASING    |
//! | `check_index_well_formed`    | all of the above + DOC_FREQ_CORRECT         |
//! | `check_ranking_sorted`       | score DESC, record ASC                      |
//! | `check_snippet_valid`        | spans inside the window, window inside text |

// ============================================================================
// COMPILE-TIME ASSERTIONS (evaluated at build time)
// ============================================================================

/// Static assertion that the scoring constants keep their ordering.
/// If it fails, the crate won't build.
const _: () = {
    use crate::scoring::core::*;

    // INVARIANT: title_beats_text
    assert!(TITLE_BOOST > 1.0);

    // INVARIANT: exact_beats_prefix_beats_infix
    assert!(EXACT_MATCH_WEIGHT > PREFIX_MATCH_WEIGHT);
    assert!(PREFIX_MATCH_WEIGHT > INFIX_MATCH_WEIGHT);
    assert!(INFIX_MATCH_WEIGHT > 0.0);

    // INVARIANT: api_names_beat_prose
    assert!(FUNCTION_WEIGHT > MODULE_WEIGHT);
    assert!(MODULE_WEIGHT > SECTION_WEIGHT);
    assert!(SECTION_WEIGHT > PAGE_WEIGHT);
    assert!(PAGE_WEIGHT > OTHER_WEIGHT);
    assert!(OTHER_WEIGHT > 0.0);

    assert!(PHRASE_BONUS > 0.0);
    assert!(STOP_WORD_WEIGHT > 0.0 && STOP_WORD_WEIGHT < 1.0);
};

use crate::inverted::{InvertedIndex, PostingList};
use crate::types::{SearchResult, Snippet};

// ============================================================================
// INDEX CONTRACTS
// ============================================================================

/// Check one posting list: ordered, unique records, increasing positions.
#[inline]
pub fn check_posting_list_valid(term: &str, list: &PostingList, total_records: usize) {
    debug_assert!(
        !list.postings.is_empty(),
        "Contract violation: empty posting list for '{}'",
        term
    );
    debug_assert_eq!(
        list.doc_freq,
        list.postings.len(),
        "Contract violation: doc_freq for '{}' is {} but {} postings",
        term,
        list.doc_freq,
        list.postings.len()
    );

    for (i, posting) in list.postings.iter().enumerate() {
        debug_assert!(
            posting.record < total_records,
            "Contract violation: posting for '{}' has record {} >= {}",
            term,
            posting.record,
            total_records
        );
        if i > 0 {
            debug_assert!(
                list.postings[i - 1].record < posting.record,
                "Contract violation: postings for '{}' not strictly ordered at {}",
                term,
                i
            );
        }
        debug_assert!(
            posting.positions.windows(2).all(|w| w[0] < w[1]),
            "Contract violation: positions for '{}' in record {} not increasing",
            term,
            posting.record
        );
        debug_assert_eq!(
            posting.positions.len(),
            posting.count() as usize,
            "Contract violation: '{}' in record {} has {} positions but count {}",
            term,
            posting.record,
            posting.positions.len(),
            posting.count()
        );
    }
}

/// Check every posting list plus the corpus statistics.
#[inline]
pub fn check_index_well_formed(index: &InvertedIndex) {
    debug_assert_eq!(
        index.stats.len(),
        index.total_records,
        "Contract violation: {} record stats for {} records",
        index.stats.len(),
        index.total_records
    );

    if cfg!(debug_assertions) {
        for (term, list) in &index.terms {
            debug_assert!(
                !term.is_empty() && !term.chars().any(char::is_whitespace),
                "Contract violation: malformed term {:?}",
                term
            );
            check_posting_list_valid(term, list, index.total_records);
        }
    }
}

// ============================================================================
// RESULT CONTRACTS
// ============================================================================

/// Check that results are sorted by (score DESC, record ASC).
#[inline]
pub fn check_ranking_sorted(results: &[SearchResult]) {
    for (i, pair) in results.windows(2).enumerate() {
        let (prev, curr) = (&pair[0], &pair[1]);
        debug_assert!(
            prev.score > curr.score
                || (prev.score == curr.score && prev.record_index < curr.record_index),
            "Contract violation: ranking not sorted at {}: ({}, {}) before ({}, {})",
            i + 1,
            prev.score,
            prev.record_index,
            curr.score,
            curr.record_index
        );
    }
}

/// Check that a snippet's window and spans are consistent with its text.
#[inline]
pub fn check_snippet_valid(snippet: &Snippet, text_chars: usize) {
    debug_assert!(
        snippet.start <= snippet.end && snippet.end <= text_chars,
        "Contract violation: snippet window {}..{} outside text of {} chars",
        snippet.start,
        snippet.end,
        text_chars
    );
    for span in &snippet.matches {
        debug_assert!(
            span.start < span.end && span.start >= snippet.start && span.end <= snippet.end,
            "Contract violation: span {}..{} outside window {}..{}",
            span.start,
            span.end,
            snippet.start,
            snippet.end
        );
    }
}
