//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::types::{Category, DocumentRecord, RawRecord};

/// Create a raw record with every field present.
///
/// This is the canonical implementation used across all tests.
pub fn make_raw(location: &str, title: &str, text: &str, category: &str) -> RawRecord {
    RawRecord::new(location, "Home", title, text, category)
}

/// Create a validated record directly, bypassing the store.
pub fn make_record(location: &str, title: &str, text: &str, category: Category) -> DocumentRecord {
    DocumentRecord {
        location: location.to_string(),
        page: "Home".to_string(),
        title: title.to_string(),
        text: text.to_string(),
        category,
    }
}

/// The two-record statistics corpus: `kurtosis` and `skewness`, both
/// mentioning "histogram" in their text.
pub fn histogram_corpus() -> Vec<RawRecord> {
    vec![
        make_raw(
            "#f1",
            "kurtosis",
            "Pearson excess kurtosis of a histogram.",
            "function",
        ),
        make_raw(
            "#f2",
            "skewness",
            "Fisher's skewness of a histogram.",
            "function",
        ),
    ]
}

/// A synthetic API-docs corpus of `n` records cycling through categories.
///
/// Every record mentions "value"; every tenth mentions "histogram" in its
/// title. Deterministic for a given `n`.
pub fn api_corpus(n: usize) -> Vec<RawRecord> {
    const VERBS: [&str; 5] = ["compute", "update", "merge", "fit", "normalize"];
    const NOUNS: [&str; 6] = ["mean", "variance", "weights", "bins", "edges", "moments"];

    (0..n)
        .map(|i| {
            let verb = VERBS[i % VERBS.len()];
            let noun = NOUNS[i % NOUNS.len()];
            let category = Category::ALL[i % Category::ALL.len()];
            let title = if i % 10 == 0 {
                format!("histogram_{verb}_{i}")
            } else {
                format!("{verb}_{noun}_{i}")
            };
            let text = format!(
                "{verb} the {noun} of a sample and return the resulting value. \
                 See also {} for the online variant.",
                NOUNS[(i + 1) % NOUNS.len()]
            );
            RawRecord::new(
                &format!("#api-{i}"),
                &format!("Page{}", i / 25),
                &title,
                &text,
                category.as_str(),
            )
        })
        .collect()
}
