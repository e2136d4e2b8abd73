//! Properties of search results over random corpora.
//!
//! Corpora are drawn from a small vocabulary so that queries actually hit,
//! titles collide, and ties happen.

use super::common::{assert_ranked, make_raw, search_all, session};
use docsift::{build_inverted_index, normalize, RawRecord, SearchOptions};
use proptest::prelude::*;
use std::collections::BTreeSet;

const VOCAB: &[&str] = &[
    "alpha", "bins", "edges", "mean", "moment", "moments", "histogram", "gauss", "update",
    "value", "sample", "merge",
];

const SEPARATORS: &[&str] = &[" ", "_", ".", "!"];

const TAGS: &[&str] = &[
    "function", "method", "type", "module", "section", "page", "other", "macro",
];

fn corpus_strategy() -> impl Strategy<Value = Vec<RawRecord>> {
    let record = (
        prop::collection::vec(prop::sample::select(VOCAB), 1..4),
        prop::sample::select(SEPARATORS),
        prop::collection::vec(prop::sample::select(VOCAB), 0..12),
        prop::sample::select(TAGS),
    );
    prop::collection::vec(record, 1..30).prop_map(|records| {
        records
            .into_iter()
            .enumerate()
            .map(|(i, (title, sep, text, tag))| {
                make_raw(&format!("#r{i}"), &title.join(sep), &text.join(" "), tag)
            })
            .collect()
    })
}

fn query_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(VOCAB).prop_map(str::to_string),
        (prop::sample::select(VOCAB), prop::sample::select(VOCAB))
            .prop_map(|(a, b)| format!("{a} {b}")),
        // Truncated words exercise prefix and infix expansion
        (prop::sample::select(VOCAB), 0usize..3)
            .prop_map(|(word, cut)| word[cut..word.len() - 1].to_string()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_search_is_deterministic(records in corpus_strategy(), query in query_strategy()) {
        let first = session(records.clone());
        let second = session(records);
        let a = search_all(&first, &query);
        prop_assert_eq!(&a, &search_all(&first, &query));
        prop_assert_eq!(a, search_all(&second, &query));
    }

    #[test]
    fn prop_results_ranked_and_non_negative(records in corpus_strategy(), query in query_strategy()) {
        let session = session(records);
        let results = search_all(&session, &query);
        assert_ranked(&results);
        for result in &results {
            prop_assert!(result.score.is_finite() && result.score >= 0.0);
        }
    }

    #[test]
    fn prop_page_is_slice_of_full_ranking(
        records in corpus_strategy(),
        query in query_strategy(),
        limit in 0i64..10,
        offset in 0i64..35,
    ) {
        let session = session(records);
        let all = search_all(&session, &query);
        let page = session
            .search(&query, &SearchOptions::new().limit(limit).offset(offset))
            .unwrap();

        let start = (offset as usize).min(all.len());
        let end = (start + limit as usize).min(all.len());
        prop_assert_eq!(page, all[start..end].to_vec());
        prop_assert_eq!(session.count(&query, &SearchOptions::new()).unwrap(), all.len());
    }

    #[test]
    fn prop_title_word_beats_text_only(records in corpus_strategy(), word in prop::sample::select(VOCAB)) {
        let session = session(records);
        let results = search_all(&session, word);

        let (in_title, elsewhere): (Vec<_>, Vec<_>) = results
            .iter()
            .partition(|r| normalize(&r.title).contains(word));

        let lowest_title = in_title.iter().map(|r| r.score).fold(f64::INFINITY, f64::min);
        let highest_other = elsewhere.iter().map(|r| r.score).fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(
            lowest_title > highest_other,
            "title match scored {} but a text-only match scored {}",
            lowest_title,
            highest_other
        );
    }

    #[test]
    fn prop_every_title_containing_word_is_found(records in corpus_strategy(), word in prop::sample::select(VOCAB)) {
        let session = session(records);
        let found: BTreeSet<&str> = search_all(&session, word)
            .into_iter()
            .map(|r| r.record_index)
            .filter_map(|idx| session.store().get(idx))
            .map(|record| record.location.as_str())
            .collect();

        for record in session.store().iter() {
            let mentioned = normalize(&record.title).contains(word)
                || normalize(&record.text).contains(word);
            prop_assert_eq!(found.contains(record.location.as_str()), mentioned, "{}", record.location);
        }
    }

    #[test]
    fn prop_category_filter_restricts_results(
        records in corpus_strategy(),
        query in query_strategy(),
        tag in prop::sample::select(&TAGS[..7]),
    ) {
        let session = session(records);
        let everything: BTreeSet<usize> = search_all(&session, &query)
            .into_iter()
            .filter(|r| r.category.as_str() == tag)
            .map(|r| r.record_index)
            .collect();

        let filtered = session
            .search(&query, &SearchOptions::new().limit(i64::MAX).categories([tag]))
            .unwrap();
        prop_assert!(filtered.iter().all(|r| r.category.as_str() == tag));
        let filtered: BTreeSet<usize> = filtered.into_iter().map(|r| r.record_index).collect();
        prop_assert_eq!(filtered, everything);
    }

    #[test]
    fn prop_index_rebuild_is_identical(records in corpus_strategy()) {
        let first = session(records.clone());
        let second = session(records);
        prop_assert_eq!(first.index(), second.index());
        prop_assert_eq!(first.index(), &build_inverted_index(first.store()));
    }
}
