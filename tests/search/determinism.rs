//! Determinism: same corpus, same query, same bits.

use super::common::{api_corpus, search_all, session, GENERATED_SOURCE};
use docsift::{build_inverted_index, EngineConfig, SearchOptions, SearchSession};
use std::sync::Arc;

#[test]
fn test_rebuilt_session_gives_identical_results() {
    let first = session(api_corpus(150));
    let second = session(api_corpus(150));

    for query in ["value", "histogram", "merge weights", "online", "fit_bins"] {
        let a = search_all(&first, query);
        let b = search_all(&second, query);
        assert_eq!(a, b, "results differ for {:?}", query);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.score.to_bits(), y.score.to_bits());
        }
    }
}

#[test]
fn test_repeated_search_is_stable() {
    let session = session(api_corpus(80));
    let baseline = search_all(&session, "the mean");
    for _ in 0..10 {
        assert_eq!(search_all(&session, "the mean"), baseline);
    }
}

#[test]
fn test_index_rebuild_is_identical() {
    let (session, _) =
        SearchSession::from_json_lenient(&GENERATED_SOURCE, EngineConfig::default()).unwrap();
    let rebuilt = build_inverted_index(session.store());
    assert_eq!(&rebuilt, session.index());
}

#[test]
fn test_concurrent_searches_match_sequential() {
    let session = Arc::new(session(api_corpus(200)));
    let queries = ["value", "histogram", "variance", "update", "moments", "sample"];
    let expected: Vec<_> = queries.iter().map(|q| search_all(&session, q)).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = queries
            .iter()
            .map(|query| {
                let session = Arc::clone(&session);
                scope.spawn(move || {
                    session
                        .search(query, &SearchOptions::new().limit(i64::MAX))
                        .unwrap()
                })
            })
            .collect();

        for (handle, expected) in handles.into_iter().zip(&expected) {
            assert_eq!(&handle.join().unwrap(), expected);
        }
    });
}
