//! Ranking: relative order of results for carefully built corpora.

use super::common::{assert_ranked, locations, make_raw, search, search_all, session};

#[test]
fn test_title_substring_beats_text_only() {
    let session = session(vec![
        // lots of text hits, high-priority category
        make_raw(
            "#text",
            "Accumulators",
            "online mean online mean online mean",
            "function",
        ),
        // one title hit, low-priority category
        make_raw("#title", "Online mean", "", "page"),
    ]);

    let results = search(&session, "online mean");
    assert_eq!(locations(&results), vec!["#title", "#text"]);
    assert!(results[0].score > results[1].score);
}

#[test]
fn test_title_substring_mid_word() {
    let session = session(vec![
        make_raw("#text", "", "moments moments moments", "function"),
        make_raw("#title", "_update_moments!", "", "other"),
    ]);
    let results = search(&session, "date_mom");
    assert_eq!(results[0].location, "#title");
}

#[test]
fn test_title_occurrence_outweighs_text_occurrence() {
    let session = session(vec![
        make_raw("#body", "Statistics", "variance", "function"),
        make_raw("#head", "Sample variance estimator", "", "function"),
    ]);
    let results = search(&session, "variance");
    assert_eq!(results[0].location, "#head");
}

#[test]
fn test_api_category_beats_prose() {
    let session = session(vec![
        make_raw("#page", "", "weights are normalized", "page"),
        make_raw("#section", "", "weights are normalized", "section"),
        make_raw("#fn", "", "weights are normalized", "function"),
        make_raw("#other", "", "weights are normalized", "whatever"),
    ]);
    let results = search(&session, "weights");
    assert_eq!(
        locations(&results),
        vec!["#fn", "#section", "#page", "#other"]
    );
}

#[test]
fn test_rare_term_dominates() {
    let mut records: Vec<_> = (0..4)
        .map(|i| make_raw(&format!("#mean{i}"), "", "mean", "function"))
        .collect();
    records.push(make_raw("#median", "", "median", "function"));
    let session = session(records);

    let results = search_all(&session, "mean median");
    assert_eq!(results.len(), 5);
    assert_eq!(results[0].location, "#median");
}

#[test]
fn test_exact_beats_prefix_beats_infix() {
    let session = session(vec![
        make_raw("#infix", "", "covariance", "function"),
        make_raw("#prefix", "", "variances", "function"),
        make_raw("#exact", "", "variance", "function"),
    ]);
    let results = search(&session, "variance");
    assert_eq!(locations(&results), vec!["#exact", "#prefix", "#infix"]);
}

#[test]
fn test_more_occurrences_rank_higher() {
    let session = session(vec![
        make_raw("#once", "", "bins", "function"),
        make_raw("#thrice", "", "bins bins bins", "function"),
    ]);
    assert_eq!(search(&session, "bins")[0].location, "#thrice");
}

#[test]
fn test_ties_broken_by_input_order() {
    let session = session(vec![
        make_raw("#c", "", "edges", "method"),
        make_raw("#a", "", "edges", "method"),
        make_raw("#b", "", "edges", "method"),
    ]);
    let results = search(&session, "edges");
    assert_eq!(locations(&results), vec!["#c", "#a", "#b"]);
    assert_eq!(results[0].score, results[2].score);
}

#[test]
fn test_duplicate_locations_are_distinct_hits() {
    let session = session(vec![
        make_raw("#dup", "Home", "first mention of moments", "section"),
        make_raw("#dup", "Home", "second mention of moments", "section"),
    ]);
    let results = search(&session, "moments");
    assert_eq!(results.len(), 2);
    assert!(results[0].record_index < results[1].record_index);
}

#[test]
fn test_results_always_ranked() {
    let session = session(docsift::testing::api_corpus(120));
    for query in ["value", "histogram", "mean variance", "update the", "norm"] {
        assert_ranked(&search_all(&session, query));
    }
}
