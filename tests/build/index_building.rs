//! Tests for inverted index construction.

use super::common::{api_corpus, histogram_corpus, GENERATED_SESSION};
use docsift::{build_inverted_index, tokenize, RecordStore};

fn store(records: Vec<docsift::RawRecord>) -> RecordStore {
    RecordStore::load(records).expect("Failed to load records")
}

#[test]
fn test_terms_sorted_and_unique() {
    let index = build_inverted_index(&store(api_corpus(50)));
    let terms: Vec<&String> = index.terms.keys().collect();
    assert!(terms.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_postings_well_formed() {
    let index = GENERATED_SESSION.index();
    for (term, list) in &index.terms {
        assert!(!term.is_empty());
        assert!(!term.chars().any(char::is_whitespace));
        assert_eq!(list.doc_freq, list.postings.len());
        assert!(list.postings.windows(2).all(|w| w[0].record < w[1].record));
        for posting in &list.postings {
            assert!(posting.positions.windows(2).all(|w| w[0] < w[1]));
            assert_eq!(posting.positions.len() as u32, posting.count());
        }
    }
}

#[test]
fn test_histogram_postings() {
    let index = build_inverted_index(&store(histogram_corpus()));

    let histogram = index.get("histogram").unwrap();
    assert_eq!(histogram.doc_freq, 2);
    assert!(histogram.postings.iter().all(|p| p.text_count == 1 && p.title_count == 0));

    let kurtosis = index.get("kurtosis").unwrap();
    assert_eq!(kurtosis.doc_freq, 1);
    let posting = &kurtosis.postings[0];
    assert_eq!(posting.record, 0);
    assert_eq!(posting.title_count, 1);
    assert_eq!(posting.text_count, 1);
    // title "kurtosis" is 8 chars; text starts at 9; "Pearson excess " is 15
    assert_eq!(posting.positions, vec![0, 9 + 15]);
}

#[test]
fn test_positions_map_back_to_tokens() {
    let session = &*GENERATED_SESSION;
    let index = session.index();
    for (record_idx, record) in session.store().iter().enumerate() {
        let title_chars = index.stats[record_idx].title_chars as usize;
        let combined: Vec<(String, usize)> = tokenize(&record.title)
            .map(|t| (t.term, t.offset))
            .chain(tokenize(&record.text).map(|t| (t.term, title_chars + 1 + t.offset)))
            .collect();

        for (term, position) in combined {
            let posting = index.get(&term).and_then(|list| list.get(record_idx)).unwrap();
            assert!(
                posting.positions.contains(&(position as u32)),
                "{} missing position {} in record {}",
                term,
                position,
                record_idx
            );
        }
    }
}

#[test]
fn test_record_stats() {
    let index = build_inverted_index(&store(histogram_corpus()));
    assert_eq!(index.total_records, 2);
    assert_eq!(index.stats[0].title_tokens, 1);
    // Pearson excess kurtosis of a histogram
    assert_eq!(index.stats[0].text_tokens, 6);
    // Fisher's -> fisher, s
    assert_eq!(index.stats[1].text_tokens, 6);
    assert_eq!(index.token_count(), 14);
}

#[test]
fn test_rebuild_is_identical() {
    let first = build_inverted_index(&store(api_corpus(100)));
    let second = build_inverted_index(&store(api_corpus(100)));
    assert_eq!(first, second);
}

#[test]
fn test_empty_store_builds_empty_index() {
    let index = build_inverted_index(&store(Vec::new()));
    assert_eq!(index.term_count(), 0);
    assert_eq!(index.total_records, 0);
}

#[test]
fn test_top_terms() {
    let index = build_inverted_index(&store(histogram_corpus()));
    let top = index.top_terms(3);
    // "a", "histogram", "of" appear in both records; ties go to term order
    assert_eq!(top, vec![("a", 2), ("histogram", 2), ("of", 2)]);
}

#[test]
fn test_prefix_and_infix_terms() {
    let index = GENERATED_SESSION.index();
    let prefixed: Vec<&str> = index
        .prefix_terms("_update")
        .map(|(term, _)| term.as_str())
        .collect();
    assert_eq!(prefixed, vec!["_update_moment", "_update_moments"]);

    let infixed: Vec<&str> = index
        .infix_terms("histogramming")
        .map(|(term, _)| term.as_str())
        .collect();
    assert_eq!(infixed, vec!["uncertainhistogramming"]);
}
