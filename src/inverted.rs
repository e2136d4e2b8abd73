//! Inverted index construction.
//!
//! One pass over the store: tokenize each record's title, then its text, and
//! fold every occurrence into a per-record posting. Titles and texts share one
//! coordinate space (`title + "\n" + text`), so a posting's positions are a
//! single strictly increasing list and the title/text split is recoverable
//! from `RecordStats::title_chars`.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **TERMS_SORTED**: terms enumerate in lexicographic order (BTreeMap)
//! 2. **POSTINGS_BY_RECORD**: each posting list is sorted by record index,
//!    with at most one posting per record
//! 3. **POSITIONS_INCREASING**: positions strictly increase within a posting
//! 4. **DOC_FREQ_CORRECT**: `doc_freq == postings.len()`
//! 5. **NON_EMPTY**: every term has at least one posting

use crate::contracts::check_index_well_formed;
use crate::store::RecordStore;
use crate::tokenizer::tokenize;
use crate::utils::char_len;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// All occurrences of one term in one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Posting {
    /// Record index in the store.
    pub record: usize,
    /// Char offsets in `title + "\n" + text`, strictly increasing.
    pub positions: Vec<u32>,
    /// Occurrences inside the title.
    pub title_count: u32,
    /// Occurrences inside the text.
    pub text_count: u32,
}

impl Posting {
    /// Raw occurrence count across title and text.
    #[inline]
    pub fn count(&self) -> u32 {
        self.title_count + self.text_count
    }
}

/// Postings for a term, ordered by record index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostingList {
    pub postings: Vec<Posting>,
    /// Number of records containing the term.
    pub doc_freq: usize,
}

impl PostingList {
    /// Binary search for a record's posting.
    pub fn get(&self, record: usize) -> Option<&Posting> {
        self.postings
            .binary_search_by_key(&record, |p| p.record)
            .ok()
            .map(|i| &self.postings[i])
    }
}

/// Per-record token statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecordStats {
    pub title_tokens: u32,
    pub text_tokens: u32,
    /// Char length of the title; text positions start at `title_chars + 1`.
    pub title_chars: u32,
}

/// Term → postings, plus corpus statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InvertedIndex {
    pub terms: BTreeMap<String, PostingList>,
    pub total_records: usize,
    pub stats: Vec<RecordStats>,
}

impl InvertedIndex {
    pub fn get(&self, term: &str) -> Option<&PostingList> {
        self.terms.get(term)
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Total tokens indexed across all titles and texts.
    pub fn token_count(&self) -> u64 {
        self.stats
            .iter()
            .map(|s| u64::from(s.title_tokens) + u64::from(s.text_tokens))
            .sum()
    }

    /// Terms that start with `prefix` (including `prefix` itself), in sorted order.
    ///
    /// A range scan: sorted term order makes this O(log n + matches).
    pub fn prefix_terms<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a String, &'a PostingList)> + 'a {
        self.terms
            .range::<str, _>((std::ops::Bound::Included(prefix), std::ops::Bound::Unbounded))
            .take_while(move |(term, _)| term.starts_with(prefix))
    }

    /// Terms that contain `fragment` somewhere after their first char.
    ///
    /// Linear in the vocabulary. Corpora here are hundreds to low thousands of
    /// records, so the vocabulary stays small enough for a straight scan.
    pub fn infix_terms<'a>(
        &'a self,
        fragment: &'a str,
    ) -> impl Iterator<Item = (&'a String, &'a PostingList)> + 'a {
        self.terms
            .iter()
            .filter(move |(term, _)| !term.starts_with(fragment) && term.contains(fragment))
    }

    /// The `n` terms with the highest document frequency (ties: term order).
    pub fn top_terms(&self, n: usize) -> Vec<(&str, usize)> {
        let mut all: Vec<(&str, usize)> = self
            .terms
            .iter()
            .map(|(term, list)| (term.as_str(), list.doc_freq))
            .collect();
        all.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        all.truncate(n);
        all
    }
}

/// Accumulates one record's occurrences before they become postings.
#[derive(Default)]
struct Occurrences {
    positions: Vec<u32>,
    title_count: u32,
    text_count: u32,
}

/// Build the inverted index for a store.
///
/// Deterministic: the same store always yields an identical index. Records
/// are visited in index order and each record's postings are appended in that
/// order, so POSTINGS_BY_RECORD holds without a sort.
pub fn build_inverted_index(store: &RecordStore) -> InvertedIndex {
    let mut terms: BTreeMap<String, PostingList> = BTreeMap::new();
    let mut stats = Vec::with_capacity(store.len());

    for (record_idx, record) in store.iter().enumerate() {
        let mut per_record: HashMap<String, Occurrences> = HashMap::new();
        let title_chars = char_len(&record.title) as u32;
        let mut record_stats = RecordStats {
            title_chars,
            ..RecordStats::default()
        };

        for token in tokenize(&record.title) {
            let occ = per_record.entry(token.term).or_default();
            occ.positions.push(token.offset as u32);
            occ.title_count += 1;
            record_stats.title_tokens += 1;
        }

        let text_base = title_chars + 1;
        for token in tokenize(&record.text) {
            let occ = per_record.entry(token.term).or_default();
            occ.positions.push(text_base + token.offset as u32);
            occ.text_count += 1;
            record_stats.text_tokens += 1;
        }

        for (term, occ) in per_record {
            let list = terms.entry(term).or_insert_with(|| PostingList {
                postings: Vec::new(),
                doc_freq: 0,
            });
            list.postings.push(Posting {
                record: record_idx,
                positions: occ.positions,
                title_count: occ.title_count,
                text_count: occ.text_count,
            });
            list.doc_freq += 1;
        }

        stats.push(record_stats);
    }

    let index = InvertedIndex {
        terms,
        total_records: store.len(),
        stats,
    };

    // INVARIANT: all five, checked in debug builds
    check_index_well_formed(&index);

    debug!(
        records = index.total_records,
        terms = index.term_count(),
        tokens = index.token_count(),
        "built inverted index"
    );

    index
}
