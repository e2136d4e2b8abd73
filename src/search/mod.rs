// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The query engine: from a query string to ranked, paginated results.
//!
//! One call runs the whole pipeline:
//!
//! ```text
//! query ──▶ QueryPlan ──▶ expand ──▶ score candidates ──▶ title-phrase bucket
//!                                                              │
//!             results ◀── snippets ◀── paginate ◀── rank ◀─────┘
//! ```
//!
//! Candidates are OR-selected: any record containing any expanded term. A
//! record whose folded title contains the whole folded query is a candidate
//! too, even when no term reached it (a query like `"urto"` still finds the
//! `kurtosis` title). Those records are lifted above every text-only
//! candidate:
//!
//! ```text
//! score = ceiling + phrase_bonus * (relevance + 1)
//! ```
//!
//! where `ceiling` is the best score among candidates with neither a title
//! match nor the phrase. Since `relevance >= 0` and `phrase_bonus > 0`, an
//! exact title lookup always lands strictly above any text-only hit.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **SCORES_NON_NEGATIVE**: every score is finite and `>= 0`
//! 2. **RANKING_TOTAL**: results sorted by score DESC, record index ASC
//! 3. **PHRASE_DOMINATES_TEXT**: phrase-bucket scores exceed the ceiling
//! 4. **PURE**: searching never mutates the store or the index

pub mod options;
pub mod query;
pub mod snippet;

pub use options::SearchOptions;
pub use query::{check_query, decode_query, expand, MatchKind, QueryPlan, TermMatch};
pub use snippet::extract_snippet;

use crate::config::EngineConfig;
use crate::contracts::check_ranking_sorted;
use crate::error::Result;
use crate::inverted::InvertedIndex;
use crate::scoring::{category_weight, idf, rank, term_frequency, STOP_WORD_WEIGHT};
use crate::store::RecordStore;
use crate::tokenizer::is_stop_word;
use crate::types::SearchResult;
use options::{CategoryFilter, Page};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Read-only view over everything a query needs.
///
/// Borrowed from a `SearchSession`; cheap to construct per call.
#[derive(Debug, Clone, Copy)]
pub struct Searcher<'a> {
    pub store: &'a RecordStore,
    pub index: &'a InvertedIndex,
    /// `normalize(title)` per record, same order as the store.
    pub folded_titles: &'a [String],
    pub config: &'a EngineConfig,
}

/// Accumulated evidence for one record.
#[derive(Debug, Default, Clone, Copy)]
struct Candidate {
    relevance: f64,
    title_hit: bool,
    phrase_hit: bool,
}

/// Output of the scoring half of a search.
struct Prepared<'a> {
    page: Page,
    ranked: Vec<Scored>,
    /// Index term -> the query term that selected it.
    highlights: HashMap<&'a str, String>,
}

/// A ranked candidate before snippets are attached.
#[derive(Debug, Clone, Copy)]
struct Scored {
    record: usize,
    score: f64,
}

impl<'a> Searcher<'a> {
    /// Run a query. See the module docs for the pipeline.
    pub fn execute(&self, query: &str, options: &SearchOptions) -> Result<Vec<SearchResult>> {
        let Some(prepared) = self.prepare(query, options)? else {
            return Ok(Vec::new());
        };

        let highlights: HashMap<&str, &str> = prepared
            .highlights
            .iter()
            .map(|(term, query_term)| (*term, query_term.as_str()))
            .collect();
        let results: Vec<SearchResult> = prepared
            .ranked
            .into_iter()
            .skip(prepared.page.offset)
            .take(prepared.page.limit)
            .filter_map(|scored| self.materialize(scored, &highlights))
            .collect();

        // INVARIANT: RANKING_TOTAL
        check_ranking_sorted(&results);
        Ok(results)
    }

    /// Number of ranked matches before pagination.
    pub fn count(&self, query: &str, options: &SearchOptions) -> Result<usize> {
        Ok(self
            .prepare(query, options)?
            .map_or(0, |prepared| prepared.ranked.len()))
    }

    /// Validate, parse and score. `None` means "no results, not an error".
    fn prepare(&self, query: &str, options: &SearchOptions) -> Result<Option<Prepared<'a>>> {
        query::check_query(query)?;
        let page = options.resolve(self.config.default_limit)?;

        let plan = QueryPlan::parse(query);
        if plan.is_empty() || page.filter == CategoryFilter::Unmatchable {
            return Ok(None);
        }

        let matches = expand(&plan, self.index, self.config);
        let highlights: HashMap<&'a str, String> = matches
            .iter()
            .filter_map(|(term, m)| Some((self.index_key(term)?, m.query_term.to_string())))
            .collect();

        let candidates = self.score(&plan, &matches, &page.filter);
        let ranked = self.finish(candidates);

        debug!(
            query = %query,
            terms = plan.terms.len(),
            expanded = matches.len(),
            candidates = ranked.len(),
            "scored query"
        );

        Ok(Some(Prepared {
            page,
            ranked,
            highlights,
        }))
    }

    /// Re-borrow an index term with the index's lifetime rather than the plan's.
    fn index_key(&self, term: &str) -> Option<&'a str> {
        self.index
            .terms
            .get_key_value(term)
            .map(|(key, _)| key.as_str())
    }

    /// Sum term contributions per record, then mark title-phrase hits.
    fn score(
        &self,
        plan: &QueryPlan,
        matches: &BTreeMap<&str, TermMatch<'_>>,
        filter: &CategoryFilter,
    ) -> BTreeMap<usize, Candidate> {
        let records = self.store.records();
        let total = self.index.total_records;
        let mut candidates: BTreeMap<usize, Candidate> = BTreeMap::new();

        for (term, m) in matches {
            let rarity = idf(total, m.postings.doc_freq);
            let stop_factor = if is_stop_word(term) {
                STOP_WORD_WEIGHT
            } else {
                1.0
            };
            let weight = m.kind.weight() * rarity * stop_factor;

            for posting in &m.postings.postings {
                let Some(record) = records.get(posting.record) else {
                    continue;
                };
                if !filter.allows(record.category) {
                    continue;
                }
                let candidate = candidates.entry(posting.record).or_default();
                candidate.relevance += weight * term_frequency(posting, self.config.title_boost);
                candidate.title_hit |= posting.title_count > 0;
            }
        }

        if !plan.phrase.is_empty() {
            for (idx, title) in self.folded_titles.iter().enumerate() {
                let allowed = records
                    .get(idx)
                    .is_some_and(|record| filter.allows(record.category));
                if allowed && title.contains(plan.phrase.as_str()) {
                    candidates.entry(idx).or_default().phrase_hit = true;
                }
            }
        }

        candidates
    }

    /// Apply category weights and the phrase bucket, then rank.
    fn finish(&self, candidates: BTreeMap<usize, Candidate>) -> Vec<Scored> {
        let records = self.store.records();
        let weighted = |idx: usize, c: &Candidate| {
            let weight = records
                .get(idx)
                .map_or(0.0, |record| category_weight(record.category));
            c.relevance * weight
        };

        // Best score any text-only candidate reached.
        let ceiling = candidates
            .iter()
            .filter(|(_, c)| !c.title_hit && !c.phrase_hit)
            .map(|(idx, c)| weighted(*idx, c))
            .fold(0.0_f64, f64::max);

        let mut ranked: Vec<Scored> = candidates
            .iter()
            .map(|(idx, c)| {
                let base = weighted(*idx, c);
                let score = if c.phrase_hit {
                    // INVARIANT: PHRASE_DOMINATES_TEXT
                    ceiling + self.config.phrase_bonus * (base + 1.0)
                } else {
                    base
                };
                // INVARIANT: SCORES_NON_NEGATIVE
                debug_assert!(score.is_finite() && score >= 0.0);
                Scored { record: *idx, score }
            })
            .collect();

        rank(&mut ranked, |c| (c.score, c.record));
        ranked
    }

    fn materialize(
        &self,
        scored: Scored,
        highlights: &HashMap<&str, &str>,
    ) -> Option<SearchResult> {
        let record = self.store.get(scored.record)?;
        let snippet = extract_snippet(&record.text, highlights, self.config.snippet_window);

        Some(SearchResult {
            record_index: scored.record,
            location: record.location.clone(),
            page: record.page.clone(),
            title: record.title.clone(),
            category: record.category,
            score: scored.score,
            snippet,
        })
    }
}
