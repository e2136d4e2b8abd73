//! Query parsing and term expansion.
//!
//! A query becomes two things: the list of distinct folded terms (tokenized
//! exactly like the index), and the whitespace-collapsed folded phrase used for
//! the title-phrase check. Each query term then expands against the vocabulary
//! into exact, prefix, and infix matches.

use crate::config::EngineConfig;
use crate::error::{Result, SearchError};
use crate::inverted::{InvertedIndex, PostingList};
use crate::scoring::{EXACT_MATCH_WEIGHT, INFIX_MATCH_WEIGHT, PREFIX_MATCH_WEIGHT};
use crate::tokenizer::unique_terms;
use crate::utils::{char_len, normalize};
use std::collections::BTreeMap;

/// A parsed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    /// Distinct folded terms, in first-occurrence order.
    pub terms: Vec<String>,
    /// Folded query with whitespace collapsed, for the title-phrase check.
    pub phrase: String,
}

impl QueryPlan {
    pub fn parse(query: &str) -> Self {
        QueryPlan {
            terms: unique_terms(query),
            phrase: normalize(query),
        }
    }

    /// True when tokenization produced no terms; such a query matches nothing.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Decode raw query bytes, rejecting anything that isn't clean UTF-8.
pub fn decode_query(bytes: &[u8]) -> Result<&str> {
    let query = std::str::from_utf8(bytes).map_err(|e| {
        SearchError::InvalidQuery(format!(
            "not valid UTF-8 (invalid byte at {})",
            e.valid_up_to()
        ))
    })?;
    check_query(query)?;
    Ok(query)
}

/// Reject queries carrying traces of a lossy decode upstream.
///
/// U+FFFD is what a decoder leaves behind when it met bytes it couldn't read;
/// NUL never appears in typed text. Either means the query isn't what the
/// user typed, so no answer would be trustworthy.
pub fn check_query(query: &str) -> Result<()> {
    if query.contains('\u{FFFD}') {
        return Err(SearchError::InvalidQuery(
            "contains U+FFFD replacement characters".to_string(),
        ));
    }
    if query.contains('\0') {
        return Err(SearchError::InvalidQuery("contains NUL".to_string()));
    }
    Ok(())
}

/// How a query term reached an index term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Prefix,
    Infix,
}

impl MatchKind {
    pub fn weight(self) -> f64 {
        match self {
            MatchKind::Exact => EXACT_MATCH_WEIGHT,
            MatchKind::Prefix => PREFIX_MATCH_WEIGHT,
            MatchKind::Infix => INFIX_MATCH_WEIGHT,
        }
    }
}

/// One index term selected by the query.
#[derive(Debug, Clone)]
pub struct TermMatch<'a> {
    /// The query term responsible (the first one, among equally good ones).
    pub query_term: &'a str,
    pub kind: MatchKind,
    pub postings: &'a PostingList,
}

/// Expand query terms against the vocabulary.
///
/// Keyed by index term, so each index term contributes once, under the best
/// match kind any query term achieved. BTreeMap keeps the iteration (and so the
/// floating-point summation order) fixed.
pub fn expand<'a>(
    plan: &'a QueryPlan,
    index: &'a InvertedIndex,
    config: &EngineConfig,
) -> BTreeMap<&'a str, TermMatch<'a>> {
    let mut matches: BTreeMap<&'a str, TermMatch<'a>> = BTreeMap::new();

    let mut offer = |index_term: &'a str,
                     query_term: &'a str,
                     kind: MatchKind,
                     list: &'a PostingList| {
        let better = matches
            .get(index_term)
            .map_or(true, |existing| kind.weight() > existing.kind.weight());
        if better {
            matches.insert(
                index_term,
                TermMatch {
                    query_term,
                    kind,
                    postings: list,
                },
            );
        }
    };

    for query_term in &plan.terms {
        let query_term = query_term.as_str();
        if let Some((term, list)) = index.terms.get_key_value(query_term) {
            offer(term.as_str(), query_term, MatchKind::Exact, list);
        }

        if char_len(query_term) < config.min_expansion_len {
            continue;
        }
        if config.expand_prefixes {
            for (term, list) in index.prefix_terms(query_term) {
                if term != query_term {
                    offer(term.as_str(), query_term, MatchKind::Prefix, list);
                }
            }
        }
        if config.expand_infixes {
            for (term, list) in index.infix_terms(query_term) {
                offer(term.as_str(), query_term, MatchKind::Infix, list);
            }
        }
    }

    matches
}
