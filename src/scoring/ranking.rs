// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how search results get sorted.
//!
//! Score descending, then record index ascending. The second key makes the
//! order total, so the same corpus and query always produce the same list,
//! byte for byte, which is what lets tests assert exact orderings.

use crate::types::SearchResult;
use std::cmp::Ordering;

/// Compare two search results for ranking.
///
/// Sort order:
/// 1. **Score** - higher wins (`f64::total_cmp`, so even a stray NaN can't
///    break the sort's transitivity)
/// 2. **Record index** - lower wins; the input order of the corpus
///
/// # Example
///
/// ```ignore
/// let a = SearchResult { score: 2.0, record_index: 5, .. };
/// let b = SearchResult { score: 2.0, record_index: 1, .. };
/// assert_eq!(compare_results(&b, &a), Ordering::Less);
/// ```
pub fn compare_results(a: &SearchResult, b: &SearchResult) -> Ordering {
    compare_keys((a.score, a.record_index), (b.score, b.record_index))
}

/// The same order on bare `(score, record_index)` keys, for ranking
/// candidates before they are turned into results.
#[inline]
pub fn compare_keys(a: (f64, usize), b: (f64, usize)) -> Ordering {
    b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1))
}

/// Sort anything carrying a `(score, record_index)` key into ranking order.
pub fn rank<T>(items: &mut [T], key: impl Fn(&T) -> (f64, usize)) {
    items.sort_by(|a, b| compare_keys(key(a), key(b)));
}
