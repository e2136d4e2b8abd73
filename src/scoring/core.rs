// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind relevance.
//!
//! TF-IDF with two structural nudges. Title occurrences count `TITLE_BOOST`
//! times as much as text occurrences, and API-shaped records (functions,
//! methods, types) get a multiplicative edge over prose pages. Rare terms
//! dominate: `idf` of a term that appears in every record is `ln 2`, while a
//! function name that appears once in a 1000-record corpus scores `ln 1001`.
//!
//! # Key Invariant: Ordering of the constants
//!
//! ```text
//! TITLE_BOOST > 1
//! EXACT > PREFIX > INFIX > 0
//! FUNCTION = METHOD = TYPE > MODULE > SECTION > PAGE > OTHER > 0
//! ```
//!
//! These are asserted at compile time in `contracts.rs`.
//!
//! # Constants
//!
//! | Constant             | Value | Role                                          |
//! |----------------------|-------|-----------------------------------------------|
//! | `TITLE_BOOST`        | 3.0   | Weight of a title occurrence vs. a text one   |
//! | `PHRASE_BONUS`       | 2.0   | Multiplier inside the title-phrase bucket     |
//! | `PREFIX_MATCH_WEIGHT`| 0.5   | `kurt` reaching `kurtosis`                    |
//! | `INFIX_MATCH_WEIGHT` | 0.25  | `online_mean` reaching `_online_mean`         |
//! | `STOP_WORD_WEIGHT`   | 0.1   | `of`, `the`: indexed, but barely counted      |

use crate::inverted::Posting;
use crate::types::Category;

// =============================================================================
// SCORING CONSTANTS
// =============================================================================

/// Weight of one title occurrence relative to one text occurrence.
pub const TITLE_BOOST: f64 = 3.0;

/// Multiplier applied to relevance inside the title-phrase bucket.
pub const PHRASE_BONUS: f64 = 2.0;

/// Weight of a query term that equals the indexed term.
pub const EXACT_MATCH_WEIGHT: f64 = 1.0;

/// Weight of a query term that is a proper prefix of the indexed term.
pub const PREFIX_MATCH_WEIGHT: f64 = 0.5;

/// Weight of a query term found inside the indexed term (not at its start).
pub const INFIX_MATCH_WEIGHT: f64 = 0.25;

/// Multiplier for stop-word contributions.
pub const STOP_WORD_WEIGHT: f64 = 0.1;

// =============================================================================
// CATEGORY WEIGHTS
// =============================================================================

/// Functions, methods and types: exact API hits.
pub const FUNCTION_WEIGHT: f64 = 1.5;

/// Modules sit between API items and prose.
pub const MODULE_WEIGHT: f64 = 1.25;

/// Section headings.
pub const SECTION_WEIGHT: f64 = 1.0;

/// Whole pages: mostly prose.
pub const PAGE_WEIGHT: f64 = 0.8;

/// Unknown tags sort last.
pub const OTHER_WEIGHT: f64 = 0.5;

/// Multiplicative boost by record category.
pub fn category_weight(category: Category) -> f64 {
    match category {
        Category::Function | Category::Method | Category::Type => FUNCTION_WEIGHT,
        Category::Module => MODULE_WEIGHT,
        Category::Section => SECTION_WEIGHT,
        Category::Page => PAGE_WEIGHT,
        Category::Other => OTHER_WEIGHT,
    }
}

/// Rarity of a term: `ln(1 + N / df)`.
///
/// Returns 0 for a term no record contains (`df == 0`), which never happens
/// for terms taken from the index but keeps the function total.
pub fn idf(total_records: usize, doc_freq: usize) -> f64 {
    if doc_freq == 0 {
        return 0.0;
    }
    (1.0 + total_records as f64 / doc_freq as f64).ln()
}

/// Weighted term frequency: `text_count + title_boost * title_count`.
pub fn term_frequency(posting: &Posting, title_boost: f64) -> f64 {
    f64::from(posting.text_count) + title_boost * f64::from(posting.title_count)
}
