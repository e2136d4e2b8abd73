// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The records going in and the results coming out.
//!
//! Generated documentation indexes are a flat list of loosely typed objects.
//! `RawRecord` mirrors that wire shape as-is; `DocumentRecord` is what survives
//! validation, with the category closed into an enum. Results are plain owned
//! values: nothing in a `SearchResult` points back into the session.
//!
//! # Invariants
//!
//! - **DocumentRecord**: `!location.is_empty()`. Title and text may be empty.
//! - **Snippet**: `start <= end`, and every match span lies inside `start..end`.
//! - **MatchSpan**: `start < end` (a highlighted token is never empty).

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// CATEGORY
// =============================================================================

/// What kind of documentation entry a record is.
///
/// The closed set of tags a documentation generator emits, plus `Other` for
/// anything it might invent later. `Other` is the lowest priority in scoring,
/// so unknown tags degrade gracefully instead of leaking untyped strings.
///
/// **Gotcha**: the derived `Ord` is declaration order, which is only used for
/// deterministic iteration (e.g. `category_counts`). Scoring priority lives in
/// `scoring::category_weight`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Page,
    Section,
    Method,
    Function,
    Type,
    Module,
    Other,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 7] = [
        Category::Page,
        Category::Section,
        Category::Method,
        Category::Function,
        Category::Type,
        Category::Module,
        Category::Other,
    ];

    /// Resolve a wire tag. Returns `None` for tags outside the known set.
    ///
    /// Matching ignores ASCII case and surrounding whitespace, so `" Function"`
    /// resolves the same as `"function"`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(tag))
    }

    /// Lowercase wire representation, matching the serde encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Page => "page",
            Category::Section => "section",
            Category::Method => "method",
            Category::Function => "function",
            Category::Type => "type",
            Category::Module => "module",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// A category value exactly as it appeared on the wire.
///
/// Strings are tags (known or not). Anything else is malformed and rejects the
/// record. `null` never reaches this type: `Option` swallows it as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCategory {
    Tag(String),
    Malformed(serde_json::Value),
}

/// One entry of the generated index, before validation.
///
/// Every field is optional here so that a missing field produces a precise
/// `InvalidRecord` (with the record's position) rather than a serde error
/// for the whole array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub category: Option<RawCategory>,
}

impl RawRecord {
    /// Convenience constructor for the common all-strings case.
    pub fn new(location: &str, page: &str, title: &str, text: &str, category: &str) -> Self {
        RawRecord {
            location: Some(location.to_string()),
            page: Some(page.to_string()),
            title: Some(title.to_string()),
            text: Some(text.to_string()),
            category: Some(RawCategory::Tag(category.to_string())),
        }
    }
}

/// A validated documentation record.
///
/// Records are identified by their position in the store, not by `location`:
/// the same anchor can legitimately appear several times (once per page
/// section that mentions it), and each occurrence is its own search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub location: String,
    pub page: String,
    pub title: String,
    pub text: String,
    pub category: Category,
}

// =============================================================================
// RESULTS
// =============================================================================

/// A highlighted token inside a snippet.
///
/// `term` is the query term that caused the highlight, which may be shorter
/// than the highlighted word when it matched as a prefix or infix.
/// Offsets are char offsets into the record's `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSpan {
    pub term: String,
    pub start: usize,
    pub end: usize,
}

/// A window of the record's `text` worth showing, with highlights.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub start: usize,
    pub end: usize,
    pub matches: Vec<MatchSpan>,
}

impl Snippet {
    /// Slice the snippet window out of `text` (char offsets, UTF-8 safe).
    pub fn excerpt<'a>(&self, text: &'a str) -> &'a str {
        crate::utils::char_slice(text, self.start, self.end)
    }
}

/// A ranked hit. Serializes to the shape clients render:
/// `{ location, page, title, category, score, snippet }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Position of the record in the store; the tie-break key for ranking.
    #[serde(skip)]
    pub record_index: usize,
    pub location: String,
    pub page: String,
    pub title: String,
    pub category: Category,
    pub score: f64,
    pub snippet: Snippet,
}
