//! Per-query options: pagination and category filtering.
//!
//! Options arrive from JSON or a CLI, where a negative number is a real
//! possibility, so `limit` and `offset` are signed here and validated once,
//! up front, into a `Page`.

use crate::error::{Result, SearchError};
use crate::types::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

/// Options for a single `search` call. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchOptions {
    /// Maximum results to return. Defaults to the session's `default_limit`.
    pub limit: Option<i64>,
    /// Results to skip before the first returned one.
    pub offset: Option<i64>,
    /// Category tags to keep. Unknown tags are ignored; if none is known,
    /// the search matches nothing. An empty set means no filtering.
    pub category_filter: Option<BTreeSet<String>>,
}

impl SearchOptions {
    pub fn new() -> Self {
        SearchOptions::default()
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn categories<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category_filter = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Validate into a resolved page. Fails on negative `limit` or `offset`.
    pub(crate) fn resolve(&self, default_limit: usize) -> Result<Page> {
        let limit = match self.limit {
            Some(limit) => non_negative("limit", limit)?,
            None => default_limit,
        };
        let offset = match self.offset {
            Some(offset) => non_negative("offset", offset)?,
            None => 0,
        };
        Ok(Page {
            limit,
            offset,
            filter: CategoryFilter::resolve(self.category_filter.as_ref()),
        })
    }
}

fn non_negative(name: &str, value: i64) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| SearchError::InvalidOptions(format!("{} must be >= 0, got {}", name, value)))
}

/// Validated pagination and filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Page {
    pub limit: usize,
    pub offset: usize,
    pub filter: CategoryFilter,
}

/// A resolved category filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CategoryFilter {
    /// No filtering.
    Any,
    /// Keep only these categories.
    Only(BTreeSet<Category>),
    /// The filter named no known category; nothing can match.
    Unmatchable,
}

impl CategoryFilter {
    fn resolve(tags: Option<&BTreeSet<String>>) -> Self {
        let tags = match tags {
            Some(tags) if !tags.is_empty() => tags,
            _ => return CategoryFilter::Any,
        };

        let mut known = BTreeSet::new();
        for tag in tags {
            match Category::from_tag(tag) {
                Some(category) => {
                    known.insert(category);
                }
                None => warn!(tag = %tag, "category filter names an unknown category"),
            }
        }

        if known.is_empty() {
            warn!(?tags, "category filter matches no known category; no results");
            CategoryFilter::Unmatchable
        } else {
            CategoryFilter::Only(known)
        }
    }

    #[inline]
    pub fn allows(&self, category: Category) -> bool {
        match self {
            CategoryFilter::Any => true,
            CategoryFilter::Only(categories) => categories.contains(&category),
            CategoryFilter::Unmatchable => false,
        }
    }
}
