// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Everything that can go wrong, and where.
//!
//! Errors are local to the call that raised them. A failed `build` never
//! leaves a half-built session behind (there is nothing to leave: the session
//! only exists once the index is complete), and `search` never mutates
//! anything, so no error can poison shared state.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Error kinds surfaced by loading, building, and searching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A record failed validation. `position` is its 0-based index in the input.
    #[error("invalid record at position {position}: {reason}")]
    InvalidRecord { position: usize, reason: String },

    /// The query could not be decoded into searchable text.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Pagination or engine options are out of range.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// The corpus text is not a record array in any accepted shape.
    #[error("unreadable corpus: {0}")]
    Corpus(String),
}

impl SearchError {
    pub(crate) fn invalid_record(position: usize, reason: impl Into<String>) -> Self {
        SearchError::InvalidRecord {
            position,
            reason: reason.into(),
        }
    }
}
