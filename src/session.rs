// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search session: one corpus, one index, many queries.
//!
//! A session is built once and never changes. Construction validates the
//! records, builds the inverted index and folds every title for the phrase
//! check; only a fully built session is ever returned. After that every
//! method takes `&self`, so a session can sit behind an `Arc` (or a plain
//! shared reference) and serve concurrent searches without locking.
//!
//! Independent sessions don't share anything, so several corpora (say, two
//! versions of the same docs) can be loaded side by side.

use crate::config::EngineConfig;
use crate::error::{Result, SearchError};
use crate::inverted::{build_inverted_index, InvertedIndex};
use crate::search::{decode_query, SearchOptions, Searcher};
use crate::store::RecordStore;
use crate::types::{RawRecord, SearchResult};
use crate::utils::normalize;
use tracing::debug;

/// An immutable, searchable corpus.
#[derive(Debug, Clone)]
pub struct SearchSession {
    store: RecordStore,
    index: InvertedIndex,
    folded_titles: Vec<String>,
    config: EngineConfig,
}

// Shared across threads by the batch runner.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SearchSession>();
};

impl SearchSession {
    /// Validate `records` and build a session with the default config.
    ///
    /// Fails with `InvalidRecord` (carrying the record's position) on the first
    /// record with an empty location or a non-string category. An empty
    /// sequence is fine: every search on it returns no results.
    pub fn build<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        Self::build_with_config(records, EngineConfig::default())
    }

    pub fn build_with_config<I>(records: I, config: EngineConfig) -> Result<Self>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        config.validate()?;
        let store = RecordStore::load(records)?;
        Ok(Self::assemble(store, config))
    }

    /// Build from an already validated store.
    pub fn from_store(store: RecordStore, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(store, config))
    }

    /// Parse a corpus document (see `parse_corpus` for the accepted shapes)
    /// and build a session from it.
    pub fn from_json(source: &str, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let store = RecordStore::from_json(source)?;
        Ok(Self::assemble(store, config))
    }

    /// Like `from_json`, but invalid records are skipped and returned.
    pub fn from_json_lenient(
        source: &str,
        config: EngineConfig,
    ) -> Result<(Self, Vec<SearchError>)> {
        config.validate()?;
        let (store, skipped) = RecordStore::from_json_lenient(source)?;
        Ok((Self::assemble(store, config), skipped))
    }

    fn assemble(store: RecordStore, config: EngineConfig) -> Self {
        let index = build_inverted_index(&store);
        let folded_titles = store.iter().map(|record| normalize(&record.title)).collect();
        debug!(records = store.len(), "search session ready");
        SearchSession {
            store,
            index,
            folded_titles,
            config,
        }
    }

    fn searcher(&self) -> Searcher<'_> {
        Searcher {
            store: &self.store,
            index: &self.index,
            folded_titles: &self.folded_titles,
            config: &self.config,
        }
    }

    /// Ranked, paginated results for `query`.
    ///
    /// A query with no terms yields `Ok(vec![])`. Fails with `InvalidQuery`
    /// for queries carrying decode damage and `InvalidOptions` for a negative
    /// limit or offset.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Result<Vec<SearchResult>> {
        self.searcher().execute(query, options)
    }

    /// `search` over raw bytes, for callers that receive the query undecoded.
    pub fn search_bytes(&self, query: &[u8], options: &SearchOptions) -> Result<Vec<SearchResult>> {
        self.search(decode_query(query)?, options)
    }

    /// Total ranked matches for `query`, ignoring `limit` and `offset`.
    pub fn count(&self, query: &str, options: &SearchOptions) -> Result<usize> {
        self.searcher().count(query, options)
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
