// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The record store: validated documentation records in input order.
//!
//! Input order is identity. Record `i` is the `i`-th record that survived
//! loading, and that index is the final tie-breaker everywhere results are
//! ordered. Nothing here is mutable after `load` returns.
//!
//! # Accepted corpus shapes
//!
//! ```text
//! [ {record}, ... ]                                  bare array
//! { "docs": [ {record}, ... ] }                      wrapped
//! var documenterSearchIndex = {"docs": [ ... ]};    generated JS artifact
//! ```

use crate::error::{Result, SearchError};
use crate::types::{Category, DocumentRecord, RawCategory, RawRecord};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// Validated, ordered, immutable records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<DocumentRecord>,
}

impl RecordStore {
    /// Validate and store records, failing on the first invalid one.
    ///
    /// Rejects records with a missing or empty `location`, and records whose
    /// `category` is present but not a string. Unknown category strings are
    /// mapped to `Category::Other` with a warning.
    pub fn load<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let records = records
            .into_iter()
            .enumerate()
            .map(|(position, raw)| validate(position, raw))
            .collect::<Result<Vec<_>>>()?;
        Ok(RecordStore { records })
    }

    /// Like `load`, but skips invalid records and reports them.
    ///
    /// Positions in the returned errors refer to the input sequence, not to
    /// the (shorter) store.
    pub fn load_lenient<I>(records: I) -> (Self, Vec<SearchError>)
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut kept = Vec::new();
        let mut skipped = Vec::new();
        for (position, raw) in records.into_iter().enumerate() {
            match validate(position, raw) {
                Ok(record) => kept.push(record),
                Err(e) => {
                    warn!(error = %e, "skipping record");
                    skipped.push(e);
                }
            }
        }
        (RecordStore { records: kept }, skipped)
    }

    /// Parse a corpus document and load it strictly.
    pub fn from_json(source: &str) -> Result<Self> {
        RecordStore::load(parse_corpus(source)?)
    }

    /// Parse a corpus document and load it, skipping malformed records.
    ///
    /// Only a corpus that cannot be parsed at all is an error.
    pub fn from_json_lenient(source: &str) -> Result<(Self, Vec<SearchError>)> {
        let mut skipped = Vec::new();
        let mut raws = Vec::new();
        for (position, entry) in corpus_entries(source)?.into_iter().enumerate() {
            match raw_from_value(position, entry) {
                Ok(raw) => raws.push((position, raw)),
                Err(e) => {
                    warn!(error = %e, "skipping record");
                    skipped.push(e);
                }
            }
        }

        let mut records = Vec::with_capacity(raws.len());
        for (position, raw) in raws {
            match validate(position, raw) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(error = %e, "skipping record");
                    skipped.push(e);
                }
            }
        }
        skipped.sort_by_key(|e| match e {
            SearchError::InvalidRecord { position, .. } => *position,
            _ => usize::MAX,
        });
        Ok((RecordStore { records }, skipped))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DocumentRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[DocumentRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DocumentRecord> {
        self.records.iter()
    }

    /// Number of records per category, in category declaration order.
    /// Categories with no records are omitted.
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.category).or_insert(0) += 1;
        }
        counts
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a DocumentRecord;
    type IntoIter = std::slice::Iter<'a, DocumentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Validate one raw record.
fn validate(position: usize, raw: RawRecord) -> Result<DocumentRecord> {
    let location = match raw.location {
        Some(location) if !location.is_empty() => location,
        Some(_) => return Err(SearchError::invalid_record(position, "empty location")),
        None => return Err(SearchError::invalid_record(position, "missing location")),
    };

    let category = match raw.category {
        None => Category::Other,
        Some(RawCategory::Tag(tag)) => Category::from_tag(&tag).unwrap_or_else(|| {
            warn!(position, tag = %tag, "unrecognized category, treating as other");
            Category::Other
        }),
        Some(RawCategory::Malformed(value)) => {
            return Err(SearchError::invalid_record(
                position,
                format!("category must be a string, got {}", json_kind(&value)),
            ));
        }
    };

    Ok(DocumentRecord {
        location,
        page: raw.page.unwrap_or_default(),
        title: raw.title.unwrap_or_default(),
        text: raw.text.unwrap_or_default(),
        category,
    })
}

// =============================================================================
// CORPUS PARSING
// =============================================================================

/// Parse corpus text into raw records, in any accepted shape.
///
/// A record that is not an object, or whose string fields hold other JSON
/// types, fails with `InvalidRecord` carrying its position.
pub fn parse_corpus(source: &str) -> Result<Vec<RawRecord>> {
    corpus_entries(source)?
        .into_iter()
        .enumerate()
        .map(|(position, entry)| raw_from_value(position, entry))
        .collect()
}

/// Pull the record array out of whichever wrapper it came in.
fn corpus_entries(source: &str) -> Result<Vec<Value>> {
    let json = strip_js_assignment(source);
    let value: Value =
        serde_json::from_str(json).map_err(|e| SearchError::Corpus(e.to_string()))?;

    match value {
        Value::Array(entries) => Ok(entries),
        Value::Object(mut map) => match map.remove("docs") {
            Some(Value::Array(entries)) => Ok(entries),
            Some(other) => Err(SearchError::Corpus(format!(
                "\"docs\" must be an array, got {}",
                json_kind(&other)
            ))),
            None => Err(SearchError::Corpus(
                "expected a record array or an object with a \"docs\" array".to_string(),
            )),
        },
        other => Err(SearchError::Corpus(format!(
            "expected a record array, got {}",
            json_kind(&other)
        ))),
    }
}

/// Strip a byte-order mark and `var name = ...;` so the generated JS file
/// parses as JSON.
fn strip_js_assignment(source: &str) -> &str {
    let trimmed = source.trim_start_matches('\u{feff}').trim();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        return trimmed;
    }
    match trimmed.split_once('=') {
        Some((_, rhs)) => rhs.trim().trim_end_matches(';').trim_end(),
        None => trimmed,
    }
}

fn raw_from_value(position: usize, entry: Value) -> Result<RawRecord> {
    if !entry.is_object() {
        return Err(SearchError::invalid_record(
            position,
            format!("expected an object, got {}", json_kind(&entry)),
        ));
    }
    serde_json::from_value(entry).map_err(|e| SearchError::invalid_record(position, e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
