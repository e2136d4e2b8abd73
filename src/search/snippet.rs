// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Snippet extraction: which slice of the text to show, and what to highlight.
//!
//! The window goes where matches are densest. A sliding window over the
//! sorted match spans finds the run with the most spans that fits in
//! `window` chars; ties go to the earliest run. The window is then padded
//! with context on both sides and nudged off word boundaries so it never
//! starts or ends mid-word.
//!
//! All coordinates are char offsets into the record's `text`. Callers render
//! highlights straight from `MatchSpan`s without tokenizing again.

use crate::contracts::check_snippet_valid;
use crate::tokenizer::{tokenize, Token};
use crate::types::{MatchSpan, Snippet};
use crate::utils::char_len;
use std::collections::HashMap;

/// Build the snippet for one record's text.
///
/// `highlights` maps index terms to the query term that selected them. Text
/// tokens whose term is a key become highlighted spans.
pub fn extract_snippet(text: &str, highlights: &HashMap<&str, &str>, window: usize) -> Snippet {
    let text_chars = char_len(text);
    let tokens: Vec<Token> = tokenize(text).collect();
    let spans: Vec<MatchSpan> = tokens
        .iter()
        .filter_map(|token| {
            highlights.get(token.term.as_str()).map(|query_term| MatchSpan {
                term: (*query_term).to_string(),
                start: token.offset,
                end: token.end(),
            })
        })
        .collect();

    let snippet = if spans.is_empty() {
        let end = snap_end(&tokens, 0, window.min(text_chars));
        Snippet {
            start: 0,
            end,
            matches: Vec::new(),
        }
    } else {
        let (first, last) = densest_run(&spans, window);
        let (start, end) = place_window(
            &tokens,
            spans[first].start,
            spans[last].end,
            window,
            text_chars,
        );
        let matches = spans
            .into_iter()
            .filter(|span| span.start >= start && span.end <= end)
            .collect();
        Snippet {
            start,
            end,
            matches,
        }
    };

    check_snippet_valid(&snippet, text_chars);
    snippet
}

/// Find the run of spans `first..=last` with the most spans fitting in `window`.
///
/// Spans are in text order (tokenizer order). Strict `>` keeps the earliest
/// run on ties. A single span longer than the window is still a run of one.
fn densest_run(spans: &[MatchSpan], window: usize) -> (usize, usize) {
    let mut left = 0;
    let mut best = (0, 0);
    let mut best_count = 0;

    for right in 0..spans.len() {
        while left < right && spans[right].end - spans[left].start > window {
            left += 1;
        }
        let count = right - left + 1;
        if count > best_count {
            best_count = count;
            best = (left, right);
        }
    }

    best
}

/// Center the cluster `cluster_start..cluster_end` in a window of `window` chars.
fn place_window(
    tokens: &[Token],
    cluster_start: usize,
    cluster_end: usize,
    window: usize,
    text_chars: usize,
) -> (usize, usize) {
    let cluster_len = cluster_end - cluster_start;
    if cluster_len >= window {
        return (cluster_start, cluster_end);
    }

    // Split the spare room around the cluster, then slide back if the text
    // runs out on the right.
    let slack = window - cluster_len;
    let mut start = cluster_start - (slack / 2).min(cluster_start);
    let mut end = (start + window).min(text_chars);
    if end - start < window {
        start = end.saturating_sub(window);
    }

    start = snap_start(tokens, start, cluster_start);
    end = snap_end(tokens, cluster_end.max(start), end);
    (start, end)
}

/// Move `start` forward past a word it would cut, never beyond `limit`.
fn snap_start(tokens: &[Token], start: usize, limit: usize) -> usize {
    match tokens
        .iter()
        .find(|t| t.offset < start && start < t.end())
    {
        Some(token) => token.end().min(limit),
        None => start,
    }
}

/// Move `end` back before a word it would cut, never below `floor`.
fn snap_end(tokens: &[Token], floor: usize, end: usize) -> usize {
    match tokens.iter().find(|t| t.offset < end && end < t.end()) {
        Some(token) if token.offset > floor => token.offset,
        Some(_) => end,
        None => end,
    }
}
