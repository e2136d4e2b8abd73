// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turning text into terms.
//!
//! A term is a maximal run of word characters, folded (lowercased, diacritics
//! stripped). Word characters are alphanumerics plus `_`, so identifiers like
//! `_online_mean` and `moment_t` survive as single terms: in API docs those
//! are exactly the strings people type into the search box.
//!
//! No stemming, no stop-word removal. Stop words stay in the index and are
//! down-weighted at scoring time instead, so identifier and exact-name
//! queries keep working even when they collide with an English filler word.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **TERM_NON_EMPTY**: every emitted term is non-empty and has no whitespace
//! 2. **OFFSETS_INCREASING**: token offsets are strictly increasing
//! 3. **SAME_FOLDING**: index and query go through this exact function

use crate::utils::{fold, is_combining_mark};
use std::collections::HashSet;
use std::iter::FusedIterator;
use std::str::CharIndices;
use std::sync::LazyLock;

/// English filler words. Kept in the index, scored at a fraction of a real term.
const STOP_WORD_LIST: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "have", "if", "in",
    "into", "is", "it", "its", "of", "on", "or", "so", "such", "than", "that", "the", "then",
    "there", "these", "this", "to", "was", "were", "which", "with",
];

static STOP_WORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORD_LIST.iter().copied().collect());

/// Check if a (folded) term is a stop word.
#[inline]
pub fn is_stop_word(term: &str) -> bool {
    STOP_WORDS.contains(term)
}

/// Is this character part of a word?
///
/// Combining marks count as word characters so that decomposed input
/// (`e` + U+0301) stays one run and folds to the same term as `é`.
#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || is_combining_mark(c)
}

/// One term occurrence in the source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Folded term.
    pub term: String,
    /// Char offset of the run's first character in the original string.
    pub offset: usize,
    /// Length of the run in chars of the original string.
    pub len: usize,
}

impl Token {
    /// Char offset one past the run's last character.
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Lazy token stream over a borrowed string.
///
/// Holds nothing but a cursor, so it is cheap to clone and tokenizing the same
/// string twice always yields the same tokens.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    text: &'a str,
    chars: CharIndices<'a>,
    char_pos: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            // Skip separators
            let (byte_start, offset) = loop {
                let (i, c) = self.chars.next()?;
                let pos = self.char_pos;
                self.char_pos += 1;
                if is_word_char(c) {
                    break (i, pos);
                }
            };

            // Consume the rest of the run
            let mut byte_end = self.text.len();
            let mut len = 1;
            for (i, c) in self.chars.clone() {
                if !is_word_char(c) {
                    byte_end = i;
                    break;
                }
                self.chars.next();
                self.char_pos += 1;
                len += 1;
            }

            // A run of bare combining marks folds to nothing; keep scanning
            let term = fold(&self.text[byte_start..byte_end]);
            if !term.is_empty() {
                return Some(Token { term, offset, len });
            }
        }
    }
}

impl FusedIterator for Tokens<'_> {}

/// Tokenize text into folded terms with their char offsets.
///
/// ```
/// use docsift::tokenize;
///
/// let terms: Vec<_> = tokenize("_online_mean(xnew, μold)")
///     .map(|t| (t.term, t.offset))
///     .collect();
/// assert_eq!(
///     terms,
///     vec![
///         ("_online_mean".to_string(), 0),
///         ("xnew".to_string(), 13),
///         ("μold".to_string(), 19),
///     ]
/// );
/// ```
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens {
        text,
        chars: text.char_indices(),
        char_pos: 0,
    }
}

/// Distinct query terms in first-occurrence order.
pub fn unique_terms(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokenize(text)
        .filter(|token| seen.insert(token.term.clone()))
        .map(|token| token.term)
        .collect()
}
