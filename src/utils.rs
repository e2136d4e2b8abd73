//! Utility functions for string processing.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Normalize a string for phrase comparison: fold every character and collapse whitespace.
///
/// Used on both sides of the title-phrase check, so `"StatsBase.Kurtosis"`
/// and `"statsbase.kurtosis"` compare equal while punctuation is preserved.
pub fn normalize(value: &str) -> String {
    fold(value)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fold a word into its indexed form: strip diacritics, then lowercase.
///
/// This enables matching between ASCII and accented spellings:
/// - "café" → "cafe"
/// - "naïve" → "naive"
/// - "μold" → "μold" (Greek has no combining marks to strip)
///
/// # Algorithm (with unicode-normalization feature)
///
/// 1. NFD normalize (decompose characters into base + combining marks)
/// 2. Filter out combining marks
/// 3. Lowercase each char on its own
///
/// # Algorithm (without unicode-normalization)
///
/// Per-char lowercase only (assumes input is pre-normalized or ASCII).
///
/// Lowercasing is per char, never `str::to_lowercase`: the latter maps Σ to
/// final ς at word ends, so "ΑΣ" and "ΑΣΒ" would fold to different sigmas.
#[cfg(feature = "unicode-normalization")]
pub fn fold(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Lightweight folding without the unicode-normalization dependency.
#[cfg(not(feature = "unicode-normalization"))]
pub fn fold(value: &str) -> String {
    value.chars().flat_map(char::to_lowercase).collect()
}

/// Check if a character is a combining mark (diacritic).
///
/// Combining marks have Unicode category "Mn" (Mark, Nonspacing).
/// Examples: ́ (acute), ̄ (macron), ̣ (dot below)
pub(crate) fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}

/// Number of chars (Unicode scalar values) in a string.
#[inline]
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Slice a string by char offsets, clamping out-of-range bounds.
///
/// Snippet offsets are char offsets (what a JavaScript client indexes with
/// for BMP text), so slicing by byte would split multi-byte characters.
pub fn char_slice(value: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }
    let mut indices = value.char_indices().map(|(i, _)| i).chain(std::iter::once(value.len()));
    let byte_start = indices.nth(start).unwrap_or(value.len());
    let byte_end = indices.nth(end - start - 1).unwrap_or(value.len());
    &value[byte_start..byte_end]
}
