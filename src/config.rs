// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime knobs for a search session.
//!
//! The defaults are the scoring constants from `scoring::core`. A JSON file
//! can override any subset (camelCase keys); missing keys keep their default.
//!
//! ```json
//! { "defaultLimit": 10, "snippetWindow": 200, "expandInfixes": false }
//! ```

use crate::error::{Result, SearchError};
use crate::scoring::{PHRASE_BONUS, TITLE_BOOST};
use serde::{Deserialize, Serialize};

/// Default page size when a query doesn't ask for one.
pub const DEFAULT_LIMIT: usize = 20;

/// Default snippet window, in chars.
pub const DEFAULT_SNIPPET_WINDOW: usize = 160;

/// Shortest query term that gets prefix/infix expansion.
pub const DEFAULT_MIN_EXPANSION_LEN: usize = 2;

/// Engine configuration, fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct EngineConfig {
    pub default_limit: usize,
    pub snippet_window: usize,
    pub title_boost: f64,
    pub phrase_bonus: f64,
    pub expand_prefixes: bool,
    pub expand_infixes: bool,
    pub min_expansion_len: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            default_limit: DEFAULT_LIMIT,
            snippet_window: DEFAULT_SNIPPET_WINDOW,
            title_boost: TITLE_BOOST,
            phrase_bonus: PHRASE_BONUS,
            expand_prefixes: true,
            expand_infixes: true,
            min_expansion_len: DEFAULT_MIN_EXPANSION_LEN,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config document and validate it.
    pub fn from_json(source: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(source)
            .map_err(|e| SearchError::InvalidOptions(format!("config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the ranking guarantees.
    pub fn validate(&self) -> Result<()> {
        if !self.title_boost.is_finite() || self.title_boost <= 1.0 {
            return Err(SearchError::InvalidOptions(format!(
                "titleBoost must be > 1, got {}",
                self.title_boost
            )));
        }
        if !self.phrase_bonus.is_finite() || self.phrase_bonus <= 0.0 {
            return Err(SearchError::InvalidOptions(format!(
                "phraseBonus must be a positive number, got {}",
                self.phrase_bonus
            )));
        }
        if self.snippet_window == 0 {
            return Err(SearchError::InvalidOptions(
                "snippetWindow must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
