// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the docsift command-line interface.
//!
//! Three subcommands: `search` to query a corpus, `inspect` to summarize one,
//! and `batch` to run a file of queries against a single shared session.
//! Every corpus argument accepts the generated `search_index.js` artifact as
//! well as plain JSON.

pub mod display;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "docsift",
    about = "Full-text search over generated documentation indexes",
    version
)]
pub struct Cli {
    /// Log at debug level (overrides DOCSIFT_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every command that loads a corpus.
#[derive(clap::Args, Debug, Clone)]
pub struct CorpusArgs {
    /// Corpus file: a JSON record array, {"docs": [...]}, or search_index.js
    pub corpus: PathBuf,

    /// Skip malformed records instead of failing
    ///
    /// Generated indexes usually carry page-root records with an empty
    /// location; strict loading rejects them.
    #[arg(long)]
    pub skip_invalid: bool,

    /// Engine configuration (JSON, camelCase keys)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search a corpus and display ranked results
    Search {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// Search query
        query: String,

        /// Maximum number of results to return
        #[arg(short, long, allow_negative_numbers = true)]
        limit: Option<i64>,

        /// Number of ranked results to skip
        #[arg(short, long, allow_negative_numbers = true)]
        offset: Option<i64>,

        /// Only return records of this category (repeatable)
        #[arg(short, long = "category", value_name = "CATEGORY")]
        categories: Vec<String>,

        /// Print results as JSON instead of boxes
        #[arg(long)]
        json: bool,
    },

    /// Summarize a corpus: categories, vocabulary, most common terms
    Inspect {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// How many top terms to list
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Run one query per line of a file, in parallel
    Batch {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// File with one query per line (blank lines are skipped)
        queries: PathBuf,

        /// Maximum number of results per query
        #[arg(short, long, default_value = "3")]
        limit: i64,
    },
}
