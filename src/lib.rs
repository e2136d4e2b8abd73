//! Full-text search over generated documentation indexes.
//!
//! Documentation generators emit a flat list of records (location, page,
//! title, text, category) for a client-side search box. This crate loads such
//! a list once, builds an inverted index, and answers free-text queries with
//! ranked, paginated results and highlight-ready snippets.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  store.rs   │────▶│ tokenizer.rs │────▶│ inverted.rs  │────▶│  search/    │
//! │ (validate,  │     │ (fold, char  │     │ (postings,   │     │ (expand,    │
//! │  normalize) │     │  offsets)    │     │  stats)      │     │  score,     │
//! └─────────────┘     └──────────────┘     └──────────────┘     │  snippets)  │
//!        │                                        │             └─────────────┘
//!        ▼                                        ▼                    │
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │                              session.rs                                  │
//! │   SearchSession: built once, immutable, shared by concurrent searches    │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Module      | Role                                       | Key Properties            |
//! |-------------|--------------------------------------------|---------------------------|
//! | `types`     | Records, categories, results               | Closed category set       |
//! | `store`     | Validation and corpus parsing              | Input order is identity   |
//! | `tokenizer` | Word runs, folding, char offsets           | Restartable, pure         |
//! | `inverted`  | Term → postings                            | Sorted, deterministic     |
//! | `scoring`   | TF-IDF, category weights, comparator       | Total order               |
//! | `search`    | Query engine                               | Title phrase dominates    |
//! | `contracts` | Debug-mode invariant checks                | Zero cost in release      |
//!
//! # Usage
//!
//! ```
//! use docsift::{RawRecord, SearchOptions, SearchSession};
//!
//! let session = SearchSession::build(vec![
//!     RawRecord::new("#f1", "Home", "kurtosis", "Pearson excess kurtosis of a histogram.", "function"),
//!     RawRecord::new("#f2", "Home", "skewness", "Fisher's skewness of a histogram.", "function"),
//! ])?;
//!
//! let results = session.search("histogram", &SearchOptions::new().limit(10))?;
//! assert_eq!(results.len(), 2);
//! # Ok::<(), docsift::SearchError>(())
//! ```

// Module declarations
pub mod config;
pub mod contracts;
mod error;
pub mod inverted;
pub mod scoring;
pub mod search;
mod session;
pub mod store;
pub mod tokenizer;
mod types;
pub mod utils;

#[doc(hidden)]
pub mod testing;

// Re-exports for public API
pub use config::EngineConfig;
pub use error::{Result, SearchError};
pub use inverted::{build_inverted_index, InvertedIndex, Posting, PostingList, RecordStats};
pub use scoring::{category_weight, compare_results, idf};
pub use search::{extract_snippet, QueryPlan, SearchOptions, Searcher};
pub use session::SearchSession;
pub use store::{parse_corpus, RecordStore};
pub use tokenizer::{is_stop_word, tokenize, Token, Tokens};
pub use types::{Category, DocumentRecord, MatchSpan, RawCategory, RawRecord, SearchResult, Snippet};
pub use utils::{fold, normalize};
