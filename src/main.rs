// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use docsift::{EngineConfig, SearchOptions, SearchResult, SearchSession};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

mod cli;
use cli::display::*;
use cli::{Cli, Commands, CorpusArgs};

/// Log filter when neither `DOCSIFT_LOG` nor `--verbose` is given.
const DEFAULT_LOG_FILTER: &str = "docsift=warn";

/// Width of wrapped snippet lines inside a result box.
const SNIPPET_WIDTH: usize = 72;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = match cli.command {
        Commands::Search {
            corpus,
            query,
            limit,
            offset,
            categories,
            json,
        } => run_search(&corpus, &query, limit, offset, categories, json),
        Commands::Inspect { corpus, top } => run_inspect(&corpus, top),
        Commands::Batch {
            corpus,
            queries,
            limit,
        } => run_batch(&corpus, &queries, limit),
    };

    if let Err(e) = outcome {
        if use_colors_stderr() {
            eprintln!("{}{}error:{} {}", BOLD, color(Role::Error), RESET, e);
        } else {
            eprintln!("error: {}", e);
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("docsift=debug")
    } else {
        EnvFilter::try_from_env("DOCSIFT_LOG")
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}

// ═══════════════════════════════════════════════════════════════════════════
// LOADING
// ═══════════════════════════════════════════════════════════════════════════

fn load_config(path: Option<&Path>) -> Result<EngineConfig, String> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let source = fs::read_to_string(path)
        .map_err(|e| format!("cannot read config {}: {}", path.display(), e))?;
    EngineConfig::from_json(&source).map_err(|e| format!("{}: {}", path.display(), e))
}

fn load_session(args: &CorpusArgs) -> Result<SearchSession, String> {
    let config = load_config(args.config.as_deref())?;
    let source = fs::read_to_string(&args.corpus)
        .map_err(|e| format!("cannot read corpus {}: {}", args.corpus.display(), e))?;

    let started = Instant::now();
    let session = if args.skip_invalid {
        let (session, skipped) = SearchSession::from_json_lenient(&source, config)
            .map_err(|e| format!("{}: {}", args.corpus.display(), e))?;
        if !skipped.is_empty() {
            warn!(skipped = skipped.len(), "skipped invalid records");
        }
        session
    } else {
        SearchSession::from_json(&source, config).map_err(|e| {
            format!(
                "{}: {} (use --skip-invalid to drop bad records)",
                args.corpus.display(),
                e
            )
        })?
    };

    debug!(
        records = session.len(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "loaded corpus"
    );
    Ok(session)
}

// ═══════════════════════════════════════════════════════════════════════════
// SEARCH
// ═══════════════════════════════════════════════════════════════════════════

fn run_search(
    corpus: &CorpusArgs,
    query: &str,
    limit: Option<i64>,
    offset: Option<i64>,
    categories: Vec<String>,
    json: bool,
) -> Result<(), String> {
    let session = load_session(corpus)?;
    let options = SearchOptions {
        limit,
        offset,
        category_filter: (!categories.is_empty())
            .then(|| categories.into_iter().collect::<BTreeSet<_>>()),
    };

    let results = session.search(query, &options).map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&results).map_err(|e| e.to_string())?;
        println!("{}", out);
        return Ok(());
    }

    let total = session.count(query, &options).map_err(|e| e.to_string())?;
    let first_rank = offset.unwrap_or(0).max(0) as usize + 1;
    print_results(&session, query, total, first_rank, &results);
    Ok(())
}

fn print_results(
    session: &SearchSession,
    query: &str,
    total: usize,
    first_rank: usize,
    results: &[SearchResult],
) {
    let noun = if total == 1 { "result" } else { "results" };
    section_top(&format!("{} {} for \"{}\"", total, noun, truncate(query, 40)));

    if results.is_empty() {
        row(&format!("  {}", paint(Role::Muted, &[], "no matches on this page")));
    }

    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            row("");
        }
        let heading = if result.title.is_empty() {
            &result.location
        } else {
            &result.title
        };
        let left = format!(
            " {} {} {}",
            paint(Role::Muted, &[], &format!("{:>3}", first_rank + i)),
            paint(Role::Heading, &[BOLD], &truncate(heading, 48)),
            category_badge(result.category)
        );
        row(&format!(
            "{}{}",
            pad_right(&left, BOX_WIDTH - 9),
            score_value(result.score)
        ));
        let origin = format!("{} › {}", result.page, result.location);
        row(&format!("     {}", paint(Role::Muted, &[DIM], &truncate(&origin, 70))));

        let text = session
            .store()
            .get(result.record_index)
            .map(|record| record.text.as_str())
            .unwrap_or("");
        if !text.is_empty() {
            for line in wrap(&render_snippet(text, &result.snippet), SNIPPET_WIDTH) {
                row(&format!("     {}", line));
            }
        }
    }

    section_bot();
}

// ═══════════════════════════════════════════════════════════════════════════
// INSPECT
// ═══════════════════════════════════════════════════════════════════════════

fn run_inspect(corpus: &CorpusArgs, top: usize) -> Result<(), String> {
    let session = load_session(corpus)?;
    let store = session.store();
    let index = session.index();

    section_top(&corpus.corpus.display().to_string());
    row(&format!("  records        {}", pad_left(&store.len().to_string(), 10)));
    row(&format!("  distinct terms {}", pad_left(&index.term_count().to_string(), 10)));
    row(&format!("  tokens         {}", pad_left(&index.token_count().to_string(), 10)));

    section_mid("categories");
    for (category, count) in store.category_counts() {
        row(&format!(
            "  {} {}",
            pad_right(&category_badge(category), 14),
            pad_left(&count.to_string(), 10)
        ));
    }

    section_mid(&format!("top {} terms by document frequency", top));
    for (term, doc_freq) in index.top_terms(top) {
        row(&format!(
            "  {} {}",
            pad_right(&paint(Role::TypeName, &[], &truncate(term, 40)), 42),
            pad_left(&doc_freq.to_string(), 8)
        ));
    }
    section_bot();
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// BATCH
// ═══════════════════════════════════════════════════════════════════════════

type Outcome = Result<(usize, Vec<SearchResult>), docsift::SearchError>;

fn run_batch(corpus: &CorpusArgs, queries_path: &Path, limit: i64) -> Result<(), String> {
    let session = load_session(corpus)?;
    let source = fs::read_to_string(queries_path)
        .map_err(|e| format!("cannot read queries {}: {}", queries_path.display(), e))?;
    let queries: Vec<&str> = source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let options = SearchOptions::new().limit(limit);

    let run_one = |query: &&str| -> Outcome {
        let total = session.count(query, &options)?;
        Ok((total, session.search(query, &options)?))
    };

    let started = Instant::now();
    #[cfg(feature = "parallel")]
    let outcomes: Vec<Outcome> = queries.par_iter().map(run_one).collect();
    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<Outcome> = queries.iter().map(run_one).collect();
    let elapsed = started.elapsed();

    let mut failed = 0;
    section_top(&format!("{} queries", queries.len()));
    for (query, outcome) in queries.iter().zip(&outcomes) {
        match outcome {
            Ok((total, results)) => {
                let hits: Vec<&str> = results.iter().map(|r| r.location.as_str()).collect();
                row(&format!(
                    "  {} {} {}",
                    pad_right(&paint(Role::Heading, &[BOLD], &truncate(query, 30)), 32),
                    pad_left(&total.to_string(), 6),
                    truncate(&hits.join(", "), 38)
                ));
            }
            Err(e) => {
                failed += 1;
                row(&format!(
                    "  {} {}",
                    pad_right(&paint(Role::Heading, &[BOLD], &truncate(query, 30)), 32),
                    paint(Role::Error, &[], &truncate(&e.to_string(), 45))
                ));
            }
        }
    }
    section_mid("timing");
    row(&format!(
        "  {:.3} ms total across {} threads",
        elapsed.as_secs_f64() * 1000.0,
        worker_threads()
    ));
    section_bot();

    if failed > 0 {
        return Err(format!("{} of {} queries failed", failed, queries.len()));
    }
    Ok(())
}

#[cfg(feature = "parallel")]
fn worker_threads() -> usize {
    rayon::current_num_threads()
}

#[cfg(not(feature = "parallel"))]
fn worker_threads() -> usize {
    1
}
