//! Developer tasks for docsift, run as `cargo xtask <task>`.
//!
//!   verify    markers, constant ordering, tests (both feature sets), clippy, CLI smoke
//!   test      cargo test
//!   check     cargo check + test + clippy
//!   smoke     query the bundled fixture through the release binary
//!   bench     criterion benchmarks

use anyhow::{bail, ensure, Context, Result};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Generated index shipped with the repo for tests and smoke runs.
const FIXTURE: &str = "data/fixtures/search_index.js";

/// Fewer markers than this means somebody deleted invariant comments.
const MIN_INVARIANT_MARKERS: usize = 5;

type Step = (&'static str, fn(&Path) -> Result<()>);

fn main() -> Result<()> {
    let root = workspace_root()?;
    let steps: &[Step] = match env::args().nth(1).as_deref() {
        Some("verify") => &[
            ("invariant markers", check_invariant_markers),
            ("scoring constant ordering", verify_constants),
            ("tests", |root| cargo(root, &["test", "--quiet"])),
            ("tests without default features", |root| {
                cargo(root, &["test", "--quiet", "--no-default-features"])
            }),
            ("clippy", clippy),
            ("CLI smoke queries", smoke),
        ],
        Some("test") => &[("tests", |root| cargo(root, &["test"]))],
        Some("check") => &[
            ("cargo check", |root| cargo(root, &["check", "--all-targets"])),
            ("tests", |root| cargo(root, &["test", "--quiet"])),
            ("clippy", clippy),
        ],
        Some("smoke") => &[("CLI smoke queries", smoke)],
        Some("bench") => &[("benchmarks", |root| cargo(root, &["bench"]))],
        _ => {
            print_help();
            return Ok(());
        }
    };

    for (i, (name, step)) in steps.iter().enumerate() {
        println!("[{}/{}] {}...", i + 1, steps.len(), name);
        step(&root).with_context(|| format!("step failed: {}", name))?;
        println!("✓ {}\n", name);
    }
    println!("✓ all {} steps passed", steps.len());
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify    Markers, constant ordering, tests, clippy, CLI smoke
  test      Run all Rust tests
  check     cargo check + test + clippy
  smoke     Run a few queries against {FIXTURE}
  bench     Run benchmarks
"#
    );
}

// ============================================================================
// STEPS
// ============================================================================

fn clippy(root: &Path) -> Result<()> {
    cargo(root, &["clippy", "--quiet", "--all-targets", "--", "-D", "warnings"])
}

/// Query the fixture through the release binary and check the top hit.
fn smoke(root: &Path) -> Result<()> {
    let cases = [
        ("kurtosis", "#StatsBase.kurtosis"),
        ("skewness", "#StatsBase.skewness-Tuple{GaussianHistogram}"),
        ("_online_mean", "#UncertainHistogramming._online_mean-Tuple{Any, Any, Any}"),
    ];

    for (query, expected) in cases {
        let stdout = cargo_stdout(
            root,
            &[
                "run", "--quiet", "--release", "--", "search", FIXTURE, query,
                "--skip-invalid", "--json", "--limit", "1",
            ],
        )?;
        let top = first_location(&stdout)
            .with_context(|| format!("no results for {:?}", query))?;
        ensure!(
            top == expected,
            "query {:?}: expected {} on top, got {}",
            query,
            expected,
            top
        );
        println!("  {:<14} -> {}", query, top);
    }
    Ok(())
}

/// Count `INVARIANT:` comments under src/.
fn check_invariant_markers(root: &Path) -> Result<()> {
    let mut count = 0;
    let mut pending = vec![root.join("src")];
    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir).with_context(|| format!("reading {}", dir.display()))? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                let source = std::fs::read_to_string(&path)?;
                count += source.lines().filter(|l| l.contains("INVARIANT:")).count();
            }
        }
    }

    ensure!(
        count >= MIN_INVARIANT_MARKERS,
        "expected at least {} INVARIANT markers under src/, found {}",
        MIN_INVARIANT_MARKERS,
        count
    );
    println!("  {} markers", count);
    Ok(())
}

/// Check the orderings the ranking relies on, read straight from the source.
fn verify_constants(root: &Path) -> Result<()> {
    let source = std::fs::read_to_string(root.join("src/scoring/core.rs"))
        .context("reading src/scoring/core.rs")?;
    let constants = extract_constants(&source);

    let get = |name: &str| -> Result<f64> {
        constants
            .get(name)
            .copied()
            .with_context(|| format!("constant {} not found in scoring/core.rs", name))
    };

    let descending = |names: &[&str]| -> Result<()> {
        let values = names.iter().map(|n| get(n)).collect::<Result<Vec<_>>>()?;
        for (pair, vals) in names.windows(2).zip(values.windows(2)) {
            ensure!(
                vals[0] > vals[1],
                "{}={} must exceed {}={}",
                pair[0],
                vals[0],
                pair[1],
                vals[1]
            );
        }
        Ok(())
    };

    descending(&["EXACT_MATCH_WEIGHT", "PREFIX_MATCH_WEIGHT", "INFIX_MATCH_WEIGHT"])?;
    descending(&[
        "FUNCTION_WEIGHT",
        "MODULE_WEIGHT",
        "SECTION_WEIGHT",
        "PAGE_WEIGHT",
        "OTHER_WEIGHT",
    ])?;
    ensure!(get("TITLE_BOOST")? > 1.0, "TITLE_BOOST must exceed 1");
    ensure!(get("PHRASE_BONUS")? > 0.0, "PHRASE_BONUS must be positive");
    ensure!(
        get("STOP_WORD_WEIGHT")? < get("INFIX_MATCH_WEIGHT")?,
        "STOP_WORD_WEIGHT must stay below INFIX_MATCH_WEIGHT"
    );
    Ok(())
}

/// Collect `pub const NAME: f64 = value;` lines.
fn extract_constants(source: &str) -> HashMap<String, f64> {
    source
        .lines()
        .filter_map(|line| line.trim().strip_prefix("pub const "))
        .filter_map(|rest| {
            let (name, rest) = rest.split_once(": f64 =")?;
            let value = rest.trim().trim_end_matches(';').trim().parse().ok()?;
            Some((name.trim().to_string(), value))
        })
        .collect()
}

// ============================================================================
// HELPERS
// ============================================================================

/// The directory above xtask/.
fn workspace_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => return env::current_dir().context("reading current directory"),
    };
    Ok(manifest_dir
        .parent()
        .map_or_else(|| manifest_dir.clone(), Path::to_path_buf))
}

fn cargo(root: &Path, args: &[&str]) -> Result<()> {
    let status = Command::new("cargo")
        .args(args)
        .current_dir(root)
        .status()
        .with_context(|| format!("spawning cargo {}", args.join(" ")))?;
    if !status.success() {
        bail!("cargo {} exited with {}", args.join(" "), status);
    }
    Ok(())
}

fn cargo_stdout(root: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("cargo")
        .args(args)
        .current_dir(root)
        .env("NO_COLOR", "1")
        .output()
        .with_context(|| format!("spawning cargo {}", args.join(" ")))?;
    if !output.status.success() {
        bail!(
            "cargo {} failed:\n{}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// First `"location": "..."` value in the CLI's pretty JSON output.
fn first_location(json: &str) -> Option<&str> {
    let rest = json.split("\"location\": \"").nth(1)?;
    rest.split('"').next()
}
