// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal output for the docsift CLI: boxed sections, category badges,
//! highlighted snippets.
//!
//! Colors are picked by role (a category badge, a muted origin line, a
//! highlighted match) from one of two true-color palettes, OneDark for dark
//! backgrounds and One Light for light ones. The palette comes from
//! `DOCSIFT_THEME` ("dark" or "light"), else from the `COLORFGBG` background
//! hint, else dark.
//!
//! With `NO_COLOR` set or stdout not a TTY everything renders as plain text,
//! and highlights become brackets: `of a [histogram].`

use docsift::utils::char_slice;
use docsift::{Category, MatchSpan, Snippet};
use std::sync::OnceLock;

/// Inner width of every box, between the `│` borders.
pub const BOX_WIDTH: usize = 80;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

/// A 24-bit foreground color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(u8, u8, u8);

impl Rgb {
    fn escape(self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.0, self.1, self.2)
    }
}

/// What a piece of text is, as far as coloring goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Error,
    Api,
    TypeName,
    Module,
    Heading,
    Accent,
    Muted,
    Hot,
    Highlight,
}

#[derive(Debug)]
struct Palette {
    error: Rgb,
    api: Rgb,
    type_name: Rgb,
    module: Rgb,
    heading: Rgb,
    accent: Rgb,
    muted: Rgb,
    hot: Rgb,
    highlight: Rgb,
}

impl Palette {
    fn color(&self, role: Role) -> Rgb {
        match role {
            Role::Error => self.error,
            Role::Api => self.api,
            Role::TypeName => self.type_name,
            Role::Module => self.module,
            Role::Heading => self.heading,
            Role::Accent => self.accent,
            Role::Muted => self.muted,
            Role::Hot => self.hot,
            Role::Highlight => self.highlight,
        }
    }
}

// https://github.com/joshdick/onedark.vim
static ONE_DARK: Palette = Palette {
    error: Rgb(224, 108, 117),
    api: Rgb(152, 195, 121),
    type_name: Rgb(229, 192, 123),
    module: Rgb(198, 120, 221),
    heading: Rgb(97, 175, 239),
    accent: Rgb(86, 182, 194),
    muted: Rgb(92, 99, 112),
    hot: Rgb(166, 226, 46),
    highlight: Rgb(255, 215, 0),
};

// https://github.com/sonph/onehalf
static ONE_LIGHT: Palette = Palette {
    error: Rgb(228, 86, 73),
    api: Rgb(80, 161, 79),
    type_name: Rgb(193, 132, 1),
    module: Rgb(166, 38, 164),
    heading: Rgb(64, 120, 242),
    accent: Rgb(1, 132, 188),
    muted: Rgb(160, 161, 167),
    hot: Rgb(68, 140, 39),
    highlight: Rgb(152, 104, 1),
};

static PALETTE: OnceLock<&'static Palette> = OnceLock::new();

/// Map a theme name to its palette.
fn palette_named(name: &str) -> Option<&'static Palette> {
    match name.trim().to_ascii_lowercase().as_str() {
        "dark" | "d" => Some(&ONE_DARK),
        "light" | "l" => Some(&ONE_LIGHT),
        _ => None,
    }
}

/// `COLORFGBG` is "fg;bg" (sometimes "fg;default;bg"). Background codes 7
/// and 9..=15 are light.
fn background_is_light(colorfgbg: &str) -> bool {
    colorfgbg
        .rsplit(';')
        .next()
        .and_then(|bg| bg.parse::<u8>().ok())
        .is_some_and(|bg| bg == 7 || (9..=15).contains(&bg))
}

fn palette() -> &'static Palette {
    PALETTE.get_or_init(|| {
        if let Some(palette) = std::env::var("DOCSIFT_THEME")
            .ok()
            .as_deref()
            .and_then(palette_named)
        {
            return palette;
        }
        match std::env::var("COLORFGBG") {
            Ok(hint) if background_is_light(&hint) => &ONE_LIGHT,
            _ => &ONE_DARK,
        }
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// STYLING
// ═══════════════════════════════════════════════════════════════════════════

fn colors_enabled(stream: atty::Stream) -> bool {
    std::env::var_os("NO_COLOR").is_none() && atty::is(stream)
}

/// Colors on stdout?
pub fn use_colors() -> bool {
    colors_enabled(atty::Stream::Stdout)
}

/// Colors on stderr, where errors go?
pub fn use_colors_stderr() -> bool {
    colors_enabled(atty::Stream::Stderr)
}

/// Escape sequence for a role, regardless of whether colors are on.
pub fn color(role: Role) -> String {
    palette().color(role).escape()
}

/// Paint `text` for stdout; plain when colors are off.
pub fn paint(role: Role, modifiers: &[&str], text: &str) -> String {
    if !use_colors() {
        return text.to_string();
    }
    let mut out = modifiers.concat();
    out.push_str(&color(role));
    out.push_str(text);
    out.push_str(RESET);
    out
}

/// Chars a terminal will actually draw, skipping `ESC ... m` sequences.
pub fn visible_len(s: &str) -> usize {
    s.split('\x1b')
        .enumerate()
        .map(|(i, chunk)| {
            let drawn = if i == 0 {
                chunk
            } else {
                chunk.split_once('m').map_or("", |(_, rest)| rest)
            };
            drawn.chars().count()
        })
        .sum()
}

fn padding(s: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(visible_len(s)))
}

/// Pad on the right to `width` visible chars.
pub fn pad_right(s: &str, width: usize) -> String {
    format!("{}{}", s, padding(s, width))
}

/// Pad on the left to `width` visible chars.
pub fn pad_left(s: &str, width: usize) -> String {
    format!("{}{}", padding(s, width), s)
}

/// Cut plain text to `max` chars, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

// ═══════════════════════════════════════════════════════════════════════════
// BOXES
// ═══════════════════════════════════════════════════════════════════════════

/// Border color and the reset that closes it, or two empty strings.
fn frame() -> (String, &'static str) {
    if use_colors() {
        (color(Role::Muted), RESET)
    } else {
        (String::new(), "")
    }
}

/// `left─ label ────right`, filled to the box width.
fn labeled_rule(left: char, label: &str, right: char) {
    let (on, off) = frame();
    let label = format!("─ {} ", paint(Role::Accent, &[BOLD], label));
    let fill = "─".repeat(BOX_WIDTH.saturating_sub(visible_len(&label)));
    println!("{on}{left}{off}{label}{on}{fill}{right}{off}");
}

/// Open a box: `┌─ label ───┐`
pub fn section_top(label: &str) {
    labeled_rule('┌', label, '┐');
}

/// Divide a box: `├─ label ───┤`
pub fn section_mid(label: &str) {
    labeled_rule('├', label, '┤');
}

/// Close a box: `└──────────┘`
pub fn section_bot() {
    let (on, off) = frame();
    println!("{on}└{}┘{off}", "─".repeat(BOX_WIDTH));
}

/// One line inside a box: `│ content    │`
pub fn row(content: &str) {
    let (on, off) = frame();
    let fill = padding(content, BOX_WIDTH);
    println!("{on}│{off}{content}{fill}{on}│{off}");
}

// ═══════════════════════════════════════════════════════════════════════════
// RESULTS
// ═══════════════════════════════════════════════════════════════════════════

/// `[function]`, colored by how API-like the category is.
pub fn category_badge(category: Category) -> String {
    let role = match category {
        Category::Function | Category::Method => Role::Api,
        Category::Type => Role::TypeName,
        Category::Module => Role::Module,
        Category::Section => Role::Heading,
        Category::Page => Role::Accent,
        Category::Other => Role::Muted,
    };
    paint(role, &[], &format!("[{}]", category))
}

/// Right-aligned score, hotter colors for stronger matches.
pub fn score_value(score: f64) -> String {
    let role = match score {
        s if s >= 10.0 => Role::Hot,
        s if s >= 3.0 => Role::Api,
        s if s >= 1.0 => Role::TypeName,
        _ => Role::Muted,
    };
    paint(role, &[], &format!("{:>8.3}", score))
}

/// Split a snippet into `(text, highlighted)` pieces.
///
/// Offsets are chars, matching `MatchSpan`. Overlapping or out-of-window
/// spans are skipped rather than trusted.
pub fn snippet_segments<'t>(text: &'t str, snippet: &Snippet) -> Vec<(&'t str, bool)> {
    let mut segments = Vec::new();
    let mut cursor = snippet.start;
    let mut spans: Vec<&MatchSpan> = snippet.matches.iter().collect();
    spans.sort_by_key(|span| span.start);

    for span in spans {
        if span.start < cursor || span.end > snippet.end {
            continue;
        }
        if span.start > cursor {
            segments.push((char_slice(text, cursor, span.start), false));
        }
        segments.push((char_slice(text, span.start, span.end), true));
        cursor = span.end;
    }
    if cursor < snippet.end {
        segments.push((char_slice(text, cursor, snippet.end), false));
    }
    segments
}

/// Render a snippet on one line with highlighted matches.
///
/// Without colors, highlights are bracketed: `of a [histogram].`
pub fn render_snippet(text: &str, snippet: &Snippet) -> String {
    let colors = use_colors();
    let mut out = String::new();
    if snippet.start > 0 {
        out.push('…');
    }
    for (piece, highlighted) in snippet_segments(text, snippet) {
        let piece = piece.replace(['\n', '\r', '\t'], " ");
        match (highlighted, colors) {
            (true, true) => out.push_str(&paint(Role::Highlight, &[BOLD], &piece)),
            (true, false) => out.push_str(&format!("[{}]", piece)),
            (false, _) => out.push_str(&piece),
        }
    }
    if snippet.end < text.chars().count() {
        out.push('…');
    }
    out
}

/// Word-wrap plain text to `width` visible chars per line.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split(' ') {
        if !line.is_empty() && visible_len(&line) + 1 + visible_len(word) > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
