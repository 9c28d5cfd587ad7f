//! Line classification: decide what block a trimmed line starts.
//!
//! Rules are evaluated in a fixed priority order; the first match wins:
//!
//! 1. blank
//! 2. table start (`|` first, another `|` later)
//! 3. `###` heading, then `##`, then `#`
//! 4. bullet (`*` or `-`)
//! 5. numbered item (a single digit `1`–`9` immediately followed by `.`)
//! 6. paragraph
//!
//! The heading order matters: `### Title` also starts with `#`, so the
//! longest prefix has to be tested first.

use once_cell::sync::Lazy;
use regex::Regex;

/// Classification of one input line, borrowing the payload text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    /// First line of a table run. The assembler collects the rest.
    TableStart,
    Heading { level: u8, text: &'a str },
    Bullet(&'a str),
    Numbered(&'a str),
    Paragraph(&'a str),
}

static RE_SEPARATOR_ROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[|:\-= ]*$").unwrap());

static RE_NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[1-9]\.").unwrap());

/// Classify a line. Surrounding whitespace is trimmed first.
pub fn classify_line(line: &str) -> LineKind<'_> {
    let line = line.trim();

    if line.is_empty() {
        return LineKind::Blank;
    }

    if is_table_start(line) {
        return LineKind::TableStart;
    }

    if let Some(level) = heading_level(line) {
        let text = line.trim_start_matches('#').trim();
        return LineKind::Heading { level, text };
    }

    if let Some(rest) = line.strip_prefix(['*', '-']) {
        return LineKind::Bullet(rest.trim_start());
    }

    if RE_NUMBERED.is_match(line) {
        let text = line
            .split_once('.')
            .map_or(line, |(_, after)| after)
            .trim();
        return LineKind::Numbered(text);
    }

    LineKind::Paragraph(line)
}

/// A trimmed line opens a table when it starts with `|` and has a second
/// `|` somewhere after the first character.
pub fn is_table_start(line: &str) -> bool {
    line.strip_prefix('|').is_some_and(|rest| rest.contains('|'))
}

/// Lines after the first belong to the run as long as they start with `|`.
pub fn continues_table(line: &str) -> bool {
    line.trim().starts_with('|')
}

/// Alignment/border rows consist only of `|`, `:`, `-`, `=` and spaces.
pub fn is_separator_row(line: &str) -> bool {
    RE_SEPARATOR_ROW.is_match(line.trim())
}

fn heading_level(line: &str) -> Option<u8> {
    if line.starts_with("###") {
        Some(3)
    } else if line.starts_with("##") {
        Some(2)
    } else if line.starts_with('#') {
        Some(1)
    } else {
        None
    }
}
