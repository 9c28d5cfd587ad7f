//! Input normalisation: deterministic cleanup of vision-model text.
//!
//! Vision models answering "extract the text" routinely wrap the whole
//! answer in a ```` ```markdown ```` fence, emit CRLF line endings, or leak
//! zero-width characters copied from the page. None of that is content, and
//! a BOM or zero-width space in front of `#` hides the heading marker from
//! the classifier, so these are removed before the scan.
//!
//! Text without any of these artefacts passes through unchanged.

use once_cell::sync::Lazy;
use regex::Regex;

/// Apply all cleanup rules in order:
/// 1. Strip an outer code fence wrapping the entire text
/// 2. Normalise line endings (CRLF / CR → LF)
/// 3. Remove invisible Unicode (zero-width spaces, BOM, soft hyphens, …)
pub fn normalise_input(input: &str) -> String {
    let s = strip_outer_fence(input);
    let s = normalise_line_endings(&s);
    remove_invisible_chars(&s)
}

// ── Rule 1: Strip outer fence ────────────────────────────────────────────────

static RE_OUTER_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```(?:markdown|md)?\r?\n(.*?)\r?\n```\s*$").unwrap());

fn strip_outer_fence(input: &str) -> String {
    match RE_OUTER_FENCE.captures(input.trim()) {
        Some(caps) => caps[1].to_string(),
        None => input.to_string(),
    }
}

// ── Rule 2: Normalise line endings ───────────────────────────────────────────

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// ── Rule 3: Remove invisible Unicode characters ─────────────────────────────

fn remove_invisible_chars(input: &str) -> String {
    input.replace(
        [
            '\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{200C}', '\u{200D}', '\u{2060}',
        ],
        "",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markdown_fence() {
        let input = "```markdown\n# Hello\nWorld\n```";
        assert_eq!(strip_outer_fence(input), "# Hello\nWorld");
    }

    #[test]
    fn strips_bare_fence() {
        let input = "```\n- a\n- b\n```\n";
        assert_eq!(strip_outer_fence(input), "- a\n- b");
    }

    #[test]
    fn inner_fences_are_left_alone() {
        let input = "intro\n```\ncode\n```\noutro";
        assert_eq!(strip_outer_fence(input), input);
    }

    #[test]
    fn line_endings() {
        assert_eq!(normalise_line_endings("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn invisible_chars_removed() {
        let input = "\u{FEFF}# Title\u{200B}";
        assert_eq!(remove_invisible_chars(input), "# Title");
    }

    #[test]
    fn clean_text_is_unchanged() {
        let input = "# Report\nSome **important** text.\n| a | b |";
        assert_eq!(normalise_input(input), input);
    }

    #[test]
    fn full_pipeline() {
        let input = "```markdown\r\n\u{FEFF}## Section\r\n- item\r\n```";
        assert_eq!(normalise_input(input), "## Section\n- item");
    }
}
