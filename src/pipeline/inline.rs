//! Inline formatting: split one line into normal and bold segments.
//!
//! Only `**bold**` is recognised. The scan is a single left-to-right pass
//! with no nesting: the first `**` always opens, the next `**` always
//! closes. An opening marker with no partner is kept verbatim, markers
//! included, so malformed input degrades to plain text instead of losing
//! characters.

use crate::document::TextSegment;

const BOLD_MARKER: &str = "**";

/// Parse `**bold**` spans in `text`.
///
/// Empty input yields no segments. Text without markers yields exactly one
/// normal segment.
pub fn parse_inline(text: &str) -> Vec<TextSegment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    while cursor < text.len() {
        let Some(open) = find_from(text, cursor) else {
            segments.push(TextSegment::normal(&text[cursor..]));
            break;
        };

        if open > cursor {
            segments.push(TextSegment::normal(&text[cursor..open]));
        }

        let body_start = open + BOLD_MARKER.len();
        let Some(close) = find_from(text, body_start) else {
            // Unmatched: keep the marker and everything after it.
            segments.push(TextSegment::normal(&text[open..]));
            break;
        };

        segments.push(TextSegment::bold(&text[body_start..close]));
        cursor = close + BOLD_MARKER.len();
    }

    segments
}

fn find_from(text: &str, from: usize) -> Option<usize> {
    text[from..].find(BOLD_MARKER).map(|i| from + i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::plain_text;

    #[test]
    fn empty_input_has_no_segments() {
        assert!(parse_inline("").is_empty());
    }

    #[test]
    fn plain_line_is_one_normal_segment() {
        assert_eq!(
            parse_inline("just words"),
            vec![TextSegment::normal("just words")]
        );
    }

    #[test]
    fn bold_then_normal() {
        assert_eq!(
            parse_inline("**Name**: Alice"),
            vec![TextSegment::bold("Name"), TextSegment::normal(": Alice")]
        );
    }

    #[test]
    fn bold_in_the_middle() {
        assert_eq!(
            parse_inline("Some **important** text."),
            vec![
                TextSegment::normal("Some "),
                TextSegment::bold("important"),
                TextSegment::normal(" text."),
            ]
        );
    }

    #[test]
    fn adjacent_bold_spans() {
        assert_eq!(
            parse_inline("**a****b**"),
            vec![TextSegment::bold("a"), TextSegment::bold("b")]
        );
    }

    #[test]
    fn unmatched_marker_is_kept_verbatim() {
        assert_eq!(
            parse_inline("a **b c"),
            vec![TextSegment::normal("a "), TextSegment::normal("**b c")]
        );
    }

    #[test]
    fn unmatched_after_a_closed_span() {
        assert_eq!(
            parse_inline("**x** and **y"),
            vec![
                TextSegment::bold("x"),
                TextSegment::normal(" and "),
                TextSegment::normal("**y"),
            ]
        );
    }

    #[test]
    fn empty_bold_span_is_kept() {
        assert_eq!(parse_inline("****"), vec![TextSegment::bold("")]);
    }

    #[test]
    fn no_nesting_first_marker_opens() {
        // `***x***`: opens at 0, closes at the next `**` (index 3).
        assert_eq!(
            parse_inline("***x***"),
            vec![TextSegment::bold("*x"), TextSegment::normal("*")]
        );
    }

    #[test]
    fn multibyte_text_round_trips() {
        let line = "Ünïcode **naïve café** – ok";
        let segs = parse_inline(line);
        assert_eq!(plain_text(&segs), "Ünïcode naïve café – ok");
        assert!(segs[1].is_bold());
    }

    #[test]
    fn balanced_markers_concatenate_to_stripped_text() {
        for line in [
            "a **b** c",
            "**lead** tail",
            "head **tail**",
            "x **1** y **2** z",
            "no markers at all",
        ] {
            let segs = parse_inline(line);
            assert_eq!(plain_text(&segs), line.replace("**", ""), "line: {line}");
        }
    }
}
