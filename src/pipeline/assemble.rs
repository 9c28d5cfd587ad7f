//! Document assembly: one forward scan from text to [`Document`].
//!
//! The scan keeps a single cursor over the input lines. Every line is
//! classified; non-table lines advance the cursor by one, a table start
//! greedily takes the whole run of `|`-prefixed lines. Blocks are appended
//! in input order and never touched again.
//!
//! Assembly cannot fail. Any string, including the empty string, yields a
//! document; the worst case is that odd input ends up as paragraphs.

use crate::document::{Block, Document};
use crate::pipeline::classify::{classify_line, continues_table, is_separator_row, LineKind};
use crate::pipeline::inline::parse_inline;
use crate::pipeline::table::build_table;
use chrono::{Local, NaiveDateTime};
use tracing::debug;

/// Title used when the caller does not supply one.
pub const DEFAULT_TITLE: &str = "Extracted Text Document";

/// Assemble `text` into a document stamped with the current local time.
pub fn assemble(text: &str) -> Document {
    assemble_at(text, DEFAULT_TITLE, Local::now().naive_local())
}

/// Assemble `text` with an explicit title and generation time.
pub fn assemble_at(text: &str, title: &str, generated_at: NaiveDateTime) -> Document {
    let mut doc = Document::new(title, generated_at);
    doc.blocks = assemble_blocks(text);
    doc
}

/// Scan `text` and produce its content blocks in order.
pub fn assemble_blocks(text: &str) -> Vec<Block> {
    let lines: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let block = match classify_line(lines[i]) {
            LineKind::Blank => None,
            LineKind::TableStart => {
                let end = table_run_end(&lines, i);
                let block = table_block(&lines[i..end]);
                i = end;
                if let Some(block) = block {
                    blocks.push(block);
                }
                continue;
            }
            LineKind::Heading { level, text } => Some(Block::Heading {
                level,
                segments: parse_inline(text),
            }),
            LineKind::Bullet(text) => Some(Block::BulletItem {
                segments: parse_inline(text),
            }),
            LineKind::Numbered(text) => Some(Block::NumberedItem {
                segments: parse_inline(text),
            }),
            LineKind::Paragraph(text) => Some(Block::Paragraph {
                segments: parse_inline(text),
            }),
        };

        blocks.extend(block);
        i += 1;
    }

    blocks
}

/// Index one past the last line of the table run starting at `start`.
fn table_run_end(lines: &[&str], start: usize) -> usize {
    lines[start..]
        .iter()
        .position(|line| !continues_table(line))
        .map_or(lines.len(), |offset| start + offset)
}

fn table_block(run: &[&str]) -> Option<Block> {
    let rows: Vec<&str> = run
        .iter()
        .map(|line| line.trim())
        .filter(|line| !is_separator_row(line))
        .collect();

    debug!(
        "Table run: {} lines, {} separator rows dropped",
        run.len(),
        run.len() - rows.len()
    );

    build_table(&rows).map(Block::Table)
}
