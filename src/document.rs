//! The assembled document model.
//!
//! A [`Document`] is an ordered list of [`Block`]s plus the fixed preamble
//! metadata (title and generation time). Blocks are a closed enum: every
//! consumer matches exhaustively, so a new block kind is a compile error in
//! every renderer rather than a silently ignored string tag.
//!
//! Nothing here performs I/O. The structure is built in one pass by
//! [`crate::pipeline::assemble`] and handed to a
//! [`crate::pipeline::serialize::DocumentWriter`] once complete.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Format used for the "Generated on:" preamble line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formatting style of a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentStyle {
    #[default]
    Normal,
    Bold,
}

/// A contiguous span of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSegment {
    pub style: SegmentStyle,
    pub text: String,
}

impl TextSegment {
    pub fn normal(text: impl Into<String>) -> Self {
        Self {
            style: SegmentStyle::Normal,
            text: text.into(),
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            style: SegmentStyle::Bold,
            text: text.into(),
        }
    }

    pub fn is_bold(&self) -> bool {
        self.style == SegmentStyle::Bold
    }
}

/// `Generated on: YYYY-MM-DD HH:MM:SS`
pub fn timestamp_line(generated_at: NaiveDateTime) -> String {
    format!("Generated on: {}", generated_at.format(TIMESTAMP_FORMAT))
}

/// Concatenate the text of a segment sequence, dropping styles.
pub fn plain_text(segments: &[TextSegment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

/// One table cell: its inline segments.
pub type Cell = Vec<TextSegment>;

/// A rectangular grid of cells.
///
/// Every row holds exactly [`Table::columns`] cells. Row `header_row`
/// (always 0 when built from Markdown) is rendered bold by the serializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Vec<Cell>>,
    pub header_row: usize,
}

impl Table {
    /// Column count, fixed by the first row.
    pub fn columns(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Kind of list paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Bullet,
    Numbered,
}

/// One structural unit of the output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Heading of level 1..=3.
    Heading { level: u8, segments: Vec<TextSegment> },
    BulletItem { segments: Vec<TextSegment> },
    NumberedItem { segments: Vec<TextSegment> },
    Paragraph { segments: Vec<TextSegment> },
    Table(Table),
}

/// The assembled document: preamble metadata plus content blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub generated_at: NaiveDateTime,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(title: impl Into<String>, generated_at: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            generated_at,
            blocks: Vec::new(),
        }
    }

    pub fn timestamp_line(&self) -> String {
        timestamp_line(self.generated_at)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
