//! Result types returned by the conversion entry points.

use crate::document::{Block, Document};
use crate::error::FileError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything one conversion produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// The assembled block structure.
    pub document: Document,
    /// The encoded Word package. Omitted from JSON dumps.
    #[serde(skip)]
    pub docx: Vec<u8>,
    pub stats: ConversionStats,
}

/// Counters describing one conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Lines in the (normalised) input.
    pub input_lines: usize,
    pub headings: usize,
    pub bullet_items: usize,
    pub numbered_items: usize,
    pub paragraphs: usize,
    pub tables: usize,
    /// Rows across all tables, header rows included.
    pub table_rows: usize,
    pub docx_bytes: usize,
    pub duration_ms: u64,
}

impl ConversionStats {
    /// Count blocks by kind.
    pub fn from_blocks(input_lines: usize, blocks: &[Block]) -> Self {
        let mut stats = Self {
            input_lines,
            ..Self::default()
        };
        for block in blocks {
            match block {
                Block::Heading { .. } => stats.headings += 1,
                Block::BulletItem { .. } => stats.bullet_items += 1,
                Block::NumberedItem { .. } => stats.numbered_items += 1,
                Block::Paragraph { .. } => stats.paragraphs += 1,
                Block::Table(t) => {
                    stats.tables += 1;
                    stats.table_rows += t.row_count();
                }
            }
        }
        stats
    }

    /// Total content blocks.
    pub fn blocks(&self) -> usize {
        self.headings + self.bullet_items + self.numbered_items + self.paragraphs + self.tables
    }
}

/// Outcome of one file in a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub stats: Option<ConversionStats>,
    pub error: Option<FileError>,
}

impl FileResult {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Table, TextSegment};

    #[test]
    fn stats_count_each_kind() {
        let seg = || vec![TextSegment::normal("x")];
        let blocks = vec![
            Block::Heading {
                level: 1,
                segments: seg(),
            },
            Block::Paragraph { segments: seg() },
            Block::BulletItem { segments: seg() },
            Block::BulletItem { segments: seg() },
            Block::NumberedItem { segments: seg() },
            Block::Table(Table {
                rows: vec![vec![seg()], vec![seg()], vec![seg()]],
                header_row: 0,
            }),
        ];
        let stats = ConversionStats::from_blocks(9, &blocks);
        assert_eq!(stats.input_lines, 9);
        assert_eq!(stats.headings, 1);
        assert_eq!(stats.paragraphs, 1);
        assert_eq!(stats.bullet_items, 2);
        assert_eq!(stats.numbered_items, 1);
        assert_eq!(stats.tables, 1);
        assert_eq!(stats.table_rows, 3);
        assert_eq!(stats.blocks(), 6);
    }

    #[test]
    fn docx_bytes_are_not_serialised() {
        let out = ConversionOutput {
            document: crate::pipeline::assemble::assemble(""),
            docx: vec![1, 2, 3],
            stats: ConversionStats::default(),
        };
        let json = serde_json::to_value(&out).unwrap();
        assert!(json.get("docx").is_none());
        assert!(json.get("document").is_some());
    }
}
