//! Serialisation: drive a [`DocumentWriter`] over an assembled document.
//!
//! The writer trait is the boundary to the output format. [`render`] owns
//! the layout (preamble first, then every block in order, exhaustively
//! matched) and the writer owns the format. [`DocxWriter`] is the Word
//! implementation, built on `docx-rs`.
//!
//! ## Layout
//!
//! ```text
//! Title                       "Extracted Text Document"
//! Generated on: 2024-03-07 09:05:01
//! (spacer)
//! Heading 1                   "Extracted Content"
//! ...blocks...                tables followed by a spacer paragraph
//! ```

use crate::config::ConversionConfig;
use crate::document::{timestamp_line, Block, Cell, Document, ListKind, TextSegment};
use crate::error::Md2DocxError;
use chrono::NaiveDateTime;
use docx_rs::{
    AbstractNumbering, Docx, IndentLevel, Level, LevelJc, LevelText, NumberFormat, Numbering,
    NumberingId, Paragraph, Run, SpecialIndentType, Start, Style, StyleType, Table as DocxTable,
    TableCell, TableRow,
};
use std::io::Cursor;
use tracing::debug;

/// Capability surface the renderer needs from an output format.
pub trait DocumentWriter {
    /// Start a document carrying its title and generation time.
    fn new_document(title: &str, generated_at: NaiveDateTime, config: &ConversionConfig) -> Self
    where
        Self: Sized;

    /// Heading of `level` 1..=3.
    fn append_heading(&mut self, level: u8, segments: &[TextSegment]);

    fn append_list_item(&mut self, kind: ListKind, segments: &[TextSegment]);

    /// Paragraph; an empty slice produces an empty spacer paragraph.
    fn append_paragraph(&mut self, segments: &[TextSegment]);

    /// Rectangular grid of cells; row `header_row` is the header.
    fn append_table(&mut self, rows: &[Vec<Cell>], header_row: usize);

    /// Encode the document.
    fn finish(self) -> Result<Vec<u8>, Md2DocxError>
    where
        Self: Sized;
}

/// Render `doc` with writer `W` and return the encoded bytes.
pub fn render<W: DocumentWriter>(
    doc: &Document,
    config: &ConversionConfig,
) -> Result<Vec<u8>, Md2DocxError> {
    let mut writer = W::new_document(&doc.title, doc.generated_at, config);

    writer.append_heading(1, &[TextSegment::normal(config.content_heading.as_str())]);

    for block in &doc.blocks {
        match block {
            Block::Heading { level, segments } => writer.append_heading(*level, segments),
            Block::BulletItem { segments } => writer.append_list_item(ListKind::Bullet, segments),
            Block::NumberedItem { segments } => {
                writer.append_list_item(ListKind::Numbered, segments)
            }
            Block::Paragraph { segments } => writer.append_paragraph(segments),
            Block::Table(table) => {
                writer.append_table(&table.rows, table.header_row);
                if config.spacer_paragraphs {
                    writer.append_paragraph(&[]);
                }
            }
        }
    }

    writer.finish()
}

/// Render `doc` as a Word (.docx) package.
pub fn render_docx(doc: &Document, config: &ConversionConfig) -> Result<Vec<u8>, Md2DocxError> {
    render::<DocxWriter>(doc, config)
}

// ── Word writer ──────────────────────────────────────────────────────────────

const TITLE_STYLE: &str = "Title";
const BULLET_NUMBERING: usize = 1;
const FIRST_DECIMAL_NUMBERING: usize = 2;

enum Child {
    Paragraph(Paragraph),
    Table(DocxTable),
}

/// [`DocumentWriter`] producing a `.docx` package via `docx-rs`.
///
/// Numbered items restart at 1 for every contiguous run: each run gets its
/// own abstract numbering definition, since Word continues a count across
/// every paragraph that shares one.
pub struct DocxWriter {
    children: Vec<Child>,
    bold_header: bool,
    numbered_runs: usize,
    in_numbered_run: bool,
}

impl DocxWriter {
    fn push_paragraph(&mut self, paragraph: Paragraph) {
        self.in_numbered_run = false;
        self.children.push(Child::Paragraph(paragraph));
    }

    fn current_numbering_id(&mut self) -> usize {
        if !self.in_numbered_run {
            self.numbered_runs += 1;
        }
        FIRST_DECIMAL_NUMBERING + self.numbered_runs - 1
    }
}

impl DocumentWriter for DocxWriter {
    fn new_document(title: &str, generated_at: NaiveDateTime, config: &ConversionConfig) -> Self {
        let mut writer = Self {
            children: Vec::new(),
            bold_header: config.bold_table_header,
            numbered_runs: 0,
            in_numbered_run: false,
        };

        writer.push_paragraph(
            Paragraph::new()
                .style(TITLE_STYLE)
                .add_run(Run::new().add_text(title)),
        );
        writer.push_paragraph(
            Paragraph::new().add_run(Run::new().add_text(timestamp_line(generated_at))),
        );
        if config.spacer_paragraphs {
            writer.push_paragraph(Paragraph::new());
        }
        writer
    }

    fn append_heading(&mut self, level: u8, segments: &[TextSegment]) {
        let level = level.clamp(1, 3);
        self.push_paragraph(runs(Paragraph::new().style(&heading_style(level)), segments, false));
    }

    fn append_list_item(&mut self, kind: ListKind, segments: &[TextSegment]) {
        let numbering = match kind {
            ListKind::Bullet => BULLET_NUMBERING,
            ListKind::Numbered => self.current_numbering_id(),
        };
        let paragraph = runs(
            Paragraph::new().numbering(NumberingId::new(numbering), IndentLevel::new(0)),
            segments,
            false,
        );
        self.children.push(Child::Paragraph(paragraph));
        self.in_numbered_run = kind == ListKind::Numbered;
    }

    fn append_paragraph(&mut self, segments: &[TextSegment]) {
        self.push_paragraph(runs(Paragraph::new(), segments, false));
    }

    fn append_table(&mut self, rows: &[Vec<Cell>], header_row: usize) {
        let rows: Vec<TableRow> = rows
            .iter()
            .enumerate()
            .map(|(idx, cells)| {
                let force_bold = self.bold_header && idx == header_row;
                TableRow::new(
                    cells
                        .iter()
                        .map(|cell| {
                            TableCell::new().add_paragraph(runs(Paragraph::new(), cell, force_bold))
                        })
                        .collect(),
                )
            })
            .collect();
        self.in_numbered_run = false;
        self.children.push(Child::Table(DocxTable::new(rows)));
    }

    fn finish(self) -> Result<Vec<u8>, Md2DocxError> {
        let mut docx = base_docx(self.numbered_runs);
        for child in self.children {
            docx = match child {
                Child::Paragraph(p) => docx.add_paragraph(p),
                Child::Table(t) => docx.add_table(t),
            };
        }

        let mut buf = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buf)
            .map_err(|e| Md2DocxError::Serialization {
                detail: e.to_string(),
            })?;

        let bytes = buf.into_inner();
        debug!("Packed .docx: {} bytes", bytes.len());
        Ok(bytes)
    }
}

/// Append one run per segment; `force_bold` bolds every run.
fn runs(mut paragraph: Paragraph, segments: &[TextSegment], force_bold: bool) -> Paragraph {
    for segment in segments {
        let mut run = Run::new().add_text(segment.text.as_str());
        if force_bold || segment.is_bold() {
            run = run.bold();
        }
        paragraph = paragraph.add_run(run);
    }
    paragraph
}

fn heading_style(level: u8) -> String {
    format!("Heading{level}")
}

/// Styles plus numbering definitions for bullets and each numbered run.
fn base_docx(numbered_runs: usize) -> Docx {
    let mut docx = Docx::new()
        .add_style(
            Style::new(TITLE_STYLE, StyleType::Paragraph)
                .name("Title")
                .size(56),
        )
        .add_style(
            Style::new(heading_style(1), StyleType::Paragraph)
                .name("Heading 1")
                .size(32)
                .bold(),
        )
        .add_style(
            Style::new(heading_style(2), StyleType::Paragraph)
                .name("Heading 2")
                .size(26)
                .bold(),
        )
        .add_style(
            Style::new(heading_style(3), StyleType::Paragraph)
                .name("Heading 3")
                .size(24)
                .bold(),
        )
        .add_abstract_numbering(
            AbstractNumbering::new(BULLET_NUMBERING).add_level(list_level("bullet", "\u{2022}")),
        )
        .add_numbering(Numbering::new(BULLET_NUMBERING, BULLET_NUMBERING));

    for id in FIRST_DECIMAL_NUMBERING..FIRST_DECIMAL_NUMBERING + numbered_runs {
        docx = docx
            .add_abstract_numbering(
                AbstractNumbering::new(id).add_level(list_level("decimal", "%1.")),
            )
            .add_numbering(Numbering::new(id, id));
    }
    docx
}

fn list_level(format: &str, text: &str) -> Level {
    Level::new(
        0,
        Start::new(1),
        NumberFormat::new(format),
        LevelText::new(text),
        LevelJc::new("left"),
    )
    .indent(Some(720), Some(SpecialIndentType::Hanging(360)), None, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Table, TextSegment};
    use chrono::NaiveDate;

    /// Writer that records calls as text lines.
    struct TraceWriter {
        lines: Vec<String>,
    }

    fn describe(segments: &[TextSegment]) -> String {
        segments
            .iter()
            .map(|s| {
                if s.is_bold() {
                    format!("<b>{}</b>", s.text)
                } else {
                    s.text.clone()
                }
            })
            .collect()
    }

    impl DocumentWriter for TraceWriter {
        fn new_document(title: &str, generated_at: NaiveDateTime, _: &ConversionConfig) -> Self {
            Self {
                lines: vec![format!("title {title}"), format!("at {generated_at}")],
            }
        }
        fn append_heading(&mut self, level: u8, segments: &[TextSegment]) {
            self.lines.push(format!("h{level} {}", describe(segments)));
        }
        fn append_list_item(&mut self, kind: ListKind, segments: &[TextSegment]) {
            self.lines.push(format!("{kind:?} {}", describe(segments)));
        }
        fn append_paragraph(&mut self, segments: &[TextSegment]) {
            self.lines.push(format!("p {}", describe(segments)));
        }
        fn append_table(&mut self, rows: &[Vec<Cell>], header_row: usize) {
            self.lines
                .push(format!("table {}x{} header={header_row}", rows.len(), rows[0].len()));
        }
        fn finish(self) -> Result<Vec<u8>, Md2DocxError> {
            Ok(self.lines.join("\n").into_bytes())
        }
    }

    fn doc(blocks: Vec<Block>) -> Document {
        let at = NaiveDate::from_ymd_opt(2024, 1, 2)
            .and_then(|d| d.and_hms_opt(3, 4, 5))
            .unwrap();
        Document {
            title: "T".into(),
            generated_at: at,
            blocks,
        }
    }

    fn trace(doc: &Document, config: &ConversionConfig) -> String {
        String::from_utf8(render::<TraceWriter>(doc, config).unwrap()).unwrap()
    }

    #[test]
    fn preamble_then_blocks_in_order() {
        let d = doc(vec![
            Block::Heading {
                level: 2,
                segments: vec![TextSegment::normal("Intro")],
            },
            Block::NumberedItem {
                segments: vec![TextSegment::bold("one")],
            },
            Block::Table(Table {
                rows: vec![vec![vec![], vec![]]],
                header_row: 0,
            }),
            Block::Paragraph {
                segments: vec![TextSegment::normal("end")],
            },
        ]);
        let out = trace(&d, &ConversionConfig::default());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "title T",
                "at 2024-01-02 03:04:05",
                "h1 Extracted Content",
                "h2 Intro",
                "Numbered <b>one</b>",
                "table 1x2 header=0",
                "p ",
                "p end",
            ]
        );
    }

    #[test]
    fn no_spacer_after_table_when_disabled() {
        let d = doc(vec![Block::Table(Table {
            rows: vec![vec![vec![]]],
            header_row: 0,
        })]);
        let config = ConversionConfig::builder()
            .spacer_paragraphs(false)
            .build()
            .unwrap();
        let out = trace(&d, &config);
        assert!(out.ends_with("table 1x1 header=0"), "got: {out}");
    }

    #[test]
    fn docx_package_is_a_zip() {
        let d = doc(vec![Block::BulletItem {
            segments: vec![TextSegment::normal("x")],
        }]);
        let bytes = render_docx(&d, &ConversionConfig::default()).unwrap();
        assert!(bytes.starts_with(b"PK"), "not a zip archive");
    }

    #[test]
    fn numbered_runs_restart() {
        let mut w = DocxWriter::new_document(
            "T",
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap(),
            &ConversionConfig::default(),
        );
        let seg = [TextSegment::normal("n")];
        w.append_list_item(ListKind::Numbered, &seg);
        w.append_list_item(ListKind::Numbered, &seg);
        assert_eq!(w.numbered_runs, 1);
        w.append_paragraph(&seg);
        w.append_list_item(ListKind::Numbered, &seg);
        assert_eq!(w.numbered_runs, 2);
        w.append_list_item(ListKind::Bullet, &seg);
        w.append_list_item(ListKind::Numbered, &seg);
        assert_eq!(w.numbered_runs, 3);
    }
}
