//! # md2docx
//!
//! Turn the Markdown-flavoured text that vision/OCR models return into a
//! real Word document.
//!
//! The accepted dialect is deliberately small, matching what an "extract
//! all text from this image" prompt produces:
//!
//! | Markdown | Word |
//! |----------|------|
//! | `#`, `##`, `###` | Heading 1–3 |
//! | `- item`, `* item` | bulleted list paragraph |
//! | `1.` … `9.` | numbered list paragraph |
//! | `**bold**` | bold run |
//! | `\| a \| b \|` rows | table, first row bold |
//!
//! Everything else becomes a plain paragraph. Malformed input never fails:
//! an unclosed `**` stays literal text, ragged table rows are padded or
//! truncated, and an empty string still yields the document preamble.
//!
//! ## Pipeline Overview
//!
//! ```text
//! text
//!  │
//!  ├─ 1. Normalise  strip fences, CRLF, zero-width characters
//!  ├─ 2. Assemble   one forward scan: classify lines, collect table runs
//!  ├─ 3. Inline     **bold** spans → typed segments
//!  └─ 4. Serialise  Document → .docx via docx-rs
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use md2docx::{convert, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let text = "# Receipt\n- **Total**: 42.00\n| Item | Qty |\n|---|---|\n| Tea | 2 |";
//!     let output = convert(text, &ConversionConfig::default())?;
//!     std::fs::write("receipt.docx", &output.docx)?;
//!     eprintln!("{} blocks, {} tables", output.stats.blocks(), output.stats.tables);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md2docx` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! md2docx = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, DEFAULT_CONTENT_HEADING};
pub use convert::{
    build_document, convert, convert_batch, convert_file, convert_file_sync, convert_to_file,
    default_output_name, output_path_for, write_atomic,
};
pub use document::{Block, Cell, Document, ListKind, SegmentStyle, Table, TextSegment};
pub use error::{FileError, Md2DocxError};
pub use output::{ConversionOutput, ConversionStats, FileResult};
pub use pipeline::assemble::{assemble, assemble_at, DEFAULT_TITLE};
pub use pipeline::classify::{classify_line, LineKind};
pub use pipeline::inline::parse_inline;
pub use pipeline::serialize::{render, render_docx, DocumentWriter, DocxWriter};
pub use pipeline::table::build_table;
pub use progress::{BatchProgressCallback, NoopProgressCallback, ProgressCallback};
