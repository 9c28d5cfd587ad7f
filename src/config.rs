//! Configuration types for Markdown-to-Word conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. The config is a plain value owned by
//! the caller: nothing in the library reads process-wide state, so two
//! conversions with different configs can run side by side.

use crate::error::Md2DocxError;
use crate::pipeline::assemble::DEFAULT_TITLE;
use crate::progress::ProgressCallback;
use chrono::NaiveDateTime;
use std::fmt;

/// Heading placed between the preamble and the converted content.
pub const DEFAULT_CONTENT_HEADING: &str = "Extracted Content";

/// Configuration for a conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use md2docx::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .title("Invoice 2024-117")
///     .bold_table_header(false)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Document title, rendered in the Title style. Default: "Extracted Text Document".
    pub title: String,

    /// Level-1 heading placed above the content. Default: "Extracted Content".
    pub content_heading: String,

    /// Fixed generation time for the "Generated on:" line.
    ///
    /// `None` (default) stamps the local time at conversion. Set it to make
    /// output reproducible, e.g. in tests or when re-rendering an archive.
    pub generated_at: Option<NaiveDateTime>,

    /// Run the input normaliser before parsing. Default: true.
    ///
    /// Strips an outer code fence, normalises line endings and removes
    /// zero-width characters. Clean input passes through unchanged.
    pub clean_input: bool,

    /// Bold every run in a table's header row. Default: true.
    pub bold_table_header: bool,

    /// Empty spacer paragraphs after the timestamp and after each table. Default: true.
    pub spacer_paragraphs: bool,

    /// Files converted at once by [`crate::convert::convert_batch`]. Default: 4.
    pub concurrency: usize,

    /// Per-file progress events for batch conversion.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            content_heading: DEFAULT_CONTENT_HEADING.to_string(),
            generated_at: None,
            clean_input: true,
            bold_table_header: true,
            spacer_paragraphs: true,
            concurrency: 4,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("title", &self.title)
            .field("content_heading", &self.content_heading)
            .field("generated_at", &self.generated_at)
            .field("clean_input", &self.clean_input)
            .field("bold_table_header", &self.bold_table_header)
            .field("spacer_paragraphs", &self.spacer_paragraphs)
            .field("concurrency", &self.concurrency)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn BatchProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn content_heading(mut self, heading: impl Into<String>) -> Self {
        self.config.content_heading = heading.into();
        self
    }

    pub fn generated_at(mut self, at: NaiveDateTime) -> Self {
        self.config.generated_at = Some(at);
        self
    }

    pub fn clean_input(mut self, v: bool) -> Self {
        self.config.clean_input = v;
        self
    }

    pub fn bold_table_header(mut self, v: bool) -> Self {
        self.config.bold_table_header = v;
        self
    }

    pub fn spacer_paragraphs(mut self, v: bool) -> Self {
        self.config.spacer_paragraphs = v;
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Md2DocxError> {
        let c = &self.config;
        if c.title.trim().is_empty() {
            return Err(Md2DocxError::InvalidConfig("Title must not be empty".into()));
        }
        if c.content_heading.trim().is_empty() {
            return Err(Md2DocxError::InvalidConfig("Content heading must not be empty".into()));
        }
        if c.concurrency == 0 {
            return Err(Md2DocxError::InvalidConfig("Concurrency must be ≥ 1".into()));
        }
        Ok(self.config)
    }
}
