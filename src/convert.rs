//! Conversion entry points.
//!
//! [`convert`] is the pure core: text in, assembled [`Document`] plus
//! encoded `.docx` bytes out, no I/O. The async functions wrap it with file
//! handling: reading UTF-8 input, running the conversion on the blocking
//! pool, and writing output atomically (temp file + rename) so a crash never
//! leaves a truncated `.docx` behind.

use crate::config::ConversionConfig;
use crate::document::Document;
use crate::error::{FileError, Md2DocxError};
use crate::output::{ConversionOutput, ConversionStats, FileResult};
use crate::pipeline::{assemble, normalise, serialize};
use chrono::{Local, NaiveDateTime};
use futures::stream::{self, StreamExt};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert Markdown-subset text into a Word document.
///
/// This is the primary entry point for the library. Parsing never fails;
/// the only error is a failure to encode the Word package.
///
/// With the default `clean_input`, the blocks can differ from
/// [`crate::assemble`] on the raw text: an outer code fence is unwrapped and
/// invisible characters are removed before classification.
///
/// # Errors
/// Returns [`Md2DocxError::Serialization`] if the package cannot be packed.
pub fn convert(
    text: impl AsRef<str>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2DocxError> {
    let start = Instant::now();
    let text = prepare(text.as_ref(), config);
    let input_lines = text.lines().count();
    let document = stamp(&text, config);

    let docx = serialize::render_docx(&document, config)?;

    let mut stats = ConversionStats::from_blocks(input_lines, &document.blocks);
    stats.docx_bytes = docx.len();
    stats.duration_ms = start.elapsed().as_millis() as u64;

    info!(
        "Converted {} lines into {} blocks ({} tables), {} bytes in {}ms",
        stats.input_lines,
        stats.blocks(),
        stats.tables,
        stats.docx_bytes,
        stats.duration_ms
    );

    Ok(ConversionOutput {
        document,
        docx,
        stats,
    })
}

/// Assemble `text` into a [`Document`] without encoding it.
///
/// Applies the config's title, timestamp and input normalisation.
pub fn build_document(text: &str, config: &ConversionConfig) -> Document {
    stamp(&prepare(text, config), config)
}

/// Convert `text` and write the `.docx` to `output_path`.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn convert_to_file(
    text: impl AsRef<str>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, Md2DocxError> {
    let output = convert(text, config)?;
    write_atomic(output_path.as_ref(), &output.docx).await?;
    Ok(output.stats)
}

/// Read a UTF-8 text file, convert it and write the `.docx`.
///
/// The conversion itself runs inside `spawn_blocking`: it is CPU-bound and
/// large inputs should not stall the async workers.
pub async fn convert_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, Md2DocxError> {
    let input_path = input_path.as_ref();
    let output_path = output_path.as_ref();
    debug!("Reading {}", input_path.display());

    let text = read_text(input_path).await?;
    let config_clone = config.clone();
    let output = tokio::task::spawn_blocking(move || convert(&text, &config_clone))
        .await
        .map_err(|e| Md2DocxError::Internal(format!("Conversion task panicked: {}", e)))??;

    write_atomic(output_path, &output.docx).await?;
    info!(
        "{} -> {} ({} bytes)",
        input_path.display(),
        output_path.display(),
        output.stats.docx_bytes
    );
    Ok(output.stats)
}

/// Synchronous wrapper around [`convert_file`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_file_sync(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, Md2DocxError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Md2DocxError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert_file(input_path, output_path, config))
}

/// Convert many `(input, output)` pairs concurrently.
///
/// At most `config.concurrency` files are in flight. A failing file never
/// aborts the batch: its [`FileResult`] carries a [`FileError`] instead.
/// Results come back in job order.
pub async fn convert_batch(
    jobs: &[(PathBuf, PathBuf)],
    config: &ConversionConfig,
) -> Vec<FileResult> {
    let total = jobs.len();
    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(total);
    }

    let mut results: Vec<(usize, FileResult)> =
        stream::iter(jobs.iter().enumerate().map(|(idx, (input, output))| {
            let config_clone = config.clone();
            async move {
                if let Some(ref cb) = config_clone.progress_callback {
                    cb.on_file_start(input, total);
                }
                let result = match convert_file(input, output, &config_clone).await {
                    Ok(stats) => {
                        if let Some(ref cb) = config_clone.progress_callback {
                            cb.on_file_complete(input, total, stats.docx_bytes);
                        }
                        FileResult {
                            input: input.clone(),
                            output: output.clone(),
                            stats: Some(stats),
                            error: None,
                        }
                    }
                    Err(e) => {
                        warn!("{}: {}", input.display(), e);
                        let err = FileError::from_fatal(input.clone(), output.clone(), &e);
                        if let Some(ref cb) = config_clone.progress_callback {
                            cb.on_file_error(input, total, &err.to_string());
                        }
                        FileResult {
                            input: input.clone(),
                            output: output.clone(),
                            stats: None,
                            error: Some(err),
                        }
                    }
                };
                (idx, result)
            }
        }))
        .buffer_unordered(config.concurrency.max(1))
        .collect()
        .await;

    results.sort_by_key(|(idx, _)| *idx);
    let results: Vec<FileResult> = results.into_iter().map(|(_, r)| r).collect();

    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    info!("Batch complete: {}/{} files converted", succeeded, total);
    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_complete(total, succeeded);
    }

    results
}

/// Download-style file name: `extracted_text_YYYYMMDD_HHMMSS.docx`.
pub fn default_output_name(now: NaiveDateTime) -> String {
    format!("extracted_text_{}.docx", now.format("%Y%m%d_%H%M%S"))
}

/// Output path for `input`: same stem with a `.docx` extension, placed in
/// `out_dir` when given, otherwise next to the input.
pub fn output_path_for(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let file_name = input
        .file_stem()
        .map(|stem| {
            let mut name = stem.to_os_string();
            name.push(".docx");
            PathBuf::from(name)
        })
        .unwrap_or_else(|| PathBuf::from("output.docx"));

    match out_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}

/// Write encoded document `bytes` to `path` through a sibling temp file and
/// a rename, creating parent directories as needed.
pub async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), Md2DocxError> {
    let write_err = |source| Md2DocxError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let tmp_path = path.with_extension("docx.tmp");
    tokio::fs::write(&tmp_path, bytes).await.map_err(write_err)?;
    tokio::fs::rename(&tmp_path, path).await.map_err(write_err)?;
    Ok(())
}

// ── Internal helpers ─────────────────────────────────────────────────────

fn prepare<'a>(text: &'a str, config: &ConversionConfig) -> Cow<'a, str> {
    if config.clean_input {
        Cow::Owned(normalise::normalise_input(text))
    } else {
        Cow::Borrowed(text)
    }
}

/// Assemble already-prepared text with the config's title and timestamp.
fn stamp(text: &str, config: &ConversionConfig) -> Document {
    let generated_at = config
        .generated_at
        .unwrap_or_else(|| Local::now().naive_local());
    assemble::assemble_at(text, &config.title, generated_at)
}

/// Read `path` as UTF-8 text.
async fn read_text(path: &Path) -> Result<String, Md2DocxError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| Md2DocxError::from_read(path, e))?;
    String::from_utf8(bytes).map_err(|e| Md2DocxError::InvalidEncoding {
        path: path.to_path_buf(),
        offset: e.utf8_error().valid_up_to(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, 31)
            .and_then(|d| d.and_hms_opt(23, 59, 58))
            .unwrap()
    }

    #[test]
    fn default_output_name_format() {
        assert_eq!(
            default_output_name(fixed()),
            "extracted_text_20251231_235958.docx"
        );
    }

    #[test]
    fn output_path_next_to_input() {
        assert_eq!(
            output_path_for(Path::new("scans/page1.md"), None),
            PathBuf::from("scans/page1.docx")
        );
    }

    #[test]
    fn output_path_in_out_dir() {
        assert_eq!(
            output_path_for(Path::new("scans/page1.txt"), Some(Path::new("out"))),
            PathBuf::from("out/page1.docx")
        );
    }

    #[test]
    fn build_document_uses_config() {
        let config = ConversionConfig::builder()
            .title("Receipt")
            .generated_at(fixed())
            .build()
            .unwrap();
        let doc = build_document("# Total", &config);
        assert_eq!(doc.title, "Receipt");
        assert_eq!(doc.generated_at, fixed());
        assert_eq!(doc.blocks.len(), 1);
    }

    #[test]
    fn fenced_input_is_unwrapped_only_when_cleaning() {
        let text = "```markdown\n# Title\n```";
        let cleaned = build_document(text, &ConversionConfig::default());
        assert_eq!(cleaned.blocks.len(), 1);

        let raw_config = ConversionConfig::builder().clean_input(false).build().unwrap();
        let raw = build_document(text, &raw_config);
        // The fence lines become paragraphs of their own.
        assert_eq!(raw.blocks.len(), 3);
    }

    #[test]
    fn cleaning_can_change_classification() {
        let text = "\u{200B}# Title";
        assert!(matches!(
            assemble::assemble(text).blocks[0],
            crate::document::Block::Paragraph { .. }
        ));
        let out = convert(text, &ConversionConfig::default()).unwrap();
        assert!(matches!(
            out.document.blocks[0],
            crate::document::Block::Heading { level: 1, .. }
        ));
    }

    #[test]
    fn convert_empty_text_produces_preamble_only() {
        let out = convert("", &ConversionConfig::default()).unwrap();
        assert!(out.document.blocks.is_empty());
        assert_eq!(out.stats.blocks(), 0);
        assert!(out.stats.docx_bytes > 0);
        assert_eq!(out.stats.docx_bytes, out.docx.len());
    }
}
