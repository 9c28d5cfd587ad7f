//! CLI binary for md2docx.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and reports results.

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use md2docx::{
    convert, convert_batch, convert_file, default_output_name, output_path_for, write_atomic,
    BatchProgressCallback, ConversionConfig, ConversionOutput, ConversionStats, ProgressCallback,
    DEFAULT_CONTENT_HEADING, DEFAULT_TITLE,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback for batch runs: one bar over all files plus a
/// log line per finished file. Files complete out of order.
struct CliProgressCallback {
    bar: ProgressBar,
    errors: AtomicUsize,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} files  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(style);
        bar.set_prefix("Converting");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            errors: AtomicUsize::new(0),
        })
    }
}

impl BatchProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total_files: usize) {
        self.bar.set_length(total_files as u64);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Converting {total_files} files…"))
        ));
    }

    fn on_file_start(&self, input: &Path, _total_files: usize) {
        self.bar.set_message(input.display().to_string());
    }

    fn on_file_complete(&self, input: &Path, _total_files: usize, docx_bytes: usize) {
        self.bar.println(format!(
            "  {} {}  {}",
            green("✓"),
            input.display(),
            dim(&format!("{docx_bytes:>7} bytes")),
        ));
        self.bar.inc(1);
    }

    fn on_file_error(&self, input: &Path, _total_files: usize, error: &str) {
        self.errors.fetch_add(1, Ordering::SeqCst);

        // Truncate very long error messages to keep output tidy.
        let msg = match error.char_indices().nth(79) {
            Some((cut, _)) => format!("{}\u{2026}", &error[..cut]),
            None => error.to_string(),
        };

        self.bar.println(format!(
            "  {} {}  {}",
            red("✗"),
            input.display(),
            red(&msg)
        ));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, total_files: usize, success_count: usize) {
        let failed = total_files.saturating_sub(success_count);
        self.bar.finish_and_clear();

        if failed == 0 {
            eprintln!(
                "{} {} files converted successfully",
                green("✔"),
                bold(&success_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} files converted  ({} failed)",
                if failed == total_files {
                    red("✘")
                } else {
                    cyan("⚠")
                },
                bold(&success_count.to_string()),
                total_files,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert model output piped from another tool
  vision-ocr scan.png | md2docx -o scan.docx

  # Convert a saved text file (writes notes.docx next to it)
  md2docx notes.md

  # Convert many files into one directory, 8 at a time
  md2docx --out-dir docs/ -c 8 pages/*.md

  # Inspect how the text is classified, without writing a document
  md2docx --json notes.md

  # Stdin with no -o: timestamped name like the download button
  md2docx < extracted.txt        # → extracted_text_20250101_120000.docx

ACCEPTED MARKDOWN:
  # / ## / ###        Heading 1–3 (#### and deeper count as level 3)
  - item / * item     Bulleted list
  1. item … 9. item   Numbered list (single digit prefixes only)
  **bold**            Bold run (unclosed ** is kept as literal text)
  | a | b |           Table; first row bold, |---| separator rows dropped

ENVIRONMENT VARIABLES:
  MD2DOCX_OUTPUT, MD2DOCX_OUT_DIR, MD2DOCX_TITLE, MD2DOCX_CONTENT_HEADING,
  MD2DOCX_CONCURRENCY, MD2DOCX_VERBOSE, MD2DOCX_QUIET
  RUST_LOG            Overrides the log filter (e.g. RUST_LOG=md2docx=debug)
"#;

/// Render vision-model Markdown output into Word documents.
#[derive(Parser, Debug)]
#[command(
    name = "md2docx",
    version,
    about = "Render vision-model Markdown output into Word (.docx) documents",
    long_about = "Convert the Markdown-flavoured text produced by OCR / vision models (headings, \
bullet and numbered lists, **bold** spans and pipe tables) into a structured Word document.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Text files to convert. `-` or no argument reads stdin.
    inputs: Vec<PathBuf>,

    /// Write the document here (single input only). `-` writes to stdout.
    #[arg(short, long, env = "MD2DOCX_OUTPUT", conflicts_with = "out_dir")]
    output: Option<PathBuf>,

    /// Directory for output documents (one `<stem>.docx` per input).
    #[arg(long, env = "MD2DOCX_OUT_DIR")]
    out_dir: Option<PathBuf>,

    /// Document title.
    #[arg(long, env = "MD2DOCX_TITLE", default_value = DEFAULT_TITLE)]
    title: String,

    /// Heading placed above the converted content.
    #[arg(long, env = "MD2DOCX_CONTENT_HEADING", default_value = DEFAULT_CONTENT_HEADING)]
    content_heading: String,

    /// Do not strip outer code fences, CRLF and zero-width characters.
    #[arg(long)]
    no_clean: bool,

    /// Do not bold table header rows.
    #[arg(long)]
    no_header_bold: bool,

    /// Omit spacer paragraphs after the timestamp and after tables.
    #[arg(long)]
    no_spacing: bool,

    /// Print the assembled document structure and stats as JSON instead of writing .docx.
    #[arg(long)]
    json: bool,

    /// Also save the input text as a .txt next to the .docx (stdin input only).
    #[arg(long)]
    emit_txt: bool,

    /// Number of files converted concurrently.
    #[arg(short, long, env = "MD2DOCX_CONCURRENCY", default_value_t = 4)]
    concurrency: usize,

    /// Disable progress bar.
    #[arg(long)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MD2DOCX_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MD2DOCX_QUIET")]
    quiet: bool,
}

impl Cli {
    fn reads_stdin(&self) -> bool {
        self.inputs.is_empty() || (self.inputs.len() == 1 && self.inputs[0] == Path::new("-"))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar covers batch runs; keep library INFO logs out of its way.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && cli.inputs.len() > 1;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn BatchProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb)?;

    if cli.reads_stdin() {
        return run_stdin(&cli, &config).await;
    }

    if cli.emit_txt {
        tracing::warn!("--emit-txt only applies to stdin input; ignoring it for files");
    }

    if cli.json {
        return print_json_for_files(&cli.inputs, &config).await;
    }

    if cli.inputs.len() == 1 {
        let input = &cli.inputs[0];
        let output = cli
            .output
            .clone()
            .unwrap_or_else(|| output_path_for(input, cli.out_dir.as_deref()));
        let stats = convert_file(input, &output, &config)
            .await
            .with_context(|| format!("Conversion of {} failed", input.display()))?;
        report(&cli, &stats, &output);
        return Ok(());
    }

    if cli.output.is_some() {
        anyhow::bail!("--output accepts a single input; use --out-dir for several files");
    }

    let jobs: Vec<(PathBuf, PathBuf)> = cli
        .inputs
        .iter()
        .map(|input| (input.clone(), output_path_for(input, cli.out_dir.as_deref())))
        .collect();

    let results = convert_batch(&jobs, &config).await;
    let failed: Vec<_> = results.iter().filter_map(|r| r.error.as_ref()).collect();

    if !cli.quiet && !show_progress {
        for result in &results {
            if let Some(ref stats) = result.stats {
                report(&cli, stats, &result.output);
            }
        }
    }
    if !failed.is_empty() {
        for err in &failed {
            eprintln!("{} {}", red("✗"), err);
        }
        anyhow::bail!("{}/{} files failed", failed.len(), results.len());
    }
    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder()
        .title(cli.title.as_str())
        .content_heading(cli.content_heading.as_str())
        .clean_input(!cli.no_clean)
        .bold_table_header(!cli.no_header_bold)
        .spacer_paragraphs(!cli.no_spacing)
        .concurrency(cli.concurrency);

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Convert text read from stdin.
async fn run_stdin(cli: &Cli, config: &ConversionConfig) -> Result<()> {
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("Failed to read stdin (is it UTF-8?)")?;

    let output = convert(&text, config).context("Conversion failed")?;

    if cli.json {
        return print_json(&output);
    }

    let target = match (&cli.output, &cli.out_dir) {
        (Some(path), _) => path.clone(),
        (None, Some(dir)) => dir.join(default_output_name(Local::now().naive_local())),
        (None, None) => PathBuf::from(default_output_name(Local::now().naive_local())),
    };

    if target == Path::new("-") {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(&output.docx)
            .context("Failed to write to stdout")?;
        return Ok(());
    }

    write_atomic(&target, &output.docx).await?;

    if cli.emit_txt {
        let txt = target.with_extension("txt");
        tokio::fs::write(&txt, &text)
            .await
            .with_context(|| format!("Failed to write {}", txt.display()))?;
    }

    report(cli, &output.stats, &target);
    Ok(())
}

/// `--json` for file inputs: one entry per file, as an array.
async fn print_json_for_files(inputs: &[PathBuf], config: &ConversionConfig) -> Result<()> {
    let mut entries = Vec::with_capacity(inputs.len());
    for input in inputs {
        let text = tokio::fs::read_to_string(input)
            .await
            .with_context(|| format!("Failed to read {}", input.display()))?;
        let output = convert(&text, config)
            .with_context(|| format!("Conversion of {} failed", input.display()))?;
        entries.push(file_json(input, &output)?);
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&entries).context("Failed to serialise output")?
    );
    Ok(())
}

/// The stdin `--json` shape (`document` + `stats`) tagged with its input path.
fn file_json(input: &Path, output: &ConversionOutput) -> Result<serde_json::Value> {
    let mut value = serde_json::to_value(output).context("Failed to serialise output")?;
    if let Some(map) = value.as_object_mut() {
        map.insert("input".into(), serde_json::json!(input));
    }
    Ok(value)
}

fn print_json(output: &ConversionOutput) -> Result<()> {
    let json = serde_json::to_string_pretty(output).context("Failed to serialise output")?;
    println!("{json}");
    Ok(())
}

fn report(cli: &Cli, stats: &ConversionStats, output: &Path) {
    if cli.quiet {
        return;
    }
    eprintln!(
        "{}  {} blocks  {}  →  {}",
        green("✔"),
        stats.blocks(),
        dim(&format!(
            "{} headings, {} list items, {} tables, {}ms",
            stats.headings,
            stats.bullet_items + stats.numbered_items,
            stats.tables,
            stats.duration_ms
        )),
        bold(&output.display().to_string()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_json_matches_stdin_shape_plus_input() {
        let config = ConversionConfig::default();
        let output = convert("# Title\n- item", &config).unwrap();

        let stdin = serde_json::to_value(&output).unwrap();
        let file = file_json(Path::new("scans/page1.md"), &output).unwrap();

        assert_eq!(file["input"], "scans/page1.md");
        assert_eq!(file["document"], stdin["document"]);
        assert_eq!(file["stats"], stdin["stats"]);
        assert_eq!(file["stats"]["headings"], 1);
        assert_eq!(file["stats"]["bullet_items"], 1);
    }
}
