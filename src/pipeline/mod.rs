//! Pipeline stages for Markdown-to-Word conversion.
//!
//! Each submodule implements exactly one transformation step and is
//! independently testable. Only [`serialize`] knows about the output format.
//!
//! ## Data Flow
//!
//! ```text
//! text ──▶ normalise ──▶ assemble ──────────────────▶ serialize
//!                         │  classify (per line)       (docx-rs)
//!                         │  inline   (per block)
//!                         └─ table    (per table run)
//! ```
//!
//! 1. [`normalise`] — strip outer fences, CRLF and zero-width characters
//! 2. [`classify`]  — decide the block kind of one trimmed line
//! 3. [`inline`]    — split a line into normal and bold segments
//! 4. [`table`]     — turn a run of pipe-delimited lines into a grid
//! 5. [`assemble`]  — the single forward scan producing a `Document`
//! 6. [`serialize`] — write the document through a `DocumentWriter`

pub mod assemble;
pub mod classify;
pub mod inline;
pub mod normalise;
pub mod serialize;
pub mod table;
