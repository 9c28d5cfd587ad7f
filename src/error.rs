//! Error types for the md2docx library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Md2DocxError`] — **Fatal**: the conversion cannot proceed at all
//!   (input file missing, not UTF-8, the Word package could not be packed,
//!   output not writable). Returned as `Err(Md2DocxError)` from the
//!   top-level `convert*` functions.
//!
//! * [`FileError`] — **Non-fatal**: a single file inside a batch failed but
//!   every other file is fine. Stored inside [`crate::output::FileResult`]
//!   so one unreadable input does not abort the whole batch.
//!
//! Parsing and assembly have no error path at all: any string yields a
//! [`crate::document::Document`]. Malformed Markdown degrades to plain
//! text instead of failing.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the md2docx library.
#[derive(Debug, Error)]
pub enum Md2DocxError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Input file not found: '{path}'\nCheck the path exists and is readable.")]
    InputNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file was read but its bytes are not valid UTF-8.
    #[error("Input '{path}' is not valid UTF-8 (first bad byte at offset {offset})")]
    InvalidEncoding { path: PathBuf, offset: usize },

    /// Any other I/O failure while reading the input.
    #[error("Failed to read input '{path}': {source}")]
    InputReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Serializer errors ─────────────────────────────────────────────────
    /// The Word package could not be encoded into bytes.
    #[error("Failed to serialise .docx document: {detail}")]
    Serialization { detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output document.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Md2DocxError {
    /// Map an I/O error raised while reading `path` to the matching variant.
    pub(crate) fn from_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Md2DocxError::InputNotFound { path },
            std::io::ErrorKind::PermissionDenied => Md2DocxError::PermissionDenied { path },
            _ => Md2DocxError::InputReadFailed { path, source },
        }
    }
}

/// A non-fatal error for a single file in a batch.
///
/// The batch continues; the caller decides whether any failure is fatal.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum FileError {
    /// Reading or decoding the input failed.
    #[error("{input}: could not read input: {detail}")]
    ReadFailed { input: PathBuf, detail: String },

    /// Packing the Word document failed.
    #[error("{input}: could not serialise document: {detail}")]
    SerializeFailed { input: PathBuf, detail: String },

    /// The output file could not be written.
    #[error("{input}: could not write '{output}': {detail}")]
    WriteFailed {
        input: PathBuf,
        output: PathBuf,
        detail: String,
    },
}

impl FileError {
    /// Downgrade a fatal error into a per-file one for batch reporting.
    pub fn from_fatal(input: PathBuf, output: PathBuf, err: &Md2DocxError) -> Self {
        let detail = err.to_string();
        match err {
            Md2DocxError::InputNotFound { .. }
            | Md2DocxError::PermissionDenied { .. }
            | Md2DocxError::InvalidEncoding { .. }
            | Md2DocxError::InputReadFailed { .. } => FileError::ReadFailed { input, detail },
            Md2DocxError::Serialization { .. } => FileError::SerializeFailed { input, detail },
            _ => FileError::WriteFailed {
                input,
                output,
                detail,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization_display() {
        let e = Md2DocxError::Serialization {
            detail: "zip failure".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains(".docx"), "got: {msg}");
        assert!(msg.contains("zip failure"), "got: {msg}");
    }

    #[test]
    fn invalid_encoding_display() {
        let e = Md2DocxError::InvalidEncoding {
            path: PathBuf::from("scan.md"),
            offset: 17,
        };
        assert!(e.to_string().contains("offset 17"));
        assert!(e.to_string().contains("scan.md"));
    }

    #[test]
    fn from_read_maps_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let e = Md2DocxError::from_read("missing.txt", io);
        assert!(matches!(e, Md2DocxError::InputNotFound { .. }));
    }

    #[test]
    fn from_read_maps_permission_denied() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let e = Md2DocxError::from_read("locked.txt", io);
        assert!(matches!(e, Md2DocxError::PermissionDenied { .. }));
    }

    #[test]
    fn file_error_from_fatal_read() {
        let fatal = Md2DocxError::InputNotFound {
            path: PathBuf::from("a.md"),
        };
        let e = FileError::from_fatal("a.md".into(), "a.docx".into(), &fatal);
        assert!(matches!(e, FileError::ReadFailed { .. }));
        assert!(e.to_string().starts_with("a.md"));
    }

    #[test]
    fn file_error_from_fatal_write() {
        let fatal = Md2DocxError::OutputWriteFailed {
            path: PathBuf::from("out/a.docx"),
            source: std::io::Error::other("disk full"),
        };
        let e = FileError::from_fatal("a.md".into(), "out/a.docx".into(), &fatal);
        assert!(matches!(e, FileError::WriteFailed { .. }));
        assert!(e.to_string().contains("disk full"));
    }
}
