//! Conversation export to a word-processor document.
//!
//! Export runs in one synchronous pass over the transcript:
//!
//! - [`builder`] walks the turns and emits styled blocks,
//! - [`classify`] decides what each line of a reply renders as,
//! - [`inline`] splits text runs into bold and plain spans,
//! - [`docx`] packs the finished [`Document`] into `.docx` bytes.
//!
//! Classification is total, so content never makes an export fail; only
//! packing or writing the bytes can.

pub mod builder;
pub mod classify;
pub mod docx;
pub mod document;
pub mod inline;

use std::fs;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;

use crate::error::{Error, Result};
use crate::observability::{EXPORTS, EXPORT_BLOCKS, EXPORT_BYTES, EXPORT_ERRORS};
use crate::transcript::Transcript;

pub use builder::{DocumentBuilder, build_document, looks_like_code};
pub use classify::{FenceState, LineClass, classify_line, classify_reply};
pub use document::{Block, Color, Document, ListKind, Span};
pub use inline::{BOLD_MARKER, format_spans};

/// MIME type of the exported document.
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// A finished export, held in memory.
#[derive(Debug, Clone)]
pub struct Export {
    file_name: String,
    bytes: Vec<u8>,
}

impl Export {
    /// The suggested file name, stamped with the generation time.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The MIME type of the bytes.
    pub fn mime_type(&self) -> &'static str {
        DOCX_MIME_TYPE
    }

    /// The document bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the export, returning the bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Writes the document into `dir` under its file name and returns the full path.
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        self.write_to(&path)?;
        Ok(path)
    }

    /// Writes the document to exactly `path`.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path.as_ref(), &self.bytes).map_err(|err| {
            EXPORT_ERRORS.click();
            Error::io(
                format!("failed to write {}", path.as_ref().display()),
                err,
            )
        })
    }
}

/// The file name of an export generated at `generated_at`.
pub fn file_name(generated_at: OffsetDateTime) -> String {
    format!("IIB_Analysis_{}.docx", generated_at.unix_timestamp())
}

/// Builds and packs the document for `transcript`.
pub fn export_transcript(transcript: &Transcript, generated_at: OffsetDateTime) -> Result<Export> {
    let document = build_document(transcript, generated_at);
    EXPORT_BLOCKS.count(document.len() as u64);
    let bytes = docx::write_docx(&document).inspect_err(|_| EXPORT_ERRORS.click())?;
    EXPORTS.click();
    EXPORT_BYTES.count(bytes.len() as u64);
    Ok(Export {
        file_name: file_name(generated_at),
        bytes,
    })
}
