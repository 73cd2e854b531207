//! Text extraction from uploaded contract bytes.
//!
//! Byte-level PDF and DOCX parsing lives behind [`DocumentTextExtractor`];
//! the bundled [`PlainTextExtractor`] handles `.txt` and rejects the rest.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ExtractionError;

/// Declared format of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ExtractionError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ExtractionError::UnsupportedFormat(path.display().to_string()))?;
        ext.parse()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Txt => "txt",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentFormat {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" | "doc" => Ok(Self::Docx),
            "txt" => Ok(Self::Txt),
            other => Err(ExtractionError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Converts raw document bytes into plain text.
pub trait DocumentTextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8], format: DocumentFormat) -> Result<String, ExtractionError>;
}

/// UTF-8 text extractor. PDF and DOCX are rejected as unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl DocumentTextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8], format: DocumentFormat) -> Result<String, ExtractionError> {
        if format != DocumentFormat::Txt {
            return Err(ExtractionError::BackendUnavailable(format));
        }
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        let text = String::from_utf8(bytes.to_vec())?;
        if text.trim().is_empty() {
            return Err(ExtractionError::Empty(format));
        }
        info!(%format, chars = text.chars().count(), "extracted document text");
        Ok(text)
    }
}

/// Read a file from disk and extract its text, detecting the format from its
/// extension unless `format` is given.
pub fn read_document(
    extractor: &dyn DocumentTextExtractor,
    path: &Path,
    format: Option<DocumentFormat>,
) -> Result<String, ExtractionError> {
    let format = match format {
        Some(f) => f,
        None => DocumentFormat::from_path(path)?,
    };
    let bytes = std::fs::read(path).map_err(|source| ExtractionError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    extractor.extract(&bytes, format)
}
