//! Document ingestion: format detection and text extraction.

mod error;
mod extract;

pub use error::ExtractionError;
pub use extract::{DocumentFormat, DocumentTextExtractor, PlainTextExtractor, read_document};
