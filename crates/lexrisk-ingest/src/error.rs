use thiserror::Error;

use crate::DocumentFormat;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported document format: {0:?}")]
    UnsupportedFormat(String),

    #[error("no {0} text backend is available")]
    BackendUnavailable(DocumentFormat),

    #[error("document is not valid UTF-8 text: {0}")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),

    #[error("no text could be extracted from the {0} document")]
    Empty(DocumentFormat),

    #[error("cannot read document {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}
