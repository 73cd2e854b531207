use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Pipeline stage whose output an [`AnalysisResult`](crate::AnalysisResult) needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Text,
    Entities,
    Summary,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Text => "text extraction",
            Self::Entities => "entity extraction",
            Self::Summary => "document summary",
        })
    }
}

#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("cannot assemble result: {0} is missing")]
    Missing(Stage),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("report serialisation failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("report formatting failed: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("{0}")]
    Other(String),
}
