//! Analysis layer: oracle contract and clients, entity extraction, clause
//! batching, and the end-to-end pipeline.

mod batcher;
mod entities;
mod offline;
mod oracle;
mod pipeline;
pub mod prompts;
pub mod validate;

#[cfg(feature = "http")]
pub mod http;

#[cfg(test)]
mod testing;

pub use batcher::ClauseAnalysisBatcher;
pub use entities::{EntityExtractor, PatternEntityExtractor};
pub use offline::OfflineOracle;
pub use oracle::{AnalysisOracle, OracleError, with_timeout};
pub use pipeline::{ContractAnalyzer, PipelineError};

#[cfg(feature = "http")]
pub use http::HttpOracle;
