//! Core contract-analysis types, heading segmentation, and composite risk scoring.

pub mod config;
pub mod error;
pub mod report;
pub mod result;
pub mod risk;
pub mod segment;
pub mod templates;
pub mod types;

pub use config::{PipelineConfig, truncate_chars};
pub use error::{AssemblyError, ConfigError, RenderError, Stage};
pub use report::ReportRenderer;
pub use result::{AnalysisResult, AnalysisSession, ResultAssembler};
pub use risk::{RiskAggregator, RiskWeights};
pub use segment::{ClauseSegmenter, Heading, HeadingKind};
pub use templates::{AgreementTemplate, ClauseArchetype};
pub use types::{
    ClauseAnalysis, ClauseComparison, ClauseJudgment, ClauseOutcome, ClauseUnit, CompositeRisk,
    DocumentSummary, EntityBundle, EntitySet, Favorability, OverallRisk, PREAMBLE_ID, RiskBasis,
    RiskLevel, RiskScore, SpecificRisks, Verdict,
};
