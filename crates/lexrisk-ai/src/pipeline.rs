//! End-to-end contract analysis.

use std::sync::Arc;

use lexrisk_core::{
    AnalysisResult, AssemblyError, ClauseArchetype, ClauseComparison, ClauseSegmenter,
    PipelineConfig, ResultAssembler, Stage, truncate_chars,
};
use lexrisk_ingest::{DocumentFormat, DocumentTextExtractor, ExtractionError};
use thiserror::Error;
use tracing::info;

use crate::batcher::ClauseAnalysisBatcher;
use crate::entities::EntityExtractor;
use crate::oracle::{AnalysisOracle, OracleError, with_timeout};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("text extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("entity extraction failed: {0}")]
    Entities(String),

    #[error("document summary failed: {0}")]
    Summary(OracleError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error("oracle call failed: {0}")]
    Oracle(#[from] OracleError),
}

impl PipelineError {
    /// The pipeline stage that failed, for stage-level errors.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Extraction(_) => Some(Stage::Text),
            Self::Entities(_) => Some(Stage::Entities),
            Self::Summary(_) => Some(Stage::Summary),
            Self::Assembly(AssemblyError::Missing(stage)) => Some(*stage),
            Self::Oracle(_) => None,
        }
    }
}

/// Runs extraction, segmentation, entity extraction, summary, clause
/// analysis, and assembly for one document.
pub struct ContractAnalyzer {
    oracle: Arc<dyn AnalysisOracle>,
    entities: Arc<dyn EntityExtractor>,
    segmenter: ClauseSegmenter,
    batcher: ClauseAnalysisBatcher,
    config: PipelineConfig,
}

impl ContractAnalyzer {
    pub fn new(
        oracle: Arc<dyn AnalysisOracle>,
        entities: Arc<dyn EntityExtractor>,
        config: PipelineConfig,
    ) -> Self {
        let batcher = ClauseAnalysisBatcher::from_config(oracle.clone(), &config);
        Self {
            oracle,
            entities,
            segmenter: ClauseSegmenter::new(),
            batcher,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn segmenter(&self) -> &ClauseSegmenter {
        &self.segmenter
    }

    pub async fn analyze_bytes(
        &self,
        extractor: &dyn DocumentTextExtractor,
        bytes: &[u8],
        format: DocumentFormat,
    ) -> Result<AnalysisResult, PipelineError> {
        let text = extractor.extract(bytes, format)?;
        self.analyze_text(text).await
    }

    /// Analyse already-extracted text.
    ///
    /// Entity extraction, the document summary and the clause batch run
    /// concurrently. A summary failure ends the run and abandons any clause
    /// calls still in flight; clause failures are recorded on the result.
    pub async fn analyze_text(&self, text: String) -> Result<AnalysisResult, PipelineError> {
        let units = self.segmenter.segment(&text);
        info!(
            chars = text.chars().count(),
            clauses = units.len(),
            cap = self.batcher.cap(),
            "analysing contract"
        );

        let entities = {
            let extractor = Arc::clone(&self.entities);
            let owned = text.clone();
            async move {
                tokio::task::spawn_blocking(move || extractor.extract(&owned))
                    .await
                    .map_err(|e| PipelineError::Entities(e.to_string()))
            }
        };

        let summary = async {
            let capped = truncate_chars(&text, self.config.summary_char_limit);
            with_timeout(
                self.config.oracle_timeout(),
                self.oracle.summarize_document(capped),
            )
            .await
            .map_err(PipelineError::Summary)
        };

        let clauses = async { Ok::<_, PipelineError>(self.batcher.analyze_batch(&units).await) };

        let (entities, summary, clauses) = tokio::try_join!(entities, summary, clauses)?;

        let result = ResultAssembler::new()
            .text(text)
            .entities(entities)
            .summary(summary)
            .clause_units(units)
            .clauses(clauses)
            .finish(&self.config.weights)?;
        Ok(result)
    }

    /// Compare a clause against the market-standard text for `archetype`.
    pub async fn compare(
        &self,
        actual: &str,
        archetype: ClauseArchetype,
    ) -> Result<ClauseComparison, PipelineError> {
        let call = self
            .oracle
            .compare_clause_to_standard(actual, archetype.standard_text());
        let comparison = with_timeout(self.config.oracle_timeout(), call).await?;
        info!(
            %archetype,
            similarity = comparison.similarity_score,
            verdict = %comparison.verdict,
            "compared clause to standard"
        );
        Ok(comparison)
    }

    pub async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, PipelineError> {
        let capped = truncate_chars(text, self.config.translation_char_limit);
        let call = self.oracle.translate(capped, target_language);
        Ok(with_timeout(self.config.oracle_timeout(), call).await?)
    }

    /// Answer a question from the contract text alone.
    pub async fn ask(&self, text: &str, question: &str) -> Result<String, PipelineError> {
        let capped = truncate_chars(text, self.config.question_char_limit);
        let call = self.oracle.answer_question(capped, question);
        Ok(with_timeout(self.config.oracle_timeout(), call).await?)
    }
}
