//! Assembly of a finished analysis and the session slot that holds it.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AssemblyError, Stage};
use crate::risk::{RiskAggregator, RiskWeights};
use crate::types::{ClauseAnalysis, ClauseUnit, CompositeRisk, DocumentSummary, EntityBundle};

/// Everything one analysis run produced.
///
/// Immutable once assembled; a later run supersedes it rather than patching it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    text: String,
    entities: EntityBundle,
    summary: DocumentSummary,
    /// All segmented clauses, including those beyond the analysis cap.
    clause_units: Vec<ClauseUnit>,
    clauses: Vec<ClauseAnalysis>,
    composite_risk: CompositeRisk,
}

impl AnalysisResult {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn entities(&self) -> &EntityBundle {
        &self.entities
    }

    pub fn summary(&self) -> &DocumentSummary {
        &self.summary
    }

    pub fn clause_units(&self) -> &[ClauseUnit] {
        &self.clause_units
    }

    pub fn clauses(&self) -> &[ClauseAnalysis] {
        &self.clauses
    }

    pub fn composite_risk(&self) -> CompositeRisk {
        self.composite_risk
    }

    /// Segmented clauses that were not sent for per-clause analysis.
    pub fn unanalysed_units(&self) -> &[ClauseUnit] {
        let analysed = self.clauses.len().min(self.clause_units.len());
        &self.clause_units[analysed..]
    }

    /// Number of clause analyses that failed.
    pub fn failed_clause_count(&self) -> usize {
        self.clauses.iter().filter(|c| c.error().is_some()).count()
    }
}

/// Collects stage outputs and produces an [`AnalysisResult`].
///
/// Scoring only happens in [`finish`](Self::finish), after text, entities, and
/// the document summary have all been supplied.
#[derive(Debug, Default)]
pub struct ResultAssembler {
    text: Option<String>,
    entities: Option<EntityBundle>,
    summary: Option<DocumentSummary>,
    clause_units: Vec<ClauseUnit>,
    clauses: Vec<ClauseAnalysis>,
}

impl ResultAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: String) -> Self {
        self.text = Some(text);
        self
    }

    pub fn entities(mut self, entities: EntityBundle) -> Self {
        self.entities = Some(entities);
        self
    }

    pub fn summary(mut self, summary: DocumentSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn clause_units(mut self, units: Vec<ClauseUnit>) -> Self {
        self.clause_units = units;
        self
    }

    pub fn clauses(mut self, clauses: Vec<ClauseAnalysis>) -> Self {
        self.clauses = clauses;
        self
    }

    pub fn finish(self, weights: &RiskWeights) -> Result<AnalysisResult, AssemblyError> {
        let text = self.text.ok_or(AssemblyError::Missing(Stage::Text))?;
        let entities = self.entities.ok_or(AssemblyError::Missing(Stage::Entities))?;
        let summary = self.summary.ok_or(AssemblyError::Missing(Stage::Summary))?;

        let composite_risk =
            RiskAggregator::new(*weights).assess(&self.clauses, summary.overall_risk);
        info!(
            score = composite_risk.score,
            level = %composite_risk.level,
            clauses = self.clauses.len(),
            "assembled analysis result"
        );

        Ok(AnalysisResult {
            text,
            entities,
            summary,
            clause_units: self.clause_units,
            clauses: self.clauses,
            composite_risk,
        })
    }
}

/// The invoking session's "current analysis" reference.
///
/// Each completed run replaces the whole result; readers holding an earlier
/// `Arc` keep a consistent snapshot.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    current: RwLock<Option<Arc<AnalysisResult>>>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Arc<AnalysisResult>> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Install `result` as current, returning the superseded one.
    pub fn replace(&self, result: AnalysisResult) -> Option<Arc<AnalysisResult>> {
        let mut slot = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        slot.replace(Arc::new(result))
    }

    pub fn clear(&self) -> Option<Arc<AnalysisResult>> {
        self.current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
    }
}
