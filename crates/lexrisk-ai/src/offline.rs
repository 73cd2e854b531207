//! Deterministic oracle used when no API key is configured.

use async_trait::async_trait;
use lexrisk_core::{
    ClauseComparison, ClauseJudgment, DocumentSummary, OverallRisk, RiskScore, SpecificRisks,
    Verdict,
};

use crate::oracle::{AnalysisOracle, OracleError};

const PREVIEW_CHARS: usize = 100;

/// Canned judgments that let the pipeline run end to end offline.
///
/// Summaries carry `overall_risk = Unknown` and every clause scores 1, so the
/// composite score stays at the low base.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineOracle;

fn preview(text: &str) -> String {
    let mut out: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().nth(PREVIEW_CHARS).is_some() {
        out.push_str("...");
    }
    out
}

#[async_trait]
impl AnalysisOracle for OfflineOracle {
    async fn summarize_document(&self, _text: &str) -> Result<DocumentSummary, OracleError> {
        Ok(DocumentSummary {
            summary: "Offline summary: no API key configured.".to_string(),
            contract_type: "Unknown".to_string(),
            key_dates: Vec::new(),
            key_obligations: Vec::new(),
            overall_risk: OverallRisk::Unknown,
            specific_risks: SpecificRisks::default(),
        })
    }

    async fn analyze_clause(
        &self,
        _text: &str,
        _context: &str,
    ) -> Result<ClauseJudgment, OracleError> {
        let risk_score = RiskScore::new(1)
            .ok_or_else(|| OracleError::Malformed("offline risk score".to_string()))?;
        Ok(ClauseJudgment {
            explanation: "Offline analysis: no API key configured.".to_string(),
            risk_score,
            risk_reason: None,
            favorable: None,
            suggestion: None,
        })
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String, OracleError> {
        Ok(format!(
            "[Offline translation to {target_language}]: {}",
            preview(text)
        ))
    }

    async fn compare_clause_to_standard(
        &self,
        _actual: &str,
        _standard: &str,
    ) -> Result<ClauseComparison, OracleError> {
        Ok(ClauseComparison {
            similarity_score: 75,
            deviations: "Offline comparison: no API key configured.".to_string(),
            verdict: Verdict::Fair,
        })
    }

    async fn answer_question(&self, _text: &str, _question: &str) -> Result<String, OracleError> {
        Ok("Offline mode: no API key configured, unable to answer.".to_string())
    }
}
