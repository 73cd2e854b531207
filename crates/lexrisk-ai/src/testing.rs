//! Scripted oracle for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use lexrisk_core::{
    ClauseComparison, ClauseJudgment, DocumentSummary, Favorability, OverallRisk, RiskScore,
    SpecificRisks, Verdict,
};

use crate::oracle::{AnalysisOracle, OracleError};

#[derive(Debug, Clone, Copy)]
pub enum ClauseScript {
    Score(u8),
    Fail,
    Delayed(Duration, u8),
}

/// Answers keyed by clause context ("Clause 2."); unscripted clauses score 3.
pub struct ScriptedOracle {
    overall: Option<OverallRisk>,
    clauses: HashMap<String, ClauseScript>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl ScriptedOracle {
    pub fn new(overall: OverallRisk) -> Self {
        Self {
            overall: Some(overall),
            clauses: HashMap::new(),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    /// Summary calls fail with an upstream error.
    pub fn failing_summary() -> Self {
        Self {
            overall: None,
            ..Self::new(OverallRisk::Low)
        }
    }

    pub fn clause(mut self, id: &str, script: ClauseScript) -> Self {
        self.clauses.insert(format!("Clause {id}"), script);
        self
    }

    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn clause_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn judgment(score: u8) -> ClauseJudgment {
    ClauseJudgment {
        explanation: format!("Scripted judgment scoring {score}."),
        risk_score: RiskScore::new(score).unwrap(),
        risk_reason: (score > 3).then(|| "Scripted reason".to_string()),
        favorable: Some(Favorability::Mutual),
        suggestion: (score > 5).then(|| "Scripted suggestion".to_string()),
    }
}

#[async_trait]
impl AnalysisOracle for ScriptedOracle {
    async fn summarize_document(&self, _text: &str) -> Result<DocumentSummary, OracleError> {
        let overall = self
            .overall
            .ok_or_else(|| OracleError::Upstream("summary unavailable".to_string()))?;
        Ok(DocumentSummary {
            summary: "Scripted summary.".to_string(),
            contract_type: "Services Agreement".to_string(),
            key_dates: vec!["2023-10-01".to_string()],
            key_obligations: vec!["Supplier delivers services".to_string()],
            overall_risk: overall,
            specific_risks: SpecificRisks {
                has_indemnity: true,
                ..Default::default()
            },
        })
    }

    async fn analyze_clause(
        &self,
        _text: &str,
        context: &str,
    ) -> Result<ClauseJudgment, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let script = self
            .clauses
            .get(context)
            .copied()
            .unwrap_or(ClauseScript::Score(3));
        let result = match script {
            ClauseScript::Score(s) => Ok(judgment(s)),
            ClauseScript::Fail => Err(OracleError::Malformed("scripted failure".to_string())),
            ClauseScript::Delayed(delay, s) => {
                tokio::time::sleep(delay).await;
                Ok(judgment(s))
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String, OracleError> {
        Ok(format!("{target_language}:{text}"))
    }

    async fn compare_clause_to_standard(
        &self,
        actual: &str,
        standard: &str,
    ) -> Result<ClauseComparison, OracleError> {
        let verdict = if actual == standard {
            Verdict::Fair
        } else {
            Verdict::Strict
        };
        Ok(ClauseComparison {
            similarity_score: if actual == standard { 100 } else { 40 },
            deviations: "Scripted deviations.".to_string(),
            verdict,
        })
    }

    async fn answer_question(&self, text: &str, question: &str) -> Result<String, OracleError> {
        Ok(format!("{} chars / {question}", text.chars().count()))
    }
}
