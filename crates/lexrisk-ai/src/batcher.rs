//! Concurrent per-clause analysis.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use lexrisk_core::{ClauseAnalysis, ClauseUnit, PipelineConfig};
use tracing::{info, warn};

use crate::oracle::{AnalysisOracle, with_timeout};

/// Sends the leading clauses of a document to the oracle, one call each.
///
/// Calls run concurrently and are collected in input order. A failed or
/// timed-out call is recorded on its clause and never aborts the batch.
/// Dropping the future returned by [`analyze_batch`](Self::analyze_batch)
/// abandons any calls still in flight.
pub struct ClauseAnalysisBatcher {
    oracle: Arc<dyn AnalysisOracle>,
    cap: usize,
    timeout: Duration,
}

impl ClauseAnalysisBatcher {
    pub fn new(oracle: Arc<dyn AnalysisOracle>, cap: usize, timeout: Duration) -> Self {
        Self {
            oracle,
            cap,
            timeout,
        }
    }

    pub fn from_config(oracle: Arc<dyn AnalysisOracle>, config: &PipelineConfig) -> Self {
        Self::new(oracle, config.clause_cap, config.oracle_timeout())
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub async fn analyze_batch(&self, units: &[ClauseUnit]) -> Vec<ClauseAnalysis> {
        let take = units.len().min(self.cap);
        let analyses = join_all(units[..take].iter().map(|u| self.analyze_one(u))).await;

        let failed = analyses.iter().filter(|a| a.error().is_some()).count();
        info!(
            analysed = analyses.len(),
            failed,
            skipped = units.len() - take,
            "clause batch complete"
        );
        analyses
    }

    async fn analyze_one(&self, unit: &ClauseUnit) -> ClauseAnalysis {
        let context = format!("Clause {}", unit.id);
        let call = self.oracle.analyze_clause(&unit.text, &context);
        match with_timeout(self.timeout, call).await {
            Ok(judgment) => ClauseAnalysis::judged(unit, judgment),
            Err(e) => {
                warn!(clause = %unit.id, error = %e, "clause analysis failed");
                ClauseAnalysis::failed(unit, e.to_string())
            }
        }
    }
}
