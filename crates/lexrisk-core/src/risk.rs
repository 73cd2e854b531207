//! Composite risk scoring.
//!
//! The document-level judgment sets a floor; every severe or moderate clause
//! adds a fixed penalty on top, and the total is clamped to 100:
//!
//! ```text
//! score = min(100, base(overall) + high_penalty * #high + medium_penalty * #medium)
//! ```
//!
//! Clauses whose analysis failed carry no risk signal and are excluded from
//! both counts.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{ClauseAnalysis, CompositeRisk, OverallRisk, RiskBasis, RiskLevel};

/// Upper bound of the composite score.
pub const MAX_SCORE: u8 = 100;

/// Tunable weights for [`RiskAggregator`].
///
/// Defaults reproduce the reference policy: bases 70/40/10, a clause is
/// high-risk at 8+ (+10) and medium-risk at 5–7 (+5), bands at 80/60/40.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskWeights {
    pub high_base: u8,
    pub medium_base: u8,
    pub low_base: u8,
    pub high_clause_threshold: u8,
    pub medium_clause_threshold: u8,
    pub high_clause_penalty: u8,
    pub medium_clause_penalty: u8,
    pub critical_at: u8,
    pub high_at: u8,
    pub medium_at: u8,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            high_base: 70,
            medium_base: 40,
            low_base: 10,
            high_clause_threshold: 8,
            medium_clause_threshold: 5,
            high_clause_penalty: 10,
            medium_clause_penalty: 5,
            critical_at: 80,
            high_at: 60,
            medium_at: 40,
        }
    }
}

/// Clause counts that fed a composite score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalCounts {
    pub high: usize,
    pub medium: usize,
}

/// Combines the document judgment and clause scores into a [`CompositeRisk`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskAggregator {
    weights: RiskWeights,
}

impl RiskAggregator {
    pub fn new(weights: RiskWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &RiskWeights {
        &self.weights
    }

    /// Base score for a document-level judgment.
    pub fn base_score(&self, overall: OverallRisk) -> u8 {
        match overall {
            OverallRisk::High => self.weights.high_base,
            OverallRisk::Medium => self.weights.medium_base,
            OverallRisk::Low | OverallRisk::Unknown => self.weights.low_base,
        }
    }

    /// Map a 0–100 score onto its discrete band.
    pub fn level_for(&self, score: u8) -> RiskLevel {
        let w = &self.weights;
        if score >= w.critical_at {
            RiskLevel::Critical
        } else if score >= w.high_at {
            RiskLevel::High
        } else if score >= w.medium_at {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Count high and medium clause signals among raw 1–10 scores.
    pub fn count_signals(&self, scores: impl IntoIterator<Item = u8>) -> SignalCounts {
        let w = &self.weights;
        scores
            .into_iter()
            .fold(SignalCounts::default(), |mut counts, score| {
                if score >= w.high_clause_threshold {
                    counts.high += 1;
                } else if score >= w.medium_clause_threshold {
                    counts.medium += 1;
                }
                counts
            })
    }

    /// Score raw clause signals against a document judgment.
    pub fn score_signals(
        &self,
        scores: impl IntoIterator<Item = u8>,
        overall: OverallRisk,
    ) -> (u8, SignalCounts) {
        let counts = self.count_signals(scores);
        let w = &self.weights;
        let total = u64::from(self.base_score(overall))
            + u64::from(w.high_clause_penalty) * counts.high as u64
            + u64::from(w.medium_clause_penalty) * counts.medium as u64;
        let score = total.min(u64::from(MAX_SCORE)) as u8;
        (score, counts)
    }

    /// Aggregate clause analyses with the document's overall risk.
    ///
    /// Failed analyses contribute nothing. An empty slice yields the base score.
    pub fn aggregate(&self, clauses: &[ClauseAnalysis], overall: OverallRisk) -> CompositeRisk {
        let scores = clauses
            .iter()
            .filter_map(ClauseAnalysis::risk_score)
            .map(u8::from);
        let (score, counts) = self.score_signals(scores, overall);
        debug!(
            %overall,
            high = counts.high,
            medium = counts.medium,
            score,
            "aggregated clause risk"
        );
        CompositeRisk {
            score,
            level: self.level_for(score),
            basis: RiskBasis::ClauseSignals,
        }
    }

    /// Aggregate, falling back to document-only signals when no clause was
    /// analysed at all.
    pub fn assess(&self, clauses: &[ClauseAnalysis], overall: OverallRisk) -> CompositeRisk {
        if !clauses.is_empty() {
            return self.aggregate(clauses, overall);
        }
        let (score, counts) = self.score_signals(document_only_signals(overall), overall);
        debug!(
            %overall,
            high = counts.high,
            medium = counts.medium,
            score,
            "no clause analyses, scored from document judgment"
        );
        CompositeRisk {
            score,
            level: self.level_for(score),
            basis: RiskBasis::DocumentOnly,
        }
    }
}

/// Minimal synthetic clause scores standing in for an empty clause batch.
pub fn document_only_signals(overall: OverallRisk) -> [u8; 3] {
    let severe = if overall == OverallRisk::High { 8 } else { 3 };
    [5, 2, severe]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClauseJudgment, ClauseUnit, RiskScore};

    fn unit(id: &str) -> ClauseUnit {
        ClauseUnit {
            id: id.into(),
            text: format!("text of {id}"),
            order: 0,
        }
    }

    fn judged(score: u8) -> ClauseAnalysis {
        ClauseAnalysis::judged(
            &unit("1."),
            ClauseJudgment {
                explanation: "x".into(),
                risk_score: RiskScore::new(score).unwrap(),
                risk_reason: None,
                favorable: None,
                suggestion: None,
            },
        )
    }

    fn failed() -> ClauseAnalysis {
        ClauseAnalysis::failed(&unit("2."), "oracle timed out")
    }

    #[test]
    fn empty_clause_list_returns_base() {
        let agg = RiskAggregator::default();
        let cases = [
            (OverallRisk::Low, 10, RiskLevel::Low),
            (OverallRisk::Medium, 40, RiskLevel::Medium),
            (OverallRisk::High, 70, RiskLevel::High),
            (OverallRisk::Unknown, 10, RiskLevel::Low),
        ];
        for (overall, score, level) in cases {
            let risk = agg.aggregate(&[], overall);
            assert_eq!(risk.score, score, "{overall}");
            assert_eq!(risk.level, level, "{overall}");
            assert_eq!(risk.basis, RiskBasis::ClauseSignals);
        }
    }

    #[test]
    fn high_document_with_mixed_clauses_is_critical() {
        let clauses = [judged(9), judged(2), judged(6)];
        let agg = RiskAggregator::default();
        let (_, counts) = agg.score_signals([9, 2, 6], OverallRisk::High);
        assert_eq!(counts, SignalCounts { high: 1, medium: 1 });

        let risk = agg.aggregate(&clauses, OverallRisk::High);
        assert_eq!(risk.score, 85);
        assert_eq!(risk.level, RiskLevel::Critical);
    }

    #[test]
    fn failed_clauses_are_excluded_not_zeroed() {
        let agg = RiskAggregator::default();
        let with_failures = agg.aggregate(&[judged(8), failed(), failed()], OverallRisk::Low);
        let without = agg.aggregate(&[judged(8)], OverallRisk::Low);
        assert_eq!(with_failures, without);
        assert_eq!(with_failures.score, 20);
    }

    #[test]
    fn all_failed_is_not_the_empty_fallback() {
        let risk = RiskAggregator::default().assess(&[failed()], OverallRisk::High);
        assert_eq!(risk.score, 70);
        assert_eq!(risk.basis, RiskBasis::ClauseSignals);
    }

    #[test]
    fn thresholds_are_inclusive() {
        let agg = RiskAggregator::default();
        assert_eq!(agg.count_signals([8]), SignalCounts { high: 1, medium: 0 });
        assert_eq!(agg.count_signals([7]), SignalCounts { high: 0, medium: 1 });
        assert_eq!(agg.count_signals([5]), SignalCounts { high: 0, medium: 1 });
        assert_eq!(agg.count_signals([4]), SignalCounts::default());
    }

    #[test]
    fn level_bands() {
        let agg = RiskAggregator::default();
        assert_eq!(agg.level_for(0), RiskLevel::Low);
        assert_eq!(agg.level_for(39), RiskLevel::Low);
        assert_eq!(agg.level_for(40), RiskLevel::Medium);
        assert_eq!(agg.level_for(59), RiskLevel::Medium);
        assert_eq!(agg.level_for(60), RiskLevel::High);
        assert_eq!(agg.level_for(79), RiskLevel::High);
        assert_eq!(agg.level_for(80), RiskLevel::Critical);
        assert_eq!(agg.level_for(100), RiskLevel::Critical);
    }

    #[test]
    fn monotonic_and_clamped() {
        let agg = RiskAggregator::default();
        for overall in [OverallRisk::Low, OverallRisk::Medium, OverallRisk::High] {
            let mut previous = 0u8;
            for high in 0..15usize {
                for medium in 0..15usize {
                    let scores = std::iter::repeat_n(9u8, high).chain(std::iter::repeat_n(6u8, medium));
                    let (score, _) = agg.score_signals(scores, overall);
                    assert!(score <= MAX_SCORE);
                    if medium == 0 {
                        assert!(score >= previous, "not monotonic in high count");
                        previous = score;
                    }
                    let (more_medium, _) = agg.score_signals(
                        std::iter::repeat_n(9u8, high).chain(std::iter::repeat_n(6u8, medium + 1)),
                        overall,
                    );
                    assert!(more_medium >= score, "not monotonic in medium count");
                }
            }
        }
    }

    #[test]
    fn clamps_large_batches_at_100() {
        let clauses: Vec<ClauseAnalysis> = (0..50).map(|_| judged(10)).collect();
        let risk = RiskAggregator::default().aggregate(&clauses, OverallRisk::High);
        assert_eq!(risk.score, 100);
        assert_eq!(risk.level, RiskLevel::Critical);
    }

    #[test]
    fn empty_batch_falls_back_to_document_signals() {
        let agg = RiskAggregator::default();

        let high = agg.assess(&[], OverallRisk::High);
        assert_eq!(high.score, 85);
        assert_eq!(high.level, RiskLevel::Critical);
        assert_eq!(high.basis, RiskBasis::DocumentOnly);

        let medium = agg.assess(&[], OverallRisk::Medium);
        assert_eq!(medium.score, 45);
        assert_eq!(medium.level, RiskLevel::Medium);

        let low = agg.assess(&[], OverallRisk::Low);
        assert_eq!(low.score, 15);
        assert_eq!(low.level, RiskLevel::Low);
    }

    #[test]
    fn custom_weights_apply() {
        let agg = RiskAggregator::new(RiskWeights {
            high_base: 50,
            high_clause_penalty: 25,
            ..RiskWeights::default()
        });
        let risk = agg.aggregate(&[judged(10)], OverallRisk::High);
        assert_eq!(risk.score, 75);
        assert_eq!(risk.level, RiskLevel::High);
    }

    #[test]
    fn weights_deserialize_with_defaults() {
        let w: RiskWeights = serde_json::from_str(r#"{"high_base": 65}"#).unwrap();
        assert_eq!(w.high_base, 65);
        assert_eq!(w.medium_base, 40);
        assert_eq!(w.critical_at, 80);
    }
}
