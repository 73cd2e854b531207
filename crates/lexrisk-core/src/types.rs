//! Shared contract-analysis types passed between segmentation, the oracle,
//! risk scoring, and report rendering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sentinel id for text that precedes the first recognised heading.
pub const PREAMBLE_ID: &str = "Preamble";

/// A heading-delimited span of contract text.
///
/// Produced once per run by [`ClauseSegmenter`](crate::ClauseSegmenter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseUnit {
    /// Trimmed heading token ("1.", "ARTICLE II", "SECTION 3") or `"Preamble"`.
    pub id: String,
    pub text: String,
    /// 0-based position among emitted units.
    pub order: usize,
}

/// Clause-level risk on the oracle's 1–10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RiskScore(u8);

impl RiskScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Returns `None` outside 1..=10.
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for RiskScore {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("risk score {value} outside 1..=10"))
    }
}

impl From<RiskScore> for u8 {
    fn from(score: RiskScore) -> u8 {
        score.0
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which party a clause favours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Favorability {
    Buyer,
    Seller,
    Mutual,
    Unknown,
}

impl FromStr for Favorability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buyer" => Ok(Self::Buyer),
            "seller" => Ok(Self::Seller),
            "mutual" => Ok(Self::Mutual),
            "unknown" => Ok(Self::Unknown),
            other => Err(format!("unrecognised favorability {other:?}")),
        }
    }
}

/// A schema-checked clause judgment returned by the oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseJudgment {
    pub explanation: String,
    pub risk_score: RiskScore,
    pub risk_reason: Option<String>,
    pub favorable: Option<Favorability>,
    pub suggestion: Option<String>,
}

/// Result of analysing one clause: a judgment, or the reason there is none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClauseOutcome {
    Judged(ClauseJudgment),
    Failed { error: String },
}

/// Per-clause analysis, keyed by the source [`ClauseUnit`] id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseAnalysis {
    pub id: String,
    pub original_text: String,
    pub outcome: ClauseOutcome,
}

impl ClauseAnalysis {
    pub fn judged(unit: &ClauseUnit, judgment: ClauseJudgment) -> Self {
        Self {
            id: unit.id.clone(),
            original_text: unit.text.clone(),
            outcome: ClauseOutcome::Judged(judgment),
        }
    }

    pub fn failed(unit: &ClauseUnit, error: impl Into<String>) -> Self {
        Self {
            id: unit.id.clone(),
            original_text: unit.text.clone(),
            outcome: ClauseOutcome::Failed {
                error: error.into(),
            },
        }
    }

    /// The clause's risk signal; `None` when analysis failed.
    pub fn risk_score(&self) -> Option<RiskScore> {
        match &self.outcome {
            ClauseOutcome::Judged(j) => Some(j.risk_score),
            ClauseOutcome::Failed { .. } => None,
        }
    }

    pub fn judgment(&self) -> Option<&ClauseJudgment> {
        match &self.outcome {
            ClauseOutcome::Judged(j) => Some(j),
            ClauseOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            ClauseOutcome::Judged(_) => None,
            ClauseOutcome::Failed { error } => Some(error),
        }
    }
}

/// Document-level qualitative risk from the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverallRisk {
    Low,
    Medium,
    High,
    /// Reported when the oracle cannot judge (offline mode). Scores like `Low`.
    Unknown,
}

impl FromStr for OverallRisk {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "unknown" => Ok(Self::Unknown),
            other => Err(format!("unrecognised overall risk {other:?}")),
        }
    }
}

impl fmt::Display for OverallRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// Flags for clause families that warrant a reviewer alert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecificRisks {
    #[serde(default)]
    pub has_indemnity: bool,
    #[serde(default)]
    pub has_non_compete: bool,
    #[serde(default)]
    pub has_termination_for_convenience: bool,
    #[serde(default)]
    pub has_auto_renewal: bool,
}

impl SpecificRisks {
    pub fn any(&self) -> bool {
        self.has_indemnity
            || self.has_non_compete
            || self.has_termination_for_convenience
            || self.has_auto_renewal
    }

    /// Reviewer alerts for the raised flags, as `(title, detail)` pairs.
    pub fn alerts(&self) -> Vec<(&'static str, &'static str)> {
        [
            (
                self.has_indemnity,
                "Indemnity clause detected",
                "This may impose unlimited liability.",
            ),
            (
                self.has_non_compete,
                "Non-compete clause detected",
                "Restricts future employment options.",
            ),
            (
                self.has_termination_for_convenience,
                "Termination for convenience",
                "One party can end the contract without cause.",
            ),
            (
                self.has_auto_renewal,
                "Auto-renewal detected",
                "Watch out for the cancellation window.",
            ),
        ]
        .into_iter()
        .filter(|(raised, _, _)| *raised)
        .map(|(_, title, detail)| (title, detail))
        .collect()
    }
}

/// Whole-document judgment produced once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub summary: String,
    pub contract_type: String,
    pub key_dates: Vec<String>,
    pub key_obligations: Vec<String>,
    pub overall_risk: OverallRisk,
    pub specific_risks: SpecificRisks,
}

/// An insertion-ordered set of entity strings, deduplicated by exact match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntitySet(Vec<String>);

impl EntitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` unless an identical string is already present.
    /// Returns whether it was added.
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.0.contains(&value) {
            return false;
        }
        self.0.push(value);
        true
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for EntitySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

/// Named entities extracted once per document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityBundle {
    #[serde(rename = "Parties")]
    pub parties: EntitySet,
    #[serde(rename = "Dates")]
    pub dates: EntitySet,
    #[serde(rename = "Money")]
    pub money: EntitySet,
    #[serde(rename = "Locations")]
    pub locations: EntitySet,
}

impl EntityBundle {
    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
            && self.dates.is_empty()
            && self.money.is_empty()
            && self.locations.is_empty()
    }
}

/// Discrete band of the composite 0–100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which signals the composite score was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBasis {
    /// Oracle judgments for individual clauses.
    ClauseSignals,
    /// Synthetic signals derived from the document judgment alone.
    DocumentOnly,
}

/// Aggregated document risk. Never persisted outside an
/// [`AnalysisResult`](crate::AnalysisResult).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeRisk {
    pub score: u8,
    pub level: RiskLevel,
    pub basis: RiskBasis,
}

/// How an actual clause reads against its standard counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Fair,
    Strict,
    Unfavorable,
}

impl FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fair" => Ok(Self::Fair),
            "strict" => Ok(Self::Strict),
            "unfavorable" | "unfavourable" => Ok(Self::Unfavorable),
            other => Err(format!("unrecognised verdict {other:?}")),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Fair => "Fair",
            Self::Strict => "Strict",
            Self::Unfavorable => "Unfavorable",
        };
        f.write_str(s)
    }
}

/// Oracle comparison of a contract clause with a standard clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseComparison {
    /// 0–100, how close the two clauses are in intent and fairness.
    pub similarity_score: u8,
    pub deviations: String,
    pub verdict: Verdict,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(id: &str, text: &str) -> ClauseUnit {
        ClauseUnit {
            id: id.into(),
            text: text.into(),
            order: 0,
        }
    }

    #[test]
    fn risk_score_bounds() {
        assert!(RiskScore::new(0).is_none());
        assert!(RiskScore::new(11).is_none());
        assert_eq!(RiskScore::new(1).map(RiskScore::get), Some(1));
        assert_eq!(RiskScore::new(10).map(RiskScore::get), Some(10));
    }

    #[test]
    fn risk_score_rejects_out_of_range_json() {
        assert!(serde_json::from_str::<RiskScore>("7").is_ok());
        assert!(serde_json::from_str::<RiskScore>("0").is_err());
        assert!(serde_json::from_str::<RiskScore>("42").is_err());
    }

    #[test]
    fn failed_analysis_has_no_risk_score() {
        let a = ClauseAnalysis::failed(&unit("3.", "Payment terms"), "timed out");
        assert_eq!(a.risk_score(), None);
        assert_eq!(a.error(), Some("timed out"));
        assert_eq!(a.original_text, "Payment terms");
    }

    #[test]
    fn judged_analysis_carries_source_id() {
        let judgment = ClauseJudgment {
            explanation: "Either party may end the agreement.".into(),
            risk_score: RiskScore::new(6).unwrap(),
            risk_reason: Some("Short notice".into()),
            favorable: Some(Favorability::Mutual),
            suggestion: None,
        };
        let a = ClauseAnalysis::judged(&unit("ARTICLE IV", "Termination"), judgment);
        assert_eq!(a.id, "ARTICLE IV");
        assert_eq!(a.risk_score().map(RiskScore::get), Some(6));
        assert!(a.error().is_none());
    }

    #[test]
    fn clause_outcome_json_is_tagged() {
        let a = ClauseAnalysis::failed(&unit("1.", "x"), "bad json");
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["outcome"]["status"], "failed");
        assert_eq!(json["outcome"]["error"], "bad json");
    }

    #[test]
    fn entity_set_dedups_exact_matches_only() {
        let mut set = EntitySet::new();
        assert!(set.insert("Acme Corp"));
        assert!(!set.insert("Acme Corp"));
        assert!(set.insert("Acme Corporation"));
        assert_eq!(set.as_slice(), ["Acme Corp", "Acme Corporation"]);
    }

    #[test]
    fn entity_bundle_uses_category_keys() {
        let bundle = EntityBundle {
            parties: ["Acme Corp"].into_iter().collect(),
            ..Default::default()
        };
        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(json["Parties"][0], "Acme Corp");
        assert!(json["Locations"].as_array().unwrap().is_empty());
    }

    #[test]
    fn enum_parsing_is_case_insensitive() {
        assert_eq!("HIGH".parse::<OverallRisk>(), Ok(OverallRisk::High));
        assert_eq!(" seller ".parse::<Favorability>(), Ok(Favorability::Seller));
        assert_eq!("unfavourable".parse::<Verdict>(), Ok(Verdict::Unfavorable));
        assert!("severe".parse::<OverallRisk>().is_err());
    }

    #[test]
    fn risk_levels_order_by_severity() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn alerts_follow_raised_flags() {
        assert!(SpecificRisks::default().alerts().is_empty());
        let risks = SpecificRisks {
            has_non_compete: true,
            has_auto_renewal: true,
            ..Default::default()
        };
        let titles: Vec<&str> = risks.alerts().iter().map(|(t, _)| *t).collect();
        assert_eq!(titles, ["Non-compete clause detected", "Auto-renewal detected"]);
    }
}
