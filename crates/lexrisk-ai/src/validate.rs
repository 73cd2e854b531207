//! Schema validation of raw oracle output.
//!
//! A completion is accepted only if it yields a JSON object whose fields all
//! check out. Anything else fails the whole call; no field of a malformed
//! response is trusted.

use lexrisk_core::{
    ClauseComparison, ClauseJudgment, DocumentSummary, Favorability, OverallRisk, RiskScore,
    SpecificRisks, Verdict,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::oracle::OracleError;

const RAW_PREVIEW_CHARS: usize = 200;

#[derive(Deserialize)]
struct WireClause {
    explanation: String,
    risk_score: i64,
    #[serde(default)]
    risk_reason: Option<String>,
    #[serde(default)]
    favorable: Option<String>,
    #[serde(default)]
    suggestion: Option<String>,
}

#[derive(Deserialize)]
struct WireSummary {
    summary: String,
    #[serde(default)]
    contract_type: Option<String>,
    #[serde(default)]
    key_dates: Vec<String>,
    #[serde(default)]
    key_obligations: Vec<String>,
    overall_risk: String,
    #[serde(default)]
    specific_risks: SpecificRisks,
}

#[derive(Deserialize)]
struct WireComparison {
    similarity_score: i64,
    deviations: String,
    verdict: String,
}

/// Pull a JSON object out of a completion.
///
/// The whole text is tried first; failing that, the span from the first `{`
/// to the last `}` (models sometimes wrap JSON in prose or code fences).
pub fn extract_object(raw: &str) -> Result<Map<String, Value>, OracleError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(OracleError::EmptyResponse);
    }

    let parsed = serde_json::from_str::<Value>(trimmed).ok().or_else(|| {
        let start = trimmed.find('{')?;
        let end = trimmed.rfind('}')?;
        (start < end)
            .then(|| serde_json::from_str::<Value>(&trimmed[start..=end]).ok())
            .flatten()
    });

    match parsed {
        Some(Value::Object(map)) => {
            if let Some(err) = map.get("error") {
                let reason = match err {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                return Err(OracleError::Upstream(reason));
            }
            Ok(map)
        }
        Some(_) => Err(malformed("expected a JSON object", raw)),
        None => Err(malformed("no JSON object found", raw)),
    }
}

fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, OracleError> {
    let map = extract_object(raw)?;
    serde_json::from_value(Value::Object(map)).map_err(|e| malformed(&e.to_string(), raw))
}

fn malformed(reason: &str, raw: &str) -> OracleError {
    let preview: String = raw.chars().take(RAW_PREVIEW_CHARS).collect();
    OracleError::Malformed(format!("{reason}; raw: {preview}"))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

pub fn parse_clause_judgment(raw: &str) -> Result<ClauseJudgment, OracleError> {
    let wire: WireClause = decode(raw)?;

    let risk_score = u8::try_from(wire.risk_score)
        .ok()
        .and_then(RiskScore::new)
        .ok_or_else(|| {
            OracleError::Malformed(format!("risk_score {} outside 1..=10", wire.risk_score))
        })?;

    let favorable = non_blank(wire.favorable)
        .map(|f| f.parse::<Favorability>())
        .transpose()
        .map_err(OracleError::Malformed)?;

    Ok(ClauseJudgment {
        explanation: wire.explanation,
        risk_score,
        risk_reason: non_blank(wire.risk_reason),
        favorable,
        suggestion: non_blank(wire.suggestion),
    })
}

pub fn parse_document_summary(raw: &str) -> Result<DocumentSummary, OracleError> {
    let wire: WireSummary = decode(raw)?;
    let overall_risk = wire
        .overall_risk
        .parse::<OverallRisk>()
        .map_err(OracleError::Malformed)?;

    Ok(DocumentSummary {
        summary: wire.summary,
        contract_type: non_blank(wire.contract_type).unwrap_or_else(|| "Unknown".to_string()),
        key_dates: wire.key_dates,
        key_obligations: wire.key_obligations,
        overall_risk,
        specific_risks: wire.specific_risks,
    })
}

pub fn parse_comparison(raw: &str) -> Result<ClauseComparison, OracleError> {
    let wire: WireComparison = decode(raw)?;

    let similarity_score = u8::try_from(wire.similarity_score)
        .ok()
        .filter(|s| *s <= 100)
        .ok_or_else(|| {
            OracleError::Malformed(format!(
                "similarity_score {} outside 0..=100",
                wire.similarity_score
            ))
        })?;
    let verdict = wire
        .verdict
        .parse::<Verdict>()
        .map_err(OracleError::Malformed)?;

    Ok(ClauseComparison {
        similarity_score,
        deviations: wire.deviations,
        verdict,
    })
}
