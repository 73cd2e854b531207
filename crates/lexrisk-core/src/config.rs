//! Pipeline limits and scoring weights.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::risk::RiskWeights;

/// Tunables for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Leading clauses sent to the oracle; the rest stay unanalysed.
    pub clause_cap: usize,
    /// Characters of document text given to summarization.
    pub summary_char_limit: usize,
    /// Characters of document text given as question context.
    pub question_char_limit: usize,
    /// Characters of text given to translation.
    pub translation_char_limit: usize,
    /// Upper bound on any single oracle call.
    pub oracle_timeout_secs: u64,
    pub weights: RiskWeights,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            clause_cap: 5,
            summary_char_limit: 15_000,
            question_char_limit: 25_000,
            translation_char_limit: 2_000,
            oracle_timeout_secs: 60,
            weights: RiskWeights::default(),
        }
    }
}

impl PipelineConfig {
    /// Load a JSON config file. Missing keys take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.oracle_timeout_secs == 0 {
            return Err(ConfigError::Invalid("oracle_timeout_secs must be > 0".into()));
        }
        if self.summary_char_limit == 0 {
            return Err(ConfigError::Invalid("summary_char_limit must be > 0".into()));
        }
        let w = &self.weights;
        if w.medium_clause_threshold > w.high_clause_threshold {
            return Err(ConfigError::Invalid(
                "medium_clause_threshold exceeds high_clause_threshold".into(),
            ));
        }
        if !(w.medium_at <= w.high_at && w.high_at <= w.critical_at) {
            return Err(ConfigError::Invalid(
                "level bands must satisfy medium_at <= high_at <= critical_at".into(),
            ));
        }
        Ok(())
    }

    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_secs(self.oracle_timeout_secs)
    }
}

/// Longest prefix of `text` holding at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = PipelineConfig::default();
        assert_eq!(c.clause_cap, 5);
        assert_eq!(c.summary_char_limit, 15_000);
        assert_eq!(c.oracle_timeout(), Duration::from_secs(60));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c = PipelineConfig::from_json_str(r#"{"clause_cap": 8, "weights": {"low_base": 0}}"#)
            .unwrap();
        assert_eq!(c.clause_cap, 8);
        assert_eq!(c.weights.low_base, 0);
        assert_eq!(c.weights.high_base, 70);
        assert_eq!(c.translation_char_limit, 2_000);
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = PipelineConfig::from_json_str(r#"{"oracle_timeout_secs": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_inverted_bands() {
        let err = PipelineConfig::from_json_str(r#"{"weights": {"high_at": 90}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = PipelineConfig::from_json_str("{clause_cap: 3").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexrisk.json");
        std::fs::write(&path, r#"{"clause_cap": 2}"#).unwrap();
        let c = PipelineConfig::from_json_file(&path).unwrap();
        assert_eq!(c.clause_cap, 2);

        let missing = PipelineConfig::from_json_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, ConfigError::Read { .. }));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("₹500 fee", 2), "₹5");
        assert_eq!(truncate_chars("", 5), "");
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
