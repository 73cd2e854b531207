//! The judgment service contract.
//!
//! Every call is one request and one response with no retries. Responses are
//! schema-checked at this boundary (see [`crate::validate`]) so callers only
//! ever see typed judgments or an [`OracleError`].

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use lexrisk_core::{ClauseComparison, ClauseJudgment, DocumentSummary};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OracleError {
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("malformed oracle output: {0}")]
    Malformed(String),

    #[error("oracle reported an error: {0}")]
    Upstream(String),

    #[error("oracle returned an empty response")]
    EmptyResponse,
}

/// Risk, summary, translation, and comparison judgments.
#[async_trait]
pub trait AnalysisOracle: Send + Sync {
    /// Whole-document summary and qualitative risk. Callers cap `text` first.
    async fn summarize_document(&self, text: &str) -> Result<DocumentSummary, OracleError>;

    /// Judge one clause. `context` names the clause, e.g. "Clause 4.".
    async fn analyze_clause(&self, text: &str, context: &str)
    -> Result<ClauseJudgment, OracleError>;

    async fn translate(&self, text: &str, target_language: &str) -> Result<String, OracleError>;

    async fn compare_clause_to_standard(
        &self,
        actual: &str,
        standard: &str,
    ) -> Result<ClauseComparison, OracleError>;

    /// Answer a question strictly from the supplied contract text.
    async fn answer_question(&self, text: &str, question: &str) -> Result<String, OracleError>;
}

/// Bound an oracle call; expiry is reported as [`OracleError::Timeout`].
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, OracleError>
where
    F: Future<Output = Result<T, OracleError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(OracleError::Timeout(limit)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn slow_call_times_out() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(120)).await;
            Ok::<_, OracleError>(1)
        };
        let err = with_timeout(Duration::from_secs(30), slow).await.unwrap_err();
        assert!(matches!(err, OracleError::Timeout(d) if d == Duration::from_secs(30)));
    }

    #[tokio::test]
    async fn fast_call_passes_through() {
        let fast = async { Ok::<_, OracleError>("done") };
        assert_eq!(with_timeout(Duration::from_secs(1), fast).await.unwrap(), "done");

        let failing = async { Err::<(), _>(OracleError::EmptyResponse) };
        let err = with_timeout(Duration::from_secs(1), failing).await.unwrap_err();
        assert!(matches!(err, OracleError::EmptyResponse));
    }
}
