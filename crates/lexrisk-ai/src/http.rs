//! OpenAI-compatible chat-completions oracle (Groq by default).

use std::time::Duration;

use async_trait::async_trait;
use lexrisk_core::{ClauseComparison, ClauseJudgment, DocumentSummary};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::oracle::{AnalysisOracle, OracleError};
use crate::{prompts, validate};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn into_content(self) -> Result<String, OracleError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(OracleError::EmptyResponse)
    }
}

/// Chat-completions client. One POST per oracle call, no retries.
pub struct HttpOracle {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl HttpOracle {
    /// Create a client for the given API base URL.
    ///
    /// `base_url` should be like `https://api.groq.com/openai/v1`; a trailing
    /// slash is dropped. `timeout` bounds each request end to end.
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            timeout,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        json: bool,
    ) -> Result<String, OracleError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            response_format: json.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let url = self.endpoint();
        debug!(url = %url, model = %self.model, prompt_chars = prompt.len(), "sending completion request");
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(OracleError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let response: ChatResponse = resp.json().await.map_err(|e| self.transport_error(e))?;
        response.into_content()
    }

    fn transport_error(&self, e: reqwest::Error) -> OracleError {
        if e.is_timeout() {
            OracleError::Timeout(self.timeout)
        } else {
            OracleError::Http(e)
        }
    }
}

#[async_trait]
impl AnalysisOracle for HttpOracle {
    async fn summarize_document(&self, text: &str) -> Result<DocumentSummary, OracleError> {
        let raw = self
            .complete(prompts::SYSTEM_PROMPT, &prompts::summary_prompt(text), true)
            .await?;
        let summary = validate::parse_document_summary(&raw)?;
        info!(
            contract_type = %summary.contract_type,
            overall_risk = %summary.overall_risk,
            "document summarised"
        );
        Ok(summary)
    }

    async fn analyze_clause(
        &self,
        text: &str,
        context: &str,
    ) -> Result<ClauseJudgment, OracleError> {
        let raw = self
            .complete(
                prompts::SYSTEM_PROMPT,
                &prompts::clause_prompt(text, context),
                true,
            )
            .await?;
        validate::parse_clause_judgment(&raw)
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String, OracleError> {
        self.complete(
            prompts::PLAIN_SYSTEM_PROMPT,
            &prompts::translation_prompt(text, target_language),
            false,
        )
        .await
    }

    async fn compare_clause_to_standard(
        &self,
        actual: &str,
        standard: &str,
    ) -> Result<ClauseComparison, OracleError> {
        let raw = self
            .complete(
                prompts::SYSTEM_PROMPT,
                &prompts::comparison_prompt(actual, standard),
                true,
            )
            .await?;
        validate::parse_comparison(&raw)
    }

    async fn answer_question(&self, text: &str, question: &str) -> Result<String, OracleError> {
        self.complete(
            prompts::PLAIN_SYSTEM_PROMPT,
            &prompts::question_prompt(text, question),
            false,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oracle(base_url: &str) -> HttpOracle {
        HttpOracle::new(base_url, DEFAULT_MODEL, "test-key", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let o = oracle("https://api.groq.com/openai/v1/");
        assert_eq!(o.endpoint(), "https://api.groq.com/openai/v1/chat/completions");
        assert_eq!(o.model(), "openai/gpt-oss-120b");
    }

    #[test]
    fn structured_request_asks_for_json_object() {
        let request = ChatRequest {
            model: DEFAULT_MODEL,
            messages: [
                ChatMessage {
                    role: "system",
                    content: prompts::SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: "Analyze this.",
                },
            ],
            response_format: Some(ResponseFormat {
                kind: "json_object",
            }),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "openai/gpt-oss-120b");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Analyze this.");
        assert_eq!(json["response_format"]["type"], "json_object");
    }

    #[test]
    fn plain_request_omits_response_format() {
        let request = ChatRequest {
            model: DEFAULT_MODEL,
            messages: [
                ChatMessage {
                    role: "system",
                    content: prompts::PLAIN_SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: "Translate.",
                },
            ],
            response_format: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("response_format").is_none());
    }

    #[test]
    fn first_choice_content_is_returned() {
        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "{\"ok\": true}"}, "finish_reason": "stop"}
            ],
            "usage": {"total_tokens": 12}
        }"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.into_content().unwrap(), r#"{"ok": true}"#);
    }

    #[test]
    fn missing_or_blank_content_is_empty_response() {
        for body in [
            r#"{"choices": []}"#,
            r#"{}"#,
            r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#,
            r#"{"choices": [{"message": {"role": "assistant", "content": "  "}}]}"#,
        ] {
            let response: ChatResponse = serde_json::from_str(body).unwrap();
            assert!(matches!(
                response.into_content(),
                Err(OracleError::EmptyResponse)
            ));
        }
    }
}
