//! LLM Client — the single point of entry for all text-completion calls.
//!
//! ARCHITECTURAL RULE: No other module may call the completion API directly.
//! The interview pipeline depends on the `CompletionClient` trait only, so the
//! HTTP transport can be swapped for a fake in tests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },
}

/// Wire shape of a text-completion request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub echo: bool,
    pub frequency_penalty: f32,
    pub max_tokens: u32,
    pub n: u32,
    pub presence_penalty: f32,
    pub stream: bool,
    pub temperature: f32,
    pub top_p: f32,
    pub user: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    pub choices: Vec<CompletionChoice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// One generated continuation. `finish_reason` is "length" when the output window was exhausted.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChoice {
    pub text: String,
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// The completion seam. Implementations must be shareable across concurrent requests.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn create_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError>;
}

/// HTTP client for an OpenAI-compatible `/completions` endpoint.
/// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn create_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Completion attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(self.completions_url())
                .bearer_auth(&self.api_key)
                .json(request)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Completion API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: api_error_message(body),
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message: api_error_message(body),
                });
            }

            let body = response.text().await?;
            let completion: CompletionResponse = serde_json::from_str(&body)?;

            if let Some(usage) = &completion.usage {
                debug!(
                    "Completion succeeded: prompt_tokens={}, completion_tokens={}, total_tokens={}, choices={}",
                    usage.prompt_tokens,
                    usage.completion_tokens,
                    usage.total_tokens,
                    completion.choices.len()
                );
            }

            return Ok(completion);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

/// Pulls `error.message` out of a provider error body, falling back to the raw body.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<ApiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-3.5-turbo-instruct".to_string(),
            prompt: "Create a list of questions for my interview with a Chef".to_string(),
            echo: false,
            frequency_penalty: 0.75,
            max_tokens: 175,
            n: 1,
            presence_penalty: 0.7,
            stream: false,
            temperature: 1.0,
            top_p: 0.85,
            user: "user-1".to_string(),
        }
    }

    #[test]
    fn test_request_serializes_with_wire_field_names() {
        let value = serde_json::to_value(sample_request()).unwrap();
        assert_eq!(value["model"], "gpt-3.5-turbo-instruct");
        assert_eq!(value["echo"], false);
        assert_eq!(value["stream"], false);
        assert_eq!(value["n"], 1);
        assert_eq!(value["max_tokens"], 175);
        assert_eq!(value["user"], "user-1");
        assert!(value.get("frequency_penalty").is_some());
        assert!(value.get("presence_penalty").is_some());
        assert!(value.get("top_p").is_some());
    }

    #[test]
    fn test_response_deserializes_choices() {
        let json = r#"{
            "id": "cmpl-123",
            "object": "text_completion",
            "choices": [
                {"text": "\n1. Why this role?", "index": 0, "logprobs": null, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 12, "completion_tokens": 8, "total_tokens": 20}
        }"#;
        let response: CompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.id.as_deref(), Some("cmpl-123"));
        assert_eq!(response.choices.len(), 1);
        assert_eq!(response.choices[0].text, "\n1. Why this role?");
        assert_eq!(response.choices[0].finish_reason.as_deref(), Some("stop"));
        assert_eq!(response.usage.unwrap().total_tokens, 20);
    }

    #[test]
    fn test_response_without_usage_deserializes() {
        let json = r#"{"choices": [{"text": "What?"}]}"#;
        let response: CompletionResponse = serde_json::from_str(json).unwrap();
        assert!(response.usage.is_none());
        assert!(response.choices[0].finish_reason.is_none());
    }

    #[test]
    fn test_api_error_message_extracted_from_json_body() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        assert_eq!(
            api_error_message(body.to_string()),
            "Incorrect API key provided"
        );
    }

    #[test]
    fn test_api_error_message_falls_back_to_raw_body() {
        assert_eq!(api_error_message("Bad Gateway".to_string()), "Bad Gateway");
    }

    #[test]
    fn test_completions_url_joins_base() {
        let client = OpenAiClient::new(
            "sk-test".to_string(),
            "http://localhost:9000/v1".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.completions_url(), "http://localhost:9000/v1/completions");
    }
}
