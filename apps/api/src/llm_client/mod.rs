//! Completion Client: the single point of entry for text-generation calls.
//!
//! No other module may call the generation endpoint directly; the pipeline only
//! sees the `CompletionClient` trait. The client is a pass-through: it does not
//! check that the returned text follows the requested report structure.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Gave up after {retries} attempts: {last}")]
    RetriesExhausted {
        retries: u32,
        #[source]
        last: Box<GenerationError>,
    },

    #[error("Completion returned empty content")]
    EmptyContent,
}

impl GenerationError {
    /// Transport failures, rate limiting and server errors are worth another attempt.
    fn is_retryable(&self) -> bool {
        match self {
            GenerationError::Http(_) => true,
            GenerationError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Text generation seam. Implemented by `ChatCompletionClient` in production.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, GenerationError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Settings
// ────────────────────────────────────────────────────────────────────────────

/// Which flavour of the chat-completions API the endpoint speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFlavor {
    /// `POST {base}/v1/chat/completions` with bearer auth.
    OpenAi,
    /// `POST {base}/openai/deployments/{model}/chat/completions?api-version=…` with `api-key`.
    Azure,
}

impl fmt::Display for ApiFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFlavor::OpenAi => f.write_str("openai"),
            ApiFlavor::Azure => f.write_str("azure"),
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown API type '{0}'")]
pub struct UnknownApiFlavor(String);

impl FromStr for ApiFlavor {
    type Err = UnknownApiFlavor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(ApiFlavor::OpenAi),
            "azure" => Ok(ApiFlavor::Azure),
            other => Err(UnknownApiFlavor(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub flavor: ApiFlavor,
    /// Base URL without trailing slash.
    pub api_base: String,
    pub api_key: String,
    /// Azure only.
    pub api_version: String,
    /// Model name, or deployment name for Azure.
    pub model: String,
    pub temperature: f32,
    pub top_p: Option<f32>,
    pub max_tokens: Option<u32>,
    /// Total attempts including the first one.
    pub max_attempts: u32,
    pub timeout: Duration,
    /// Backoff before retry n is `retry_base_delay * 2^(n-1)`.
    pub retry_base_delay: Duration,
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice, trimmed. `None` when missing or blank.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Chat-completions client with bounded retry and exponential backoff.
#[derive(Clone)]
pub struct ChatCompletionClient {
    client: Client,
    settings: LlmSettings,
}

impl ChatCompletionClient {
    pub fn new(settings: LlmSettings) -> Result<Self, GenerationError> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self { client, settings })
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    pub fn flavor(&self) -> ApiFlavor {
        self.settings.flavor
    }

    fn endpoint(&self) -> String {
        endpoint_url(&self.settings)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.settings.flavor {
            ApiFlavor::OpenAi => request.bearer_auth(&self.settings.api_key),
            ApiFlavor::Azure => request.header("api-key", &self.settings.api_key),
        }
    }

    /// Makes the call, returning the full response object.
    /// Retries on transport errors, 429 and 5xx. Other statuses fail immediately.
    /// Once every attempt has failed the last failure is wrapped in `RetriesExhausted`.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<ChatResponse, GenerationError> {
        let request_body = ChatRequest {
            model: match self.settings.flavor {
                ApiFlavor::OpenAi => Some(self.settings.model.as_str()),
                ApiFlavor::Azure => None,
            },
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.settings.temperature,
            top_p: self.settings.top_p,
            max_tokens: self.settings.max_tokens,
        };
        let url = self.endpoint();
        let max_attempts = self.settings.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let error = match self.attempt(&url, &request_body).await {
                Ok(response) => return Ok(response),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => e,
            };

            if attempt >= max_attempts {
                return Err(GenerationError::RetriesExhausted {
                    retries: max_attempts,
                    last: Box::new(error),
                });
            }

            let delay = backoff_delay(self.settings.retry_base_delay, attempt);
            warn!(
                "Completion attempt {} failed ({}), retrying after {}ms...",
                attempt,
                error,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn attempt(
        &self,
        url: &str,
        request_body: &ChatRequest<'_>,
    ) -> Result<ChatResponse, GenerationError> {
        let response = self
            .authorize(self.client.post(url))
            .json(request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Completion API returned {}: {}", status, body);
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let chat_response: ChatResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "Completion succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat_response)
    }
}

#[async_trait]
impl CompletionClient for ChatCompletionClient {
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, GenerationError> {
        let response = self.call(prompt, system).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(GenerationError::EmptyContent)
    }
}

fn endpoint_url(settings: &LlmSettings) -> String {
    match settings.flavor {
        ApiFlavor::OpenAi => format!("{}/v1/chat/completions", settings.api_base),
        ApiFlavor::Azure => format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            settings.api_base, settings.model, settings.api_version
        ),
    }
}

/// Exponential backoff: base, 2×base, 4×base, ...
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base * (1u32 << (attempt.saturating_sub(1)).min(16))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    use super::*;

    fn settings(flavor: ApiFlavor, api_base: String) -> LlmSettings {
        LlmSettings {
            flavor,
            api_base,
            api_key: "sk-test".to_string(),
            api_version: "2023-07-01-preview".to_string(),
            model: "gpt-4".to_string(),
            temperature: 0.8,
            top_p: Some(0.95),
            max_tokens: Some(4096),
            max_attempts: 3,
            timeout: Duration::from_secs(5),
            retry_base_delay: Duration::from_millis(1),
        }
    }

    /// Mock endpoint that answers each call with the next scripted (status, body).
    #[derive(Clone)]
    struct Mock {
        calls: Arc<AtomicUsize>,
        script: Arc<Vec<(u16, Value)>>,
        seen: Arc<Mutex<Vec<(HeaderMap, Value)>>>,
    }

    async fn mock_handler(
        State(mock): State<Mock>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        let n = mock.calls.fetch_add(1, Ordering::SeqCst);
        mock.seen.lock().unwrap().push((headers, body));
        let (status, body) = mock
            .script
            .get(n)
            .or_else(|| mock.script.last())
            .cloned()
            .unwrap();
        (StatusCode::from_u16(status).unwrap(), Json(body))
    }

    async fn spawn_mock(path: &str, script: Vec<(u16, Value)>) -> (String, Mock) {
        let mock = Mock {
            calls: Arc::new(AtomicUsize::new(0)),
            script: Arc::new(script),
            seen: Arc::new(Mutex::new(Vec::new())),
        };
        let app = Router::new()
            .route(path, post(mock_handler))
            .with_state(mock.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), mock)
    }

    fn completion(text: &str) -> Value {
        json!({
            "choices": [{ "message": { "role": "assistant", "content": text } }],
            "usage": { "prompt_tokens": 12, "completion_tokens": 34 }
        })
    }

    #[tokio::test]
    async fn test_complete_returns_trimmed_first_choice() {
        let (base, mock) = spawn_mock(
            "/v1/chat/completions",
            vec![(200, completion("\n1. 추천\n본문\n"))],
        )
        .await;
        let client = ChatCompletionClient::new(settings(ApiFlavor::OpenAi, base)).unwrap();

        let text = client.complete("prompt body", "system body").await.unwrap();
        assert_eq!(text, "1. 추천\n본문");

        let seen = mock.seen.lock().unwrap();
        let (headers, body) = &seen[0];
        assert_eq!(headers["authorization"], "Bearer sk-test");
        assert_eq!(body["model"], "gpt-4");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "system body");
        assert_eq!(body["messages"][1]["content"], "prompt body");
        assert_eq!(body["max_tokens"], 4096);
    }

    #[tokio::test]
    async fn test_azure_uses_deployment_path_and_api_key_header() {
        let (base, mock) = spawn_mock(
            "/openai/deployments/gpt-4/chat/completions",
            vec![(200, completion("ok"))],
        )
        .await;
        let client = ChatCompletionClient::new(settings(ApiFlavor::Azure, base)).unwrap();

        assert_eq!(client.complete("p", "s").await.unwrap(), "ok");

        let seen = mock.seen.lock().unwrap();
        let (headers, body) = &seen[0];
        assert_eq!(headers["api-key"], "sk-test");
        assert!(body.get("model").is_none(), "Azure request must not carry a model");
    }

    #[tokio::test]
    async fn test_retries_server_errors_then_succeeds() {
        let (base, mock) = spawn_mock(
            "/v1/chat/completions",
            vec![
                (503, json!({ "error": { "message": "busy" } })),
                (429, json!({ "error": { "message": "slow down" } })),
                (200, completion("third time")),
            ],
        )
        .await;
        let client = ChatCompletionClient::new(settings(ApiFlavor::OpenAi, base)).unwrap();

        assert_eq!(client.complete("p", "s").await.unwrap(), "third time");
        assert_eq!(mock.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_auth_failure_is_not_retried() {
        let (base, mock) = spawn_mock(
            "/v1/chat/completions",
            vec![(401, json!({ "error": { "message": "Incorrect API key" } }))],
        )
        .await;
        let client = ChatCompletionClient::new(settings(ApiFlavor::OpenAi, base)).unwrap();

        let err = client.complete("p", "s").await.unwrap_err();
        match err {
            GenerationError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert_eq!(mock.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let (base, mock) =
            spawn_mock("/v1/chat/completions", vec![(500, json!({ "error": {} }))]).await;
        let client = ChatCompletionClient::new(settings(ApiFlavor::OpenAi, base)).unwrap();

        let err = client.complete("p", "s").await.unwrap_err();
        match err {
            GenerationError::RetriesExhausted { retries, last } => {
                assert_eq!(retries, 3);
                assert!(matches!(*last, GenerationError::Api { status: 500, .. }));
            }
            other => panic!("expected RetriesExhausted, got {other:?}"),
        }
        assert_eq!(mock.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_blank_content_is_empty_content_error() {
        let (base, _mock) =
            spawn_mock("/v1/chat/completions", vec![(200, completion("   \n "))]).await;
        let client = ChatCompletionClient::new(settings(ApiFlavor::OpenAi, base)).unwrap();

        let err = client.complete("p", "s").await.unwrap_err();
        assert!(matches!(err, GenerationError::EmptyContent));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let (base, _mock) =
            spawn_mock("/v1/chat/completions", vec![(200, json!("not an object"))]).await;
        let client = ChatCompletionClient::new(settings(ApiFlavor::OpenAi, base)).unwrap();

        let err = client.complete("p", "s").await.unwrap_err();
        assert!(matches!(err, GenerationError::Parse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_exhausts_with_http_source() {
        let mut s = settings(ApiFlavor::OpenAi, "http://127.0.0.1:1".to_string());
        s.max_attempts = 2;
        let client = ChatCompletionClient::new(s).unwrap();

        let err = client.complete("p", "s").await.unwrap_err();
        assert!(std::error::Error::source(&err).is_some());
        match err {
            GenerationError::RetriesExhausted { retries, last } => {
                assert_eq!(retries, 2);
                assert!(matches!(*last, GenerationError::Http(_)));
            }
            other => panic!("expected RetriesExhausted, got {other:?}"),
        }
    }

    #[test]
    fn test_backoff_doubles() {
        let base = Duration::from_secs(1);
        assert_eq!(backoff_delay(base, 1), Duration::from_secs(1));
        assert_eq!(backoff_delay(base, 2), Duration::from_secs(2));
        assert_eq!(backoff_delay(base, 3), Duration::from_secs(4));
    }

    #[test]
    fn test_endpoint_urls() {
        let openai = settings(ApiFlavor::OpenAi, "https://api.openai.com".to_string());
        assert_eq!(
            endpoint_url(&openai),
            "https://api.openai.com/v1/chat/completions"
        );

        let azure = settings(ApiFlavor::Azure, "https://pro.openai.azure.com".to_string());
        assert_eq!(
            endpoint_url(&azure),
            "https://pro.openai.azure.com/openai/deployments/gpt-4/chat/completions?api-version=2023-07-01-preview"
        );
    }

    #[test]
    fn test_response_text_skips_missing_content() {
        let response: ChatResponse =
            serde_json::from_value(json!({ "choices": [{ "message": { "content": null } }] }))
                .unwrap();
        assert!(response.text().is_none());

        let response: ChatResponse = serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert!(response.text().is_none());
    }
}
