/// LLM Client — the single point of entry for all text-generation calls.
///
/// ARCHITECTURAL RULE: No other module may call the DeepInfra API directly.
/// All LLM interactions MUST go through this module.
///
/// Unlike a chat client this never retries: a failed call surfaces to the
/// caller immediately.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

/// DeepSeek-V3 served through the DeepInfra inference API.
pub const DEFAULT_MODEL_URL: &str =
    "https://api.deepinfra.com/v1/inference/deepseek-ai/DeepSeek-V3";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Seam between the analysis gateway and the network.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates a raw completion for `input`, halting at any of `stop`.
    async fn generate(&self, input: &str, stop: &[&str]) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    input: &'a str,
    stop: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
pub struct InferenceResponse {
    pub results: Vec<GeneratedText>,
    #[serde(default)]
    pub inference_status: Option<InferenceStatus>,
}

#[derive(Debug, Deserialize)]
pub struct GeneratedText {
    pub generated_text: String,
}

#[derive(Debug, Deserialize)]
pub struct InferenceStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tokens_input: Option<u32>,
    #[serde(default)]
    pub tokens_generated: Option<u32>,
}

impl InferenceResponse {
    /// Text of the first result, if the backend returned any.
    pub fn text(&self) -> Option<&str> {
        self.results.first().map(|r| r.generated_text.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct DeepInfraError {
    detail: DeepInfraErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DeepInfraErrorDetail {
    Message(String),
    Structured { error: String },
}

impl DeepInfraErrorDetail {
    fn into_message(self) -> String {
        match self {
            DeepInfraErrorDetail::Message(m) => m,
            DeepInfraErrorDetail::Structured { error } => error,
        }
    }
}

/// Text-generation client for the DeepInfra inference endpoint.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    model_url: String,
}

impl LlmClient {
    /// Builds a client whose every call is bounded by `timeout`.
    pub fn new(api_key: String, model_url: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            model_url,
        })
    }

    pub fn model_url(&self) -> &str {
        &self.model_url
    }

    /// Makes a single call to the inference API, returning the decoded response.
    pub async fn call(&self, input: &str, stop: &[&str]) -> Result<InferenceResponse, LlmError> {
        let request_body = InferenceRequest { input, stop };

        let response = self
            .client
            .post(&self.model_url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<DeepInfraError>(&body)
                .map(|e| e.detail.into_message())
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let inference: InferenceResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &inference.inference_status {
            debug!(
                "LLM call succeeded: status={:?}, tokens_input={:?}, tokens_generated={:?}",
                usage.status, usage.tokens_input, usage.tokens_generated
            );
        }

        Ok(inference)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, input: &str, stop: &[&str]) -> Result<String, LlmError> {
        let response = self.call(input, stop).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}
