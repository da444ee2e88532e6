/// AI Gateway — the single point of entry for all LLM calls in the screener.
///
/// ARCHITECTURAL RULE: No other module may call the upstream API directly.
/// All LLM interactions MUST go through this module.
///
/// The gateway is deliberately single-shot: one failed call fails the whole
/// request. `AiGateway` is the seam where a retry policy could be layered on
/// later without touching the pipeline.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Default upstream endpoint (Groq's OpenAI-compatible chat completions API).
/// Override via the AI_API_ENDPOINT environment variable.
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// The model used for all LLM calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "llama3-70b-8192";

const TEMPERATURE: f32 = 0.7;
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("request timed out after {}s", REQUEST_TIMEOUT.as_secs())]
    Timeout,

    #[error("upstream unavailable: {0}")]
    Unavailable(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("upstream returned an empty completion")]
    EmptyCompletion,
}

/// Port to the remote language model: prompt string in, raw completion text out.
#[async_trait]
pub trait AiGateway: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Production gateway talking to an OpenAI-compatible chat completions endpoint.
pub struct GroqClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GroqClient {
    pub fn new(api_key: String, endpoint: String) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl AiGateway for GroqClient {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Upstream API returned {status}: {body}");
            return Err(GatewayError::Unavailable(format!(
                "upstream returned status {status}"
            )));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(GatewayError::EmptyCompletion)?;

        debug!("LLM call succeeded: completion_chars={}", content.len());

        Ok(content)
    }
}

fn classify_send_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else if err.is_connect() {
        GatewayError::Unavailable(err.to_string())
    } else {
        GatewayError::Transport(err.to_string())
    }
}
