/// Completion Client — the single point of entry for language-model calls.
///
/// Requests go to the primary provider; on any failure, including a
/// successful response with no text, exactly one retry goes to the secondary
/// provider. Terminal failures are classified by HTTP status so callers can
/// tell rate limiting and exhausted credits apart from everything else.
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

pub mod anthropic;
pub mod openai;
pub mod prompts;

use anthropic::AnthropicProvider;
use openai::OpenAiProvider;
use prompts::OUTREACH_SYSTEM;

const MAX_TOKENS: u32 = 2048;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl ProviderError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Api { status, .. } => Some(*status),
            ProviderError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Failure reported to callers after both providers have been tried.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("rate limited by the language model provider")]
    RateLimited,

    #[error("language model credits exhausted")]
    QuotaExhausted,

    #[error("generation failed: {0}")]
    Failed(String),
}

impl From<ProviderError> for CompletionError {
    fn from(e: ProviderError) -> Self {
        match e.status() {
            Some(429) => CompletionError::RateLimited,
            Some(402) => CompletionError::QuotaExhausted,
            _ => CompletionError::Failed(e.to_string()),
        }
    }
}

/// Which position in the fallback chain produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderTag {
    Primary,
    Secondary,
}

impl ProviderTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderTag::Primary => "primary",
            ProviderTag::Secondary => "secondary",
        }
    }
}

impl fmt::Display for ProviderTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Completion {
    pub text: String,
    pub provider: ProviderTag,
}

/// One language-model backend. Implementations make a single HTTP attempt.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ProviderError>;

    /// Provider name for logging.
    fn name(&self) -> &str;

    fn model(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
}

impl ProviderKind {
    pub fn default_api_url(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => openai::OPENAI_API_URL,
            ProviderKind::Anthropic => anthropic::ANTHROPIC_API_URL,
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => openai::DEFAULT_MODEL,
            ProviderKind::Anthropic => anthropic::DEFAULT_MODEL,
        }
    }
}

impl FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "anthropic" => Ok(ProviderKind::Anthropic),
            other => anyhow::bail!("unknown LLM provider '{other}' (expected openai or anthropic)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub api_url: String,
    pub api_key: String,
    pub model: String,
}

/// Builds the adapter for one configured provider.
pub fn build_provider(config: &ProviderConfig, http: Client) -> Arc<dyn CompletionProvider> {
    match config.kind {
        ProviderKind::OpenAi => Arc::new(OpenAiProvider::new(
            http,
            config.api_url.clone(),
            config.api_key.clone(),
            config.model.clone(),
        )),
        ProviderKind::Anthropic => Arc::new(AnthropicProvider::new(
            http,
            config.api_url.clone(),
            config.api_key.clone(),
            config.model.clone(),
        )),
    }
}

/// Ordered primary → secondary fallback chain.
#[derive(Clone)]
pub struct CompletionClient {
    chain: Vec<(ProviderTag, Arc<dyn CompletionProvider>)>,
}

impl CompletionClient {
    pub fn new(primary: Arc<dyn CompletionProvider>, secondary: Arc<dyn CompletionProvider>) -> Self {
        Self {
            chain: vec![
                (ProviderTag::Primary, primary),
                (ProviderTag::Secondary, secondary),
            ],
        }
    }

    /// Sends `prompt` with the outreach system instruction. At most two
    /// provider calls are made; the first non-empty answer wins.
    pub async fn complete(&self, prompt: &str) -> Result<Completion, CompletionError> {
        let mut last_error: Option<ProviderError> = None;

        for (tag, provider) in &self.chain {
            let result = provider
                .complete(OUTREACH_SYSTEM, prompt)
                .await
                .and_then(|text| {
                    let text = text.trim();
                    if text.is_empty() {
                        Err(ProviderError::EmptyContent)
                    } else {
                        Ok(text.to_string())
                    }
                });

            match result {
                Ok(text) => {
                    info!(
                        "Completion from {} provider {} ({}), {} chars",
                        tag,
                        provider.name(),
                        provider.model(),
                        text.chars().count()
                    );
                    return Ok(Completion {
                        text,
                        provider: *tag,
                    });
                }
                Err(e) => {
                    warn!("{} provider {} failed: {e}", tag, provider.name());
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .map(CompletionError::from)
            .unwrap_or_else(|| CompletionError::Failed("no providers configured".to_string())))
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

/// Builds an `Api` error, preferring the provider's `error.message` field
/// over the raw body. Both supported APIs use that envelope.
pub(crate) fn api_error(status: u16, body: String) -> ProviderError {
    let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    ProviderError::Api { status, message }
}
