use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::{ProviderConfig, ProviderKind};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub primary_llm: ProviderConfig,
    pub secondary_llm: ProviderConfig,
    /// Per-request timeout for provider calls. `None` keeps the transport default.
    pub llm_timeout: Option<Duration>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            primary_llm: provider_from_env("PRIMARY", ProviderKind::OpenAi)?,
            secondary_llm: provider_from_env("SECONDARY", ProviderKind::Anthropic)?,
            llm_timeout: std::env::var("LLM_TIMEOUT_SECS")
                .ok()
                .map(|v| v.parse::<u64>().map(Duration::from_secs))
                .transpose()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads `{prefix}_LLM_PROVIDER`, `_API_KEY`, `_API_URL` and `_MODEL`.
fn provider_from_env(prefix: &str, default_kind: ProviderKind) -> Result<ProviderConfig> {
    let kind = match std::env::var(format!("{prefix}_LLM_PROVIDER")) {
        Ok(raw) => raw
            .parse::<ProviderKind>()
            .with_context(|| format!("Invalid {prefix}_LLM_PROVIDER"))?,
        Err(_) => default_kind,
    };

    Ok(ProviderConfig {
        kind,
        api_key: require_env(&format!("{prefix}_LLM_API_KEY"))?,
        api_url: std::env::var(format!("{prefix}_LLM_API_URL"))
            .unwrap_or_else(|_| kind.default_api_url().to_string()),
        model: std::env::var(format!("{prefix}_LLM_MODEL"))
            .unwrap_or_else(|_| kind.default_model().to_string()),
    })
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
