//! Embedding configuration loaded from environment variables.

use anyhow::{Context, Result};
use std::env;

/// Embedding config for an OpenAI-compatible provider.
#[derive(Debug, Clone)]
pub struct EnvEmbeddingConfig {
    pub api_key: String,
    pub model: String,
    /// Optional base URL for OpenAI-compatible endpoints (OPENAI_BASE_URL).
    pub base_url: Option<String>,
}

impl EnvEmbeddingConfig {
    /// Load from environment variables. OPENAI_API_KEY is required;
    /// EMBEDDING_MODEL defaults to `text-embedding-3-small`.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let model = env::var("EMBEDDING_MODEL")
            .unwrap_or_else(|_| "text-embedding-3-small".to_string());
        let base_url = env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        Ok(Self {
            api_key,
            model,
            base_url,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            anyhow::bail!("OPENAI_API_KEY must not be empty");
        }
        if self.model.is_empty() {
            anyhow::bail!("EMBEDDING_MODEL must not be empty");
        }
        Ok(())
    }
}
