//! Process configuration from environment variables. Both credentials are
//! required; everything else has a default.

use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub openai_api_key: String,
    /// Optional OpenAI-compatible endpoint (OPENAI_BASE_URL) used for chat
    /// completion; the embedder reads the same variable via its own config.
    pub openai_base_url: Option<String>,
    pub telegram_bot_token: String,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub retrieve_k: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub buffett_data_dir: String,
    pub dalio_data_dir: String,
    /// When set (hosting platforms inject PORT), a bare health listener is
    /// started on this port.
    pub port: Option<u16>,
    pub log_file: String,
    pub thinking_message: String,
}

impl EnvConfig {
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let telegram_bot_token =
            env::var("TELEGRAM_BOT_TOKEN").context("TELEGRAM_BOT_TOKEN not set")?;
        let llm_model = env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());
        let llm_temperature = env::var("LLM_TEMPERATURE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.1);
        let retrieve_k = env::var("RETRIEVE_K")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(6);
        let chunk_size = env::var("CHUNK_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1000);
        let chunk_overlap = env::var("CHUNK_OVERLAP")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(200);
        let buffett_data_dir =
            env::var("BUFFETT_DATA_DIR").unwrap_or_else(|_| "data/buffett".to_string());
        let dalio_data_dir =
            env::var("DALIO_DATA_DIR").unwrap_or_else(|_| "data/dalio".to_string());
        let port = env::var("PORT").ok().and_then(|s| s.parse().ok());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/philobot.log".to_string());
        let thinking_message = env::var("THINKING_MESSAGE").unwrap_or_else(|_| {
            "Thinking... Retrieving and synthesizing a response. This may take a moment."
                .to_string()
        });

        Ok(Self {
            openai_api_key,
            openai_base_url,
            telegram_bot_token,
            llm_model,
            llm_temperature,
            retrieve_k,
            chunk_size,
            chunk_overlap,
            buffett_data_dir,
            dalio_data_dir,
            port,
            log_file,
            thinking_message,
        })
    }

    /// Absence of either credential prevents startup.
    pub fn validate(&self) -> Result<()> {
        if self.openai_api_key.trim().is_empty() {
            anyhow::bail!("OPENAI_API_KEY is not set");
        }
        if self.telegram_bot_token.trim().is_empty() {
            anyhow::bail!("TELEGRAM_BOT_TOKEN is not set");
        }
        if self.retrieve_k == 0 {
            anyhow::bail!("RETRIEVE_K must be > 0");
        }
        Ok(())
    }
}
