//! `philobot` binary: validate config, start the health listener, build the
//! pipeline once, then poll Telegram. Build failures abort startup; no
//! partial pipeline ever serves.

use anyhow::Result;
use clap::Parser;
use corpus::ChunkingConfig;
use embedding::{EmbeddingService, EnvEmbeddingConfig};
use llm_client::{LlmClient, OpenAILlmClient};
use openai_embedding::OpenAIEmbedding;
use philobot_cli::{serve_health, Cli, Commands, EnvConfig};
use rag_pipeline::{build_pipeline, PipelineConfig};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run { token } => run(token).await,
    }
}

async fn run(token_override: Option<String>) -> Result<()> {
    let mut config = EnvConfig::from_env()?;
    if let Some(token) = token_override {
        config.telegram_bot_token = token;
    }
    config.validate()?;

    rag_core::init_tracing(&config.log_file)?;
    info!("Bot application starting...");

    // The port check must pass even while the build is still embedding.
    if let Some(port) = config.port {
        tokio::spawn(async move {
            if let Err(e) = serve_health(port).await {
                error!(error = %e, port = port, "health listener failed");
            }
        });
    }

    let embed_config = EnvEmbeddingConfig::from_env()?;
    embed_config.validate()?;
    let embedder: Arc<dyn EmbeddingService> = Arc::new(OpenAIEmbedding::new_with_base_url(
        embed_config.api_key.clone(),
        embed_config.model.clone(),
        embed_config.base_url.as_deref(),
    ));
    let llm_client = match &config.openai_base_url {
        Some(url) => {
            OpenAILlmClient::with_base_url(config.openai_api_key.clone(), url.clone())
        }
        None => OpenAILlmClient::new(config.openai_api_key.clone()),
    };
    let llm: Arc<dyn LlmClient> = Arc::new(
        llm_client
            .with_model(config.llm_model.clone())
            .with_temperature(config.llm_temperature),
    );

    let mut pipeline_config =
        PipelineConfig::new(&config.buffett_data_dir, &config.dalio_data_dir);
    pipeline_config.chunking = ChunkingConfig {
        chunk_size: config.chunk_size,
        chunk_overlap: config.chunk_overlap,
    };
    pipeline_config.retrieve_k = config.retrieve_k;

    info!("Building pipeline... This may take a few minutes as knowledge is loaded.");
    let pipeline = match build_pipeline(&pipeline_config, embedder, llm).await {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, "FATAL: pipeline build failed");
            return Err(e.into());
        }
    };
    info!("Pipeline successfully built and in memory.");

    let bot = teloxide::Bot::new(config.telegram_bot_token.clone());
    telegram_transport::run_repl(bot, Arc::new(pipeline), config.thinking_message.clone()).await
}
