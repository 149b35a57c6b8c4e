use thiserror::Error;

/// Failure kinds of the pipeline. Build-time kinds (`CorpusLoad`,
/// `InvalidChunkingConfig`, `Config`, and `EmbeddingProvider` during index
/// build) abort startup; the provider kinds are surfaced per request at query
/// time.
#[derive(Error, Debug)]
pub enum RagError {
    #[error("Corpus load error: {0}")]
    CorpusLoad(String),

    #[error("Invalid chunking config: {0}")]
    InvalidChunkingConfig(String),

    #[error("Embedding provider error: {0}")]
    EmbeddingProvider(String),

    #[error("Generation provider error: {0}")]
    GenerationProvider(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RagError>;
