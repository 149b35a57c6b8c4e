//! Pipeline assembly: run loader -> chunker -> indexer once, then expose
//! `answer` for the transport to call per incoming question.

use crate::index::ChunkIndex;
use crate::retriever::{Retriever, DEFAULT_K};
use crate::synthesizer::Synthesizer;
use corpus::{chunk_pages, load_knowledge_base, ChunkingConfig};
use embedding::EmbeddingService;
use llm_client::LlmClient;
use rag_core::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument};

/// Build parameters for the pipeline. Credentials live with the injected
/// provider clients, not here.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub buffett_dir: PathBuf,
    pub dalio_dir: PathBuf,
    pub chunking: ChunkingConfig,
    pub retrieve_k: usize,
}

impl PipelineConfig {
    pub fn new(buffett_dir: impl Into<PathBuf>, dalio_dir: impl Into<PathBuf>) -> Self {
        Self {
            buffett_dir: buffett_dir.into(),
            dalio_dir: dalio_dir.into(),
            chunking: ChunkingConfig::default(),
            retrieve_k: DEFAULT_K,
        }
    }
}

/// The built pipeline. Owned by the composition root and shared by reference
/// into the transport; never reconstructed per request, never mutated after
/// build. `answer` may run concurrently from any number of tasks.
pub struct Pipeline {
    retriever: Retriever,
    synthesizer: Synthesizer,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline").finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Answers one question: retrieve top-K chunks, then synthesize.
    ///
    /// `session_id` identifies the requester for logging only; no
    /// cross-request state is kept, so each call is independent.
    #[instrument(skip(self, question), fields(session_id = %session_id, question_len = question.len()))]
    pub async fn answer(&self, question: &str, session_id: &str) -> Result<String> {
        let chunks = self.retriever.retrieve(question).await?;
        self.synthesizer.synthesize(question, &chunks).await
    }
}

/// Builds the whole pipeline: load both corpora, chunk, embed, index.
/// Network-bound on embedding calls; completes fully (or fails) before the
/// returned pipeline can serve its first query. Any error here is fatal to
/// startup.
#[instrument(skip(config, embedder, llm))]
pub async fn build_pipeline(
    config: &PipelineConfig,
    embedder: Arc<dyn EmbeddingService>,
    llm: Arc<dyn LlmClient>,
) -> Result<Pipeline> {
    let started = Instant::now();
    info!(
        buffett_dir = %config.buffett_dir.display(),
        dalio_dir = %config.dalio_dir.display(),
        k = config.retrieve_k,
        "step: building pipeline"
    );

    config.chunking.validate()?;

    let pages = load_knowledge_base(&config.buffett_dir, &config.dalio_dir)?;
    let chunks = chunk_pages(&pages, &config.chunking)?;
    let index = Arc::new(ChunkIndex::build(chunks, embedder.as_ref()).await?);

    let retriever = Retriever::new(index, embedder, config.retrieve_k)?;
    let synthesizer = Synthesizer::new(llm);

    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "step: pipeline built"
    );
    Ok(Pipeline {
        retriever,
        synthesizer,
    })
}
