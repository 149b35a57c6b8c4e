//! Retriever: embeds a question and returns the top-K most similar chunks.

use crate::index::ChunkIndex;
use crate::RetrievalResult;
use embedding::EmbeddingService;
use rag_core::{RagError, Result};
use std::sync::Arc;
use tracing::{info, instrument};

/// Default number of chunks retrieved per question.
pub const DEFAULT_K: usize = 6;

/// Query-time half of the index. The question must be embedded with the same
/// model the index was built with; a mismatched embedding space would produce
/// nonsense similarity scores, so `new` refuses it outright.
pub struct Retriever {
    index: Arc<ChunkIndex>,
    embedder: Arc<dyn EmbeddingService>,
    k: usize,
}

impl std::fmt::Debug for Retriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Retriever")
            .field("index", &self.index)
            .field("k", &self.k)
            .finish_non_exhaustive()
    }
}

impl Retriever {
    pub fn new(
        index: Arc<ChunkIndex>,
        embedder: Arc<dyn EmbeddingService>,
        k: usize,
    ) -> Result<Self> {
        if index.embedding_model() != embedder.model() {
            return Err(RagError::Config(format!(
                "embedding model mismatch: index built with '{}', query embedder uses '{}'",
                index.embedding_model(),
                embedder.model()
            )));
        }
        Ok(Self { index, embedder, k })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Embeds `question` and returns up to `k` chunks in descending
    /// similarity order. Deterministic for identical inputs.
    #[instrument(skip(self, question), fields(k = self.k, question_len = question.len()))]
    pub async fn retrieve(&self, question: &str) -> Result<RetrievalResult> {
        let query = self
            .embedder
            .embed(question)
            .await
            .map_err(|e| RagError::EmbeddingProvider(e.to_string()))?;

        let results = self.index.search(&query, self.k);
        info!(
            retrieved = results.len(),
            top_score = results.first().map(|s| s.score).unwrap_or(0.0),
            "step: retrieved chunks"
        );
        Ok(results)
    }
}
