//! In-memory similarity index over chunk embeddings.
//!
//! Built once at startup and read-only thereafter; there are no insert or
//! delete operations. Lookup is exact nearest-neighbor by cosine similarity.

use embedding::EmbeddingService;
use rag_core::{DocumentChunk, RagError, Result, ScoredChunk};
use tracing::{info, instrument};

/// Chunks are embedded in batches of this size during build.
const EMBED_BATCH_SIZE: usize = 64;

struct IndexEntry {
    embedding: Vec<f32>,
    chunk: DocumentChunk,
}

/// Similarity index: every entry pairs an embedding vector with its owning
/// chunk. Carries the embedding model name it was built with so a retriever
/// using a different model can be rejected up front.
pub struct ChunkIndex {
    entries: Vec<IndexEntry>,
    embedding_model: String,
}

impl std::fmt::Debug for ChunkIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkIndex")
            .field("entries", &self.entries.len())
            .field("embedding_model", &self.embedding_model)
            .finish()
    }
}

impl ChunkIndex {
    /// Embeds every chunk via `embedder` and builds the index.
    ///
    /// A provider failure here is fatal to startup: without a complete index
    /// the system cannot answer anything, so no partial index is returned.
    #[instrument(skip(chunks, embedder), fields(chunks = chunks.len()))]
    pub async fn build(
        chunks: Vec<DocumentChunk>,
        embedder: &dyn EmbeddingService,
    ) -> Result<Self> {
        info!(
            chunks = chunks.len(),
            model = embedder.model(),
            "step: building similarity index"
        );

        let mut entries = Vec::with_capacity(chunks.len());
        for batch in chunks.chunks(EMBED_BATCH_SIZE) {
            let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
            let vectors = embedder
                .embed_batch(&texts)
                .await
                .map_err(|e| RagError::EmbeddingProvider(e.to_string()))?;
            for (chunk, embedding) in batch.iter().cloned().zip(vectors) {
                entries.push(IndexEntry { embedding, chunk });
            }
        }

        info!(entries = entries.len(), "step: similarity index built");
        Ok(Self {
            entries,
            embedding_model: embedder.model().to_string(),
        })
    }

    /// Model the index embeddings were produced with.
    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the top `k` entries by cosine similarity to `query`, highest
    /// first. The sort is stable, so equal scores keep insertion order and
    /// repeated queries yield identical results.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<ScoredChunk> {
        let mut scored: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|entry| ScoredChunk {
                score: cosine_similarity(query, &entry.embedding),
                chunk: entry.chunk.clone(),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(k);
        scored
    }
}

/// Cosine similarity: (a . b) / (||a|| * ||b||). Empty or zero vectors score
/// 0.0 to avoid division by zero.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rag_core::Author;

    /// Maps each known text to a fixed vector so similarity ordering is
    /// controlled by the test.
    struct FixedEmbedding;

    fn vector_for(text: &str) -> Vec<f32> {
        match text {
            "alpha" => vec![1.0, 0.0, 0.0],
            "beta" => vec![0.8, 0.6, 0.0],
            "gamma" => vec![0.0, 1.0, 0.0],
            _ => vec![0.0, 0.0, 1.0],
        }
    }

    #[async_trait]
    impl embedding::EmbeddingService for FixedEmbedding {
        async fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
            Ok(vector_for(text))
        }

        async fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|t| vector_for(t)).collect())
        }

        fn model(&self) -> &str {
            "fixed-test-model"
        }
    }

    fn chunk(text: &str, author: Author) -> DocumentChunk {
        DocumentChunk {
            text: text.to_string(),
            author,
            source: format!("{}.txt#0", text),
        }
    }

    async fn build_index() -> ChunkIndex {
        let chunks = vec![
            chunk("alpha", Author::Buffett),
            chunk("beta", Author::Buffett),
            chunk("gamma", Author::Dalio),
        ];
        ChunkIndex::build(chunks, &FixedEmbedding).await.unwrap()
    }

    #[tokio::test]
    async fn test_build_records_model_and_size() {
        let index = build_index().await;
        assert_eq!(index.len(), 3);
        assert_eq!(index.embedding_model(), "fixed-test-model");
    }

    #[tokio::test]
    async fn test_search_orders_by_descending_similarity() {
        let index = build_index().await;
        let results = index.search(&[1.0, 0.0, 0.0], 3);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].chunk.text, "alpha");
        assert_eq!(results[1].chunk.text, "beta");
        assert_eq!(results[2].chunk.text, "gamma");
        assert!(results[0].score >= results[1].score);
        assert!(results[1].score >= results[2].score);
    }

    #[tokio::test]
    async fn test_search_returns_at_most_k() {
        let index = build_index().await;
        assert_eq!(index.search(&[1.0, 0.0, 0.0], 2).len(), 2);
        assert_eq!(index.search(&[1.0, 0.0, 0.0], 10).len(), 3);
    }

    #[tokio::test]
    async fn test_search_is_deterministic_for_tied_scores() {
        // All entries orthogonal to the query score 0.0; insertion order must
        // be preserved across repeated searches.
        let chunks = vec![
            chunk("first", Author::Buffett),
            chunk("second", Author::Dalio),
            chunk("third", Author::Buffett),
        ];
        let index = ChunkIndex::build(chunks, &FixedEmbedding).await.unwrap();
        let query = vec![1.0, 0.0, 0.0];
        let a: Vec<String> = index
            .search(&query, 3)
            .into_iter()
            .map(|s| s.chunk.text)
            .collect();
        let b: Vec<String> = index
            .search(&query, 3)
            .into_iter()
            .map(|s| s.chunk.text)
            .collect();
        assert_eq!(a, b);
        assert_eq!(a, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_build_fails_fatally_on_provider_error() {
        struct FailingEmbedding;

        #[async_trait]
        impl embedding::EmbeddingService for FailingEmbedding {
            async fn embed(&self, _text: &str) -> anyhow::Result<Vec<f32>> {
                anyhow::bail!("auth failure")
            }
            async fn embed_batch(&self, _texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
                anyhow::bail!("auth failure")
            }
            fn model(&self) -> &str {
                "failing"
            }
        }

        let err = ChunkIndex::build(vec![chunk("alpha", Author::Buffett)], &FailingEmbedding)
            .await
            .unwrap_err();
        assert!(matches!(err, RagError::EmbeddingProvider(_)));
    }

    #[test]
    fn test_cosine_similarity_edge_cases() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        let sim = cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]);
        assert!((sim - 1.0).abs() < 1e-6);
        let opposite = cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]);
        assert!((opposite + 1.0).abs() < 1e-6);
    }
}
