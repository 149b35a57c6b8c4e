//! # Text Embeddings
//!
//! Defines the embedding service interface used at index-build time and at
//! query time. Both sides must go through the same implementation so the two
//! embedding spaces stay consistent.

use async_trait::async_trait;

mod config;
pub use config::EnvEmbeddingConfig;

/// Service for generating text embeddings.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    /// Generates an embedding vector for a single text string.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error>;

    /// Generates embedding vectors for multiple texts in a single API call.
    /// More efficient than calling `embed` per text during index build.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, anyhow::Error>;

    /// Name of the embedding model this service uses. Recorded on the index
    /// so a query embedder from a different space is rejected.
    fn model(&self) -> &str;
}
