//! # OpenAI Embedding Service
//!
//! [`EmbeddingService`] implementation over OpenAI's embeddings API
//! (e.g. `text-embedding-3-small`, 1536 dimensions). Used for both index
//! build (batched) and per-question query embedding.

use async_openai::{types::CreateEmbeddingRequestArgs, Client};
use async_trait::async_trait;
use embedding::EmbeddingService;
use tracing::{debug, info, instrument, warn};

/// Timeout for a single embed request (connect + request + response).
const EMBED_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);
/// Timeout for a batch request; longer due to larger payloads.
const EMBED_BATCH_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);

/// OpenAI embedding service. Holds the async-openai client and model name.
#[derive(Debug, Clone)]
pub struct OpenAIEmbedding {
    client: Client<async_openai::config::OpenAIConfig>,
    model: String,
}

impl OpenAIEmbedding {
    /// Creates a service for the given API key and embedding model.
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_base_url(api_key, model, None)
    }

    /// Creates a service pointed at an OpenAI-compatible base URL.
    pub fn new_with_base_url(api_key: String, model: String, base_url: Option<&str>) -> Self {
        let mut openai_config = async_openai::config::OpenAIConfig::new().with_api_key(api_key);
        if let Some(url) = base_url.filter(|s| !s.is_empty()) {
            openai_config = openai_config.with_api_base(url);
        }
        let client = Client::with_config(openai_config);
        Self { client, model }
    }

    /// Default model: `text-embedding-3-small`.
    pub fn with_api_key(api_key: String) -> Self {
        Self::new(api_key, "text-embedding-3-small".to_string())
    }
}

#[async_trait]
impl EmbeddingService for OpenAIEmbedding {
    /// Embeds a single text (the question at query time).
    ///
    /// # Errors
    ///
    /// Fails on invalid/missing API key, network errors, rate limits,
    /// timeouts, or a response without embedding data.
    #[instrument(skip(self, text), fields(model = %self.model, text_len = text.len()))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
        info!(model = %self.model, text_len = text.len(), "step: embed request");

        let request = CreateEmbeddingRequestArgs::default()
            .model(self.model.clone())
            .input(vec![text])
            .build()?;

        let embeddings = self.client.embeddings();
        let response = match tokio::time::timeout(EMBED_TIMEOUT, embeddings.create(request)).await
        {
            Ok(Ok(r)) => {
                debug!("embed response received");
                r
            }
            Ok(Err(e)) => {
                warn!(error = %e, "embed request failed");
                return Err(e.into());
            }
            Err(_) => {
                warn!(timeout_secs = EMBED_TIMEOUT.as_secs(), "embed request timed out");
                return Err(anyhow::anyhow!(
                    "OpenAI embed request timed out after {} seconds",
                    EMBED_TIMEOUT.as_secs()
                ));
            }
        };

        let embedding = match response.data.first() {
            Some(item) => item.embedding.clone(),
            None => {
                warn!("embed response has no embedding data");
                return Err(anyhow::anyhow!("No embedding in response"));
            }
        };

        info!(dimension = embedding.len(), "step: embed done");
        Ok(embedding)
    }

    /// Embeds a batch of chunk texts in one API call (index build).
    ///
    /// Returns vectors in input order; fails if the provider returns a
    /// different count than requested.
    #[instrument(skip(self, texts), fields(model = %self.model, batch_size = texts.len()))]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, anyhow::Error> {
        if texts.is_empty() {
            debug!("embed_batch empty input, skipping");
            return Ok(vec![]);
        }

        info!(model = %self.model, batch_size = texts.len(), "step: embed_batch request");

        let inputs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();
        let request = CreateEmbeddingRequestArgs::default()
            .model(self.model.clone())
            .input(inputs)
            .build()?;

        let embeddings = self.client.embeddings();
        let response =
            match tokio::time::timeout(EMBED_BATCH_TIMEOUT, embeddings.create(request)).await {
                Ok(Ok(r)) => {
                    debug!("embed_batch response received");
                    r
                }
                Ok(Err(e)) => {
                    warn!(error = %e, "embed_batch request failed");
                    return Err(e.into());
                }
                Err(_) => {
                    warn!(
                        timeout_secs = EMBED_BATCH_TIMEOUT.as_secs(),
                        "embed_batch request timed out"
                    );
                    return Err(anyhow::anyhow!(
                        "OpenAI embed_batch request timed out after {} seconds",
                        EMBED_BATCH_TIMEOUT.as_secs()
                    ));
                }
            };

        let embeddings: Vec<Vec<f32>> = response
            .data
            .into_iter()
            .map(|item| item.embedding)
            .collect();

        if embeddings.len() != texts.len() {
            warn!(
                expected = texts.len(),
                got = embeddings.len(),
                "embed_batch response count mismatch"
            );
            return Err(anyhow::anyhow!(
                "Expected {} embeddings, got {}",
                texts.len(),
                embeddings.len()
            ));
        }

        let dimension = embeddings.first().map(|v| v.len()).unwrap_or(0);
        info!(count = embeddings.len(), dimension = dimension, "step: embed_batch done");
        Ok(embeddings)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedding::EmbeddingService;

    #[test]
    fn test_model_name_reported() {
        let svc = OpenAIEmbedding::new("dummy".to_string(), "text-embedding-3-large".to_string());
        assert_eq!(svc.model(), "text-embedding-3-large");
    }

    #[test]
    fn test_default_model() {
        let svc = OpenAIEmbedding::with_api_key("dummy".to_string());
        assert_eq!(svc.model(), "text-embedding-3-small");
    }

    #[tokio::test]
    async fn test_embed_batch_empty_input_is_noop() {
        let svc = OpenAIEmbedding::with_api_key("dummy".to_string());
        let result = svc.embed_batch(&[]).await.unwrap();
        assert!(result.is_empty());
    }
}
