//! Answer synthesizer: renders retrieved chunks into the fixed three-part
//! prompt and returns the model's reply verbatim.

use crate::prompt::{build_synthesis_prompt, format_context, SECTION_HEADERS};
use crate::RetrievalResult;
use llm_client::LlmClient;
use rag_core::{RagError, Result};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Stateless across requests; the only shared state it touches is the
/// read-only index upstream of it.
pub struct Synthesizer {
    llm: Arc<dyn LlmClient>,
}

impl Synthesizer {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Fills the synthesis template with the raw question and the rendered
    /// context block, sends it to the generation provider, and returns the
    /// generated text unmodified.
    ///
    /// The model's adherence to the three-section structure is checked only
    /// to emit a warning; the text is never parsed, repaired, or retried.
    #[instrument(skip(self, question, chunks), fields(chunks = chunks.len()))]
    pub async fn synthesize(&self, question: &str, chunks: &RetrievalResult) -> Result<String> {
        let context = format_context(chunks);
        let prompt = build_synthesis_prompt(question, &context);

        info!(
            context_len = context.len(),
            prompt_len = prompt.len(),
            "step: requesting synthesis"
        );

        let answer = self
            .llm
            .complete(&prompt)
            .await
            .map_err(|e| RagError::GenerationProvider(e.to_string()))?;

        let missing: Vec<&str> = SECTION_HEADERS
            .iter()
            .filter(|h| !answer.contains(**h))
            .copied()
            .collect();
        if !missing.is_empty() {
            warn!(missing = ?missing, "model output is missing expected section headers");
        }

        info!(answer_len = answer.len(), "step: synthesis done");
        Ok(answer)
    }
}
