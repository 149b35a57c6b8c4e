//! # RAG pipeline
//!
//! The retrieval-and-synthesis core: an in-memory similarity index built once
//! at startup, a retriever that embeds questions and finds the nearest
//! chunks, and a synthesizer that asks the language model for a three-part
//! answer grounded in those chunks.
//!
//! Data flows strictly forward: loader -> chunker -> index at build time,
//! retriever -> synthesizer per request. The index is read-only after build,
//! so [`Pipeline::answer`] is safe to call from any number of concurrent
//! tasks without locking.

mod index;
mod pipeline;
mod prompt;
mod retriever;
mod synthesizer;

pub use index::ChunkIndex;
pub use pipeline::{build_pipeline, Pipeline, PipelineConfig};
pub use prompt::{build_synthesis_prompt, format_context, BUFFETT_FALLBACK, DALIO_FALLBACK};
pub use retriever::{Retriever, DEFAULT_K};
pub use synthesizer::Synthesizer;

/// Up to K chunks ranked by descending similarity to a query embedding.
/// Constructed per request and discarded after use.
pub type RetrievalResult = Vec<rag_core::ScoredChunk>;
