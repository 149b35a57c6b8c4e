//! # Corpus
//!
//! Build-time half of the pipeline's input path: load per-author document
//! directories into tagged [`Page`]s, then split pages into fixed-size
//! overlapping [`DocumentChunk`]s.
//!
//! No network access; everything here is local filesystem plus pure string
//! work.
//!
//! [`Page`]: rag_core::Page
//! [`DocumentChunk`]: rag_core::DocumentChunk

mod chunker;
mod loader;

pub use chunker::{chunk_pages, ChunkingConfig};
pub use loader::{load_corpus, load_knowledge_base};
