//! Core types and error taxonomy shared across the RAG pipeline crates.
//! Transport-agnostic: nothing here knows about Telegram or OpenAI.

pub mod error;
pub mod logger;
pub mod types;

pub use error::{RagError, Result};
pub use logger::init_tracing;
pub use types::{Author, DocumentChunk, Page, ScoredChunk};
