//! Data model of the pipeline: authors, pages, chunks, scored results.

use serde::{Deserialize, Serialize};

/// The two voices the bot synthesizes. Exactly two values exist; a chunk can
/// never carry any other provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Author {
    Buffett,
    Dalio,
}

impl Author {
    /// Label used in prompt context blocks and log lines.
    pub fn display_name(&self) -> &'static str {
        match self {
            Author::Buffett => "Warren Buffett",
            Author::Dalio => "Ray Dalio",
        }
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One plain-text page produced by the corpus loader; input to the chunker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub text: String,
    pub author: Author,
    /// Opaque locator of the originating file.
    pub source: String,
}

/// Bounded span of page text with inherited provenance. Immutable once
/// created; rebuilt wholesale when the index is rebuilt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub text: String,
    pub author: Author,
    /// `"<path>#<chunk-ordinal>"` within the source page.
    pub source: String,
}

/// A retrieved chunk with its similarity to the query embedding.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: DocumentChunk,
    pub score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_display_names() {
        assert_eq!(Author::Buffett.display_name(), "Warren Buffett");
        assert_eq!(Author::Dalio.display_name(), "Ray Dalio");
        assert_eq!(format!("{}", Author::Dalio), "Ray Dalio");
    }
}
