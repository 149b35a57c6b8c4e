//! Chunker: fixed-size character windows with exact overlap.
//!
//! A sliding window is used instead of separator-aware splitting because the
//! retrieval contract requires every chunk length <= `chunk_size` and
//! consecutive same-page chunks to share exactly `chunk_overlap` characters.

use rag_core::{DocumentChunk, Page, RagError, Result};
use tracing::info;

/// Chunking parameters, measured in characters.
#[derive(Debug, Clone, Copy)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

impl ChunkingConfig {
    /// Overlap must be strictly less than size, and size must be positive.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(RagError::InvalidChunkingConfig(
                "chunk_size must be > 0".to_string(),
            ));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(RagError::InvalidChunkingConfig(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}

/// Splits tagged pages into chunks. Deterministic: identical pages and config
/// always yield the identical chunk sequence. Each chunk inherits its page's
/// author tag; `source` becomes `"<page source>#<ordinal>"`.
pub fn chunk_pages(pages: &[Page], config: &ChunkingConfig) -> Result<Vec<DocumentChunk>> {
    config.validate()?;

    let step = config.chunk_size - config.chunk_overlap;
    let mut chunks = Vec::new();

    for page in pages {
        let chars: Vec<char> = page.text.chars().collect();
        if chars.is_empty() {
            continue;
        }
        let mut ordinal = 0usize;
        let mut start = 0usize;
        loop {
            let end = (start + config.chunk_size).min(chars.len());
            chunks.push(DocumentChunk {
                text: chars[start..end].iter().collect(),
                author: page.author,
                source: format!("{}#{}", page.source, ordinal),
            });
            if end == chars.len() {
                break;
            }
            start += step;
            ordinal += 1;
        }
    }

    info!(
        pages = pages.len(),
        chunks = chunks.len(),
        chunk_size = config.chunk_size,
        chunk_overlap = config.chunk_overlap,
        "step: split pages into chunks"
    );
    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rag_core::Author;

    fn page(text: &str) -> Page {
        Page {
            text: text.to_string(),
            author: Author::Buffett,
            source: "test.txt".to_string(),
        }
    }

    #[test]
    fn test_overlap_must_be_smaller_than_size() {
        let config = ChunkingConfig {
            chunk_size: 100,
            chunk_overlap: 100,
        };
        let err = chunk_pages(&[page("abc")], &config).unwrap_err();
        assert!(matches!(err, RagError::InvalidChunkingConfig(_)));

        let config = ChunkingConfig {
            chunk_size: 0,
            chunk_overlap: 0,
        };
        assert!(matches!(
            chunk_pages(&[page("abc")], &config),
            Err(RagError::InvalidChunkingConfig(_))
        ));
    }

    #[test]
    fn test_chunk_length_bounded_and_overlap_exact() {
        let text: String = ('a'..='z').cycle().take(2500).collect();
        for (size, overlap) in [(1000usize, 200usize), (100, 30), (10, 0), (7, 6)] {
            let config = ChunkingConfig {
                chunk_size: size,
                chunk_overlap: overlap,
            };
            let chunks = chunk_pages(&[page(&text)], &config).unwrap();
            assert!(!chunks.is_empty());
            for c in &chunks {
                assert!(c.text.chars().count() <= size);
            }
            for pair in chunks.windows(2) {
                let prev: Vec<char> = pair[0].text.chars().collect();
                let next: Vec<char> = pair[1].text.chars().collect();
                let tail: String = prev[prev.len() - overlap..].iter().collect();
                let head: String = next[..overlap.min(next.len())].iter().collect();
                assert_eq!(tail, head, "size={} overlap={}", size, overlap);
            }
        }
    }

    #[test]
    fn test_short_page_yields_single_chunk() {
        let config = ChunkingConfig::default();
        let chunks = chunk_pages(&[page("short text")], &config).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "short text");
        assert_eq!(chunks[0].source, "test.txt#0");
    }

    #[test]
    fn test_chunks_inherit_author_tag() {
        let pages = vec![
            Page {
                text: "x".repeat(50),
                author: Author::Buffett,
                source: "b.txt".to_string(),
            },
            Page {
                text: "y".repeat(50),
                author: Author::Dalio,
                source: "d.txt".to_string(),
            },
        ];
        let config = ChunkingConfig {
            chunk_size: 20,
            chunk_overlap: 5,
        };
        let chunks = chunk_pages(&pages, &config).unwrap();
        assert!(chunks
            .iter()
            .filter(|c| c.text.contains('x'))
            .all(|c| c.author == Author::Buffett));
        assert!(chunks
            .iter()
            .filter(|c| c.text.contains('y'))
            .all(|c| c.author == Author::Dalio));
    }

    #[test]
    fn test_chunking_is_deterministic() {
        let text: String = "determinism ".repeat(300);
        let config = ChunkingConfig::default();
        let a = chunk_pages(&[page(&text)], &config).unwrap();
        let b = chunk_pages(&[page(&text)], &config).unwrap();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.text, y.text);
            assert_eq!(x.source, y.source);
        }
    }

    #[test]
    fn test_empty_page_produces_no_chunks() {
        let config = ChunkingConfig::default();
        let chunks = chunk_pages(&[page("")], &config).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_multibyte_text_is_split_on_char_boundaries() {
        let text = "价值投资讲究安全边际".repeat(20);
        let config = ChunkingConfig {
            chunk_size: 30,
            chunk_overlap: 10,
        };
        let chunks = chunk_pages(&[page(&text)], &config).unwrap();
        for c in &chunks {
            assert!(c.text.chars().count() <= 30);
        }
    }
}
