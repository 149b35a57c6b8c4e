//! Corpus loader: recursively reads an author's document directory into
//! tagged pages. One text file = one page.

use rag_core::{Author, Page, RagError, Result};
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// File extensions treated as corpus documents. Anything else is skipped.
const TEXT_EXTENSIONS: [&str; 3] = ["txt", "md", "text"];

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| TEXT_EXTENSIONS.iter().any(|t| e.eq_ignore_ascii_case(t)))
        .unwrap_or(false)
}

/// Loads every text document under `dir`, tagging each resulting page with
/// `author`. Enumeration order is sorted by file name so the page sequence
/// (and everything downstream of it) is deterministic.
///
/// A missing or unreadable directory is a [`RagError::CorpusLoad`]; a
/// directory that simply contains no documents is tolerated and logged as a
/// warning, degrading that author's retrieval to "no information found".
pub fn load_corpus(dir: &Path, author: Author) -> Result<Vec<Page>> {
    if !dir.is_dir() {
        return Err(RagError::CorpusLoad(format!(
            "corpus directory for {} does not exist: {}",
            author,
            dir.display()
        )));
    }

    let mut pages = Vec::new();
    let walker = WalkDir::new(dir).sort_by_file_name();
    for entry in walker {
        let entry = entry.map_err(|e| {
            RagError::CorpusLoad(format!("failed to read {}: {}", dir.display(), e))
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        if !is_text_file(path) {
            debug!(path = %path.display(), "skipping non-text file");
            continue;
        }
        let text = std::fs::read_to_string(path).map_err(|e| {
            RagError::CorpusLoad(format!("failed to read {}: {}", path.display(), e))
        })?;
        pages.push(Page {
            text,
            author,
            source: path.display().to_string(),
        });
    }

    if pages.is_empty() {
        warn!(
            author = %author,
            dir = %dir.display(),
            "corpus directory is empty; the bot will have no knowledge of this author"
        );
    } else {
        info!(author = %author, pages = pages.len(), "loaded corpus pages");
    }

    Ok(pages)
}

/// Loads both authors' corpora and returns the combined tagged page list.
pub fn load_knowledge_base(buffett_dir: &Path, dalio_dir: &Path) -> Result<Vec<Page>> {
    info!("step: loading knowledge base");
    let mut pages = load_corpus(buffett_dir, Author::Buffett)?;
    pages.extend(load_corpus(dalio_dir, Author::Dalio)?);
    info!(total_pages = pages.len(), "step: knowledge base loaded");
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_directory_is_corpus_load_error() {
        let err = load_corpus(Path::new("/nonexistent/corpus"), Author::Buffett).unwrap_err();
        assert!(matches!(err, RagError::CorpusLoad(_)));
    }

    #[test]
    fn test_empty_directory_is_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let pages = load_corpus(dir.path(), Author::Dalio).unwrap();
        assert!(pages.is_empty());
    }

    #[test]
    fn test_pages_are_tagged_with_author() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("letters.txt"), "Price is what you pay.").unwrap();
        fs::write(dir.path().join("notes.md"), "Value is what you get.").unwrap();

        let pages = load_corpus(dir.path(), Author::Buffett).unwrap();
        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|p| p.author == Author::Buffett));
    }

    #[test]
    fn test_non_text_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("report.pdf"), b"%PDF-1.4 binary").unwrap();
        fs::write(dir.path().join("essay.txt"), "Diversification.").unwrap();

        let pages = load_corpus(dir.path(), Author::Dalio).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].source.ends_with("essay.txt"));
    }

    #[test]
    fn test_enumeration_order_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "second").unwrap();
        fs::write(dir.path().join("a.txt"), "first").unwrap();

        let pages = load_corpus(dir.path(), Author::Buffett).unwrap();
        assert_eq!(pages[0].text, "first");
        assert_eq!(pages[1].text, "second");
    }

    #[test]
    fn test_load_knowledge_base_combines_both_authors() {
        let buffett = tempfile::tempdir().unwrap();
        let dalio = tempfile::tempdir().unwrap();
        fs::write(buffett.path().join("b.txt"), "moats").unwrap();
        fs::write(dalio.path().join("d.txt"), "principles").unwrap();

        let pages = load_knowledge_base(buffett.path(), dalio.path()).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].author, Author::Buffett);
        assert_eq!(pages[1].author, Author::Dalio);
    }
}
