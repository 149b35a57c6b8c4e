//! Splitting long answers to fit Telegram's single-message size limit.
//! The pipeline returns one string; delivery chunking belongs here.

/// Telegram's maximum message length in characters.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Splits `text` into pieces of at most `limit` characters, in order.
/// Splits on char boundaries, so multi-byte text stays valid UTF-8.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    assert!(limit > 0, "limit must be positive");
    if text.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(limit)
        .map(|c| c.iter().collect())
        .collect()
}
