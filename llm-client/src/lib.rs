//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait and an OpenAI chat-completion
//! implementation. Transport-agnostic; the answer synthesizer is its only
//! production caller.

use async_trait::async_trait;

mod openai_llm;

pub use openai_llm::OpenAILlmClient;

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If 11 chars or shorter, returns "***" to avoid leaking any part of the key.
/// Counts chars, not bytes, so multibyte tokens cannot split a codepoint.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 11 {
        "***".to_string()
    } else {
        let head: String = chars[..7].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}***{}", head, tail)
    }
}

/// Text-generation client: one prompt in, the model's reply text out.
///
/// The prompt is passed through unmodified; implementations must not
/// truncate over-long input. Provider failures (including input-limit
/// rejections) surface as errors, never as an empty reply.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, anyhow::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token_short_is_fully_hidden() {
        assert_eq!(mask_token(""), "***");
        assert_eq!(mask_token("sk-12345678"), "***");
    }

    #[test]
    fn test_mask_token_long_shows_head_and_tail() {
        let masked = mask_token("sk-proj-abcdefghijklmnop");
        assert_eq!(masked, "sk-proj***mnop");
        assert!(!masked.contains("abcdefghijkl"));
    }

    #[test]
    fn test_mask_token_multibyte_does_not_panic() {
        assert_eq!(mask_token("密钥密钥密钥密钥密钥密"), "***");
        let masked = mask_token("密钥-abcdefg-千里之行始于足下");
        assert_eq!(masked, "密钥-abcd***始于足下");
    }
}
