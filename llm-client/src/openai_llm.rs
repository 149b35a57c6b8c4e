//! OpenAI implementation of [`LlmClient`]: single-shot chat completion with a
//! configurable sampling temperature.

use async_openai::{
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::instrument;

use super::{mask_token, LlmClient};

/// Chat client over async-openai. The prompt is sent as one user message;
/// low temperature favors deterministic, grounded answers.
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
    /// Kept only for masked logging.
    api_key_for_logging: String,
}

impl OpenAILlmClient {
    pub fn new(api_key: String) -> Self {
        let api_key_for_logging = api_key.clone();
        let config = async_openai::config::OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Client::with_config(config),
            model: "gpt-4o".to_string(),
            temperature: 0.1,
            api_key_for_logging,
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let api_key_for_logging = api_key.clone();
        let config = async_openai::config::OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self {
            client: Client::with_config(config),
            model: "gpt-4o".to_string(),
            temperature: 0.1,
            api_key_for_logging,
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    /// Sends the prompt as a single user message and returns the first
    /// choice's content. Logs masked API key and token usage.
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn complete(&self, prompt: &str) -> Result<String, anyhow::Error> {
        tracing::info!(
            model = %self.model,
            temperature = self.temperature,
            prompt_len = prompt.len(),
            api_key = %mask_token(&self.api_key_for_logging),
            "OpenAI chat_completion request"
        );

        let messages: Vec<ChatCompletionRequestMessage> =
            vec![ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into()];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(self.temperature)
            .messages(messages)
            .build()?;

        if let Ok(json) = serde_json::to_string(&request) {
            tracing::debug!(request_json = %json, "OpenAI chat_completion request JSON");
        }

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "OpenAI chat_completion usage"
            );
        }

        if let Some(choice) = response.choices.first() {
            content_or_err(choice.message.content.clone())
        } else {
            anyhow::bail!("No response from OpenAI");
        }
    }
}

/// A choice without content is a provider failure, surfaced as an error
/// rather than returned as a silent empty reply.
fn content_or_err(content: Option<String>) -> Result<String, anyhow::Error> {
    match content {
        Some(text) => Ok(text),
        None => anyhow::bail!("Response choice has no content"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = OpenAILlmClient::new("dummy_key".to_string());
        assert_eq!(client.model(), "gpt-4o");
        assert!((client.temperature() - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_builder_overrides() {
        let client = OpenAILlmClient::new("dummy_key".to_string())
            .with_model("gpt-4o-mini".to_string())
            .with_temperature(0.0);
        assert_eq!(client.model(), "gpt-4o-mini");
        assert_eq!(client.temperature(), 0.0);
    }

    #[test]
    fn test_base_url_constructor_keeps_defaults() {
        let client = OpenAILlmClient::with_base_url(
            "dummy_key".to_string(),
            "https://example.invalid/v1".to_string(),
        );
        assert_eq!(client.model(), "gpt-4o");
        assert!((client.temperature() - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_missing_choice_content_is_an_error() {
        assert_eq!(content_or_err(Some("answer".to_string())).unwrap(), "answer");
        let err = content_or_err(None).unwrap_err();
        assert!(err.to_string().contains("no content"));
    }
}
