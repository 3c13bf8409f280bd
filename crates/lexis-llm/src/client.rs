//! Chat-completion client with bounded retry and exponential backoff.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info, warn};

use lexis_core::Metadata;

use crate::config::{LlmConfig, RequestBudget};
use crate::error::LlmError;
use crate::normalize::{parse_metadata, MetadataOutcome};
use crate::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::TextAnalyzer;

const SUMMARY_SYSTEM_PROMPT: &str = "You are a helpful assistant that creates concise, accurate summaries. Respond only with the summary text.";

const METADATA_SYSTEM_PROMPT: &str = "You are a helpful assistant that extracts structured metadata. Respond only with valid JSON. No markdown. No extra text.";

fn summary_prompt(text: &str, max_sentences: usize) -> String {
    format!(
        "Summarize the following text in exactly {max_sentences} sentences. Be concise and accurate.\n\n\
         Text: {text}\n\n\
         Summary:"
    )
}

fn metadata_prompt(text: &str) -> String {
    format!(
        "Analyze the following text and extract metadata. Respond ONLY with a valid JSON object containing these exact fields:\n\
         - title: A descriptive, specific title that captures the main topic (max 50 chars, be specific and informative)\n\
         - topics: An array of exactly 3 key topics/themes (max 20 chars each)\n\
         - sentiment: One of: \"positive\", \"neutral\", or \"negative\"\n\n\
         Text: {text}\n\n\
         JSON:"
    )
}

/// Client for an OpenAI-compatible chat-completion endpoint.
pub struct LlmClient {
    http: Client,
    config: LlmConfig,
    api_key: String,
}

impl LlmClient {
    /// Build a client. Fails without a credential.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let api_key = config.api_key.clone().ok_or(LlmError::MissingApiKey)?;
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            config,
            api_key,
        })
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// One request, no retry. Returns the first choice's content.
    async fn send_once(&self, request: &ChatCompletionRequest) -> Result<String, LlmError> {
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Decode(e.to_string()))?;

        parsed.into_content().ok_or(LlmError::EmptyPayload)
    }

    /// Send a chat completion, retrying failed attempts with exponential backoff.
    ///
    /// Every failure kind is retried. After the final attempt the last error is
    /// returned wrapped in [`LlmError::Exhausted`].
    pub async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        budget: RequestBudget,
    ) -> Result<String, LlmError> {
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.effective_max_tokens(budget),
            temperature: budget.temperature,
        };
        let policy = self.config.retry;

        debug!(
            model = %request.model,
            max_tokens = request.max_tokens,
            "Sending chat completion to {}",
            self.endpoint()
        );

        let mut attempt: u32 = 0;
        loop {
            match self.send_once(&request).await {
                Ok(content) => return Ok(content),
                Err(e) if attempt + 1 < policy.max_attempts => {
                    let delay = policy.delay_after(attempt);
                    warn!(
                        attempt = attempt + 1,
                        max_attempts = policy.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Chat completion failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    return Err(LlmError::Exhausted {
                        attempts: attempt + 1,
                        last: Box::new(e),
                    });
                }
            }
        }
    }

    /// Summarize `text` in `max_sentences` sentences.
    pub async fn generate_summary(
        &self,
        text: &str,
        max_sentences: usize,
    ) -> Result<String, LlmError> {
        let messages = vec![
            ChatMessage::system(SUMMARY_SYSTEM_PROMPT),
            ChatMessage::user(summary_prompt(text, max_sentences)),
        ];

        match self.chat_completion(messages, self.config.summary).await {
            Ok(content) => {
                let summary = content.trim().to_string();
                info!(
                    summary_length = summary.len(),
                    max_sentences, "Summary generated"
                );
                Ok(summary)
            }
            Err(e) => {
                error!(error = %e, "Error generating summary");
                Err(e)
            }
        }
    }

    /// Extract title, topics and sentiment. Never fails: any error yields the
    /// fallback metadata.
    pub async fn extract_metadata(&self, text: &str) -> Metadata {
        let messages = vec![
            ChatMessage::system(METADATA_SYSTEM_PROMPT),
            ChatMessage::user(metadata_prompt(text)),
        ];

        let content = match self.chat_completion(messages, self.config.metadata).await {
            Ok(content) => content,
            Err(e) => {
                error!(error = %e, "Error extracting metadata, using fallback");
                return Metadata::fallback();
            }
        };

        let outcome = parse_metadata(&content);
        if let MetadataOutcome::Ok(metadata) = &outcome {
            info!(
                title_length = metadata.title.chars().count(),
                topics_count = metadata.topics.len(),
                sentiment = %metadata.sentiment,
                "Metadata extracted and validated"
            );
        }
        outcome.into_metadata()
    }
}

#[async_trait]
impl TextAnalyzer for LlmClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn generate_summary(&self, text: &str, max_sentences: usize) -> Result<String, LlmError> {
        LlmClient::generate_summary(self, text, max_sentences).await
    }

    async fn extract_metadata(&self, text: &str) -> Metadata {
        LlmClient::extract_metadata(self, text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts() {
        let p = summary_prompt("Hello there.", 2);
        assert!(p.starts_with("Summarize the following text in exactly 2 sentences."));
        assert!(p.contains("\n\nText: Hello there.\n\nSummary:"));

        let p = metadata_prompt("abc");
        assert!(p.contains("- topics: An array of exactly 3 key topics/themes"));
        assert!(p.ends_with("Text: abc\n\nJSON:"));
    }

    #[test]
    fn test_requires_api_key() {
        assert!(matches!(
            LlmClient::new(LlmConfig::default()),
            Err(LlmError::MissingApiKey)
        ));
    }

    #[test]
    fn test_endpoint_trims_slash() {
        let mut config = LlmConfig::default().with_api_key("k");
        config.base_url = "http://localhost:9/v1/".into();
        let client = LlmClient::new(config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9/v1/chat/completions");
    }

    #[test]
    fn test_client_keeps_request_budgets() {
        let client = LlmClient::new(LlmConfig::default().with_api_key("k")).unwrap();
        let config = client.config();
        assert_eq!(config.summary.temperature, 0.3);
        assert_eq!(config.metadata.temperature, 0.1);
        assert_eq!(config.effective_max_tokens(config.summary), 150);
        assert!(!format!("{config:?}").contains("\"k\""));
    }
}
