//! Lexis LLM — chat-completion client, metadata normalization, mock analyzer.
//!
//! The remote client talks to any OpenAI-compatible endpoint. Without an
//! API key, `create_analyzer` hands out the deterministic `MockAnalyzer`.

pub mod client;
pub mod config;
pub mod error;
pub mod mock;
pub mod normalize;
pub mod types;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use lexis_core::Metadata;

pub use client::LlmClient;
pub use config::{LlmConfig, RequestBudget, RetryPolicy};
pub use error::LlmError;
pub use mock::MockAnalyzer;
pub use normalize::{extract_json_payload, normalize, parse_metadata, MetadataOutcome};

/// Backend that produces summaries and metadata for a text.
#[async_trait]
pub trait TextAnalyzer: Send + Sync {
    /// Short backend identifier for logs.
    fn name(&self) -> &'static str;

    /// Summary of `text` in `max_sentences` sentences.
    async fn generate_summary(&self, text: &str, max_sentences: usize) -> Result<String, LlmError>;

    /// Normalized metadata. Failures degrade to [`Metadata::fallback`].
    async fn extract_metadata(&self, text: &str) -> Metadata;
}

/// Select the analyzer backend once, at startup.
pub fn create_analyzer(config: &LlmConfig) -> Arc<dyn TextAnalyzer> {
    match LlmClient::new(config.clone()) {
        Ok(client) => {
            let config = client.config();
            info!(
                model = %config.model,
                base_url = %config.base_url,
                summary_temperature = config.summary.temperature,
                metadata_temperature = config.metadata.temperature,
                max_attempts = config.retry.max_attempts,
                "Using remote language model"
            );
            Arc::new(client)
        }
        Err(LlmError::MissingApiKey) => {
            warn!("OPENAI_API_KEY not set, using mock analyzer");
            Arc::new(MockAnalyzer)
        }
        Err(e) => {
            warn!(error = %e, "Failed to build language-model client, using mock analyzer");
            Arc::new(MockAnalyzer)
        }
    }
}
