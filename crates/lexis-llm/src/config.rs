//! Language-model configuration loaded from the environment.

use std::time::Duration;

use lexis_core::config::env_parse;
use lexis_core::{Error, Result};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Token budget and sampling temperature for one kind of request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestBudget {
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Bounded retry with exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay after failed attempt `attempt` (0-based): `base_delay * 2^attempt`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(1u32 << attempt.min(16))
    }
}

/// Settings for the OpenAI-compatible chat-completion endpoint.
#[derive(Clone)]
pub struct LlmConfig {
    /// Bearer credential. `None` selects the mock analyzer.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Ceiling applied to every per-request token budget.
    pub max_tokens: u32,
    pub summary: RequestBudget,
    pub metadata: RequestBudget,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
            max_tokens: 1000,
            summary: RequestBudget {
                max_tokens: 150,
                temperature: 0.3,
            },
            metadata: RequestBudget {
                max_tokens: 300,
                temperature: 0.1,
            },
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

// Keeps the credential out of logs.
impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("max_tokens", &self.max_tokens)
            .field("summary", &self.summary)
            .field("metadata", &self.metadata)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .finish()
    }
}

impl LlmConfig {
    /// Load from `OPENAI_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let config = Self {
            api_key,
            model: env_parse("OPENAI_MODEL", defaults.model)?,
            base_url: env_parse("OPENAI_BASE_URL", defaults.base_url)?,
            max_tokens: env_parse("OPENAI_MAX_TOKENS", defaults.max_tokens)?,
            summary: RequestBudget {
                max_tokens: env_parse("OPENAI_SUMMARY_MAX_TOKENS", defaults.summary.max_tokens)?,
                temperature: env_parse(
                    "OPENAI_SUMMARY_TEMPERATURE",
                    defaults.summary.temperature,
                )?,
            },
            metadata: RequestBudget {
                max_tokens: env_parse(
                    "OPENAI_METADATA_MAX_TOKENS",
                    defaults.metadata.max_tokens,
                )?,
                temperature: env_parse(
                    "OPENAI_METADATA_TEMPERATURE",
                    defaults.metadata.temperature,
                )?,
            },
            timeout: Duration::from_secs(env_parse("OPENAI_TIMEOUT_SECS", 30u64)?),
            retry: RetryPolicy {
                max_attempts: env_parse("OPENAI_MAX_ATTEMPTS", defaults.retry.max_attempts)?,
                base_delay: Duration::from_millis(env_parse(
                    "OPENAI_RETRY_BASE_DELAY_MS",
                    1000u64,
                )?),
            },
        };

        if config.retry.max_attempts == 0 {
            return Err(Error::Config(
                "OPENAI_MAX_ATTEMPTS must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }

    /// Whether a credential is present.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Set the credential (blank clears it).
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.api_key = (!key.trim().is_empty()).then_some(key);
        self
    }

    /// Per-request token budget, capped by the global ceiling.
    pub fn effective_max_tokens(&self, budget: RequestBudget) -> u32 {
        budget.max_tokens.min(self.max_tokens)
    }
}
