//! Runtime types.

use std::time::Duration;

use lexis_core::LexisConfig;

/// Per-call analysis parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorSettings {
    /// Keywords merged into each result.
    pub keyword_count: usize,
    /// Sentence count requested from the summarizer.
    pub summary_sentences: usize,
    /// Upper bound on one analysis. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            keyword_count: 3,
            summary_sentences: 2,
            timeout: Some(Duration::from_secs(60)),
        }
    }
}

impl OrchestratorSettings {
    pub fn from_config(config: &LexisConfig) -> Self {
        Self {
            keyword_count: config.keyword_count,
            summary_sentences: config.summary_sentences,
            timeout: config.analysis_timeout,
        }
    }
}
