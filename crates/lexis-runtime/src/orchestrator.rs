//! Orchestrator — combines model output with local keyword extraction.

use std::sync::Arc;
use std::time::Instant;

use lexis_core::{AnalysisResult, Error, Result};
use lexis_llm::TextAnalyzer;
use lexis_nlp::KeywordExtractor;
use tracing::{debug, error, info};

use crate::types::OrchestratorSettings;

/// Runs text analyses against one analyzer backend.
pub struct AnalysisOrchestrator {
    analyzer: Arc<dyn TextAnalyzer>,
    extractor: &'static KeywordExtractor,
    settings: OrchestratorSettings,
}

impl AnalysisOrchestrator {
    pub fn new(analyzer: Arc<dyn TextAnalyzer>, settings: OrchestratorSettings) -> Self {
        info!(
            backend = analyzer.name(),
            keyword_count = settings.keyword_count,
            summary_sentences = settings.summary_sentences,
            timeout_secs = settings.timeout.map(|t| t.as_secs()),
            "Analysis orchestrator initialized"
        );
        Self {
            analyzer,
            extractor: KeywordExtractor::shared(),
            settings,
        }
    }

    /// Name of the analyzer backend in use.
    pub fn backend(&self) -> &'static str {
        self.analyzer.name()
    }

    /// Analyze one text: summary, metadata, and keywords.
    ///
    /// Summary failure fails the call and cancels the metadata request.
    /// Metadata failures arrive here already replaced by the fallback.
    pub async fn analyze_text(&self, text: &str) -> Result<AnalysisResult> {
        let started = Instant::now();

        let outcome = match self.settings.timeout {
            Some(limit) => match tokio::time::timeout(limit, self.run(text)).await {
                Ok(result) => result,
                Err(_) => Err(Error::Timeout(limit)),
            },
            None => self.run(text).await,
        };

        match &outcome {
            Ok(result) => info!(
                backend = self.analyzer.name(),
                text_length = text.len(),
                summary_length = result.summary.len(),
                sentiment = %result.metadata.sentiment,
                keywords = result.metadata.keywords.len(),
                fallback = result.metadata.is_fallback(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Text analysis complete"
            ),
            Err(e) => error!(
                backend = self.analyzer.name(),
                error = %e,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Text analysis failed"
            ),
        }

        outcome
    }

    async fn run(&self, text: &str) -> Result<AnalysisResult> {
        let summary = async {
            self.analyzer
                .generate_summary(text, self.settings.summary_sentences)
                .await
                .map_err(|e| Error::Generation(e.to_string()))
        };
        let metadata = async { Ok::<_, Error>(self.analyzer.extract_metadata(text).await) };

        let (summary, mut metadata) = tokio::try_join!(summary, metadata)?;

        metadata.keywords = self
            .extractor
            .extract_keywords(text, self.settings.keyword_count);
        debug!(keywords = ?metadata.keywords, "Merged local keywords");

        Ok(AnalysisResult { summary, metadata })
    }
}
