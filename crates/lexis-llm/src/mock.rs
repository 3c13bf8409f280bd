//! Deterministic stand-in analyzer used when no credential is configured.

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use lexis_core::{Metadata, Sentiment};

use crate::error::LlmError;
use crate::TextAnalyzer;

/// Words of the input echoed back in the mock summary.
const SUMMARY_WORDS: usize = 20;

/// Offline analyzer whose output depends only on the input text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockAnalyzer;

impl MockAnalyzer {
    pub fn summary(text: &str) -> String {
        let words: Vec<&str> = text.split_whitespace().take(SUMMARY_WORDS).collect();
        format!(
            "This is a mock summary of the text containing: {}...",
            words.join(" ")
        )
    }

    pub fn metadata(text: &str) -> Metadata {
        let h = hex::encode(Sha256::digest(text.as_bytes()));
        Metadata {
            title: format!("Mock Title {}", &h[..6]),
            topics: [
                format!("topic_{}", &h[..6]),
                format!("theme_{}", &h[6..12]),
                format!("subject_{}", &h[12..18]),
            ],
            sentiment: Sentiment::Neutral,
            keywords: Vec::new(),
        }
    }
}

#[async_trait]
impl TextAnalyzer for MockAnalyzer {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate_summary(&self, text: &str, _max_sentences: usize) -> Result<String, LlmError> {
        Ok(Self::summary(text))
    }

    async fn extract_metadata(&self, text: &str) -> Metadata {
        Self::metadata(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_summary_truncates_words() {
        let text = (1..=30).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let summary = MockAnalyzer::summary(&text);
        assert!(summary.starts_with("This is a mock summary of the text containing: w1 w2"));
        assert!(summary.ends_with("w20..."));
        assert!(!summary.contains("w21"));
    }

    #[test]
    fn test_mock_metadata_deterministic() {
        let a = MockAnalyzer::metadata("same input");
        let b = MockAnalyzer::metadata("same input");
        assert_eq!(a, b);
        assert_ne!(a, MockAnalyzer::metadata("other input"));

        let h = hex::encode(Sha256::digest(b"same input"));
        assert_eq!(a.title, format!("Mock Title {}", &h[..6]));
        assert_eq!(a.topics[1], format!("theme_{}", &h[6..12]));
        assert_eq!(a.sentiment, Sentiment::Neutral);
        assert!(a.title.chars().count() <= 50);
    }

    #[tokio::test]
    async fn test_mock_analyzer_trait() {
        let analyzer = MockAnalyzer;
        let summary = analyzer.generate_summary("hello world", 2).await.unwrap();
        assert_eq!(summary, "This is a mock summary of the text containing: hello world...");
        assert_eq!(analyzer.name(), "mock");
    }
}
