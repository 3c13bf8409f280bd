//! Analysis data model shared by the pipeline, the store, and the server.

use serde::{Deserialize, Serialize};

/// Title used when the model omits one.
pub const DEFAULT_TITLE: &str = "No Title Generated";

/// Sentinel title of the fallback metadata. Downstream consumers flag records
/// carrying it for manual review.
pub const FALLBACK_TITLE: &str = "Analysis Failed - Manual Review Required";

/// Topic padding values, applied by position.
pub const DEFAULT_TOPICS: [&str; 3] = ["general", "information", "content"];

/// Maximum title length in characters.
pub const MAX_TITLE_CHARS: usize = 50;

/// Overall tone of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Self::Positive, Self::Neutral, Self::Negative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }

    /// Exact match against the three lowercase labels.
    pub fn parse_exact(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_exact(s).ok_or_else(|| {
            format!("invalid sentiment {s:?}, expected one of: positive, neutral, negative")
        })
    }
}

/// Normalized analysis metadata.
///
/// `topics` is a fixed-size array so the exactly-three invariant holds by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,
    pub topics: [String; 3],
    pub sentiment: Sentiment,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Metadata {
    /// The fixed metadata substituted when extraction cannot produce a valid result.
    pub fn fallback() -> Self {
        Self {
            title: FALLBACK_TITLE.to_string(),
            topics: DEFAULT_TOPICS.map(String::from),
            sentiment: Sentiment::Neutral,
            keywords: Vec::new(),
        }
    }

    /// Whether this is the fallback sentinel.
    pub fn is_fallback(&self) -> bool {
        self.title == FALLBACK_TITLE
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            topics: DEFAULT_TOPICS.map(String::from),
            sentiment: Sentiment::Neutral,
            keywords: Vec::new(),
        }
    }
}

/// Result of one analysis call. Built once, handed to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub metadata: Metadata,
}
