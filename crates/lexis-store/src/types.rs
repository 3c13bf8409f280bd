//! Data types for stored analyses and search.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lexis_core::{Metadata, Sentiment};

pub const DEFAULT_SEARCH_LIMIT: usize = 10;
pub const MAX_SEARCH_LIMIT: usize = 100;

/// A persisted analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: i64,
    pub text: String,
    pub summary: String,
    pub metadata: Metadata,
    pub sentiment: Sentiment,
    pub keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Filters and pagination for [`crate::SqliteStore::search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Case-insensitive substring over text, summary, and keywords.
    pub keyword: Option<String>,
    pub sentiment: Option<Sentiment>,
    pub limit: usize,
    pub offset: usize,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            keyword: None,
            sentiment: None,
            limit: DEFAULT_SEARCH_LIMIT,
            offset: 0,
        }
    }
}

/// One page of search results plus the unpaginated match count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    pub results: Vec<AnalysisRecord>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}
