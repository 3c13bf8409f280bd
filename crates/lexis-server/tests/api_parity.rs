//! API contract tests — response shapes clients depend on.
//!
//! These build records through the real store and serialize them the way
//! the handlers do, then check field names and JSON types.

use lexis_core::model::{DEFAULT_TOPICS, FALLBACK_TITLE};
use lexis_core::{AnalysisResult, Metadata, Sentiment};
use lexis_store::{SearchQuery, SqliteStore};
use tempfile::TempDir;

fn sample_analysis() -> AnalysisResult {
    AnalysisResult {
        summary: "Dogs chase cats.".into(),
        metadata: Metadata {
            title: "Dogs and Cats".into(),
            topics: ["animals".into(), "pets".into(), "behavior".into()],
            sentiment: Sentiment::Positive,
            keywords: vec!["dog".into(), "cat".into()],
        },
    }
}

/// AnalysisResult: { summary, metadata: { title, topics[3], sentiment, keywords } }
#[test]
fn test_analysis_result_shape() {
    let json = serde_json::to_value(sample_analysis()).unwrap();

    assert!(json["summary"].is_string());
    let metadata = &json["metadata"];
    assert!(metadata["title"].is_string());
    assert_eq!(metadata["topics"].as_array().unwrap().len(), 3);
    assert_eq!(metadata["sentiment"], "positive");
    assert!(metadata["keywords"].is_array());
}

/// Fallback metadata serializes with the sentinel title and neutral sentiment.
#[test]
fn test_fallback_metadata_shape() {
    let json = serde_json::to_value(Metadata::fallback()).unwrap();

    assert_eq!(json["title"], FALLBACK_TITLE);
    assert_eq!(json["sentiment"], "neutral");
    assert_eq!(json["topics"], serde_json::json!(DEFAULT_TOPICS));
    assert_eq!(json["keywords"], serde_json::json!([]));
}

/// Stored record: { id, text, summary, metadata, sentiment, keywords, created_at }
#[test]
fn test_record_shape() {
    let dir = TempDir::new().unwrap();
    let store = SqliteStore::open(dir.path()).unwrap();
    let record = store
        .add_analysis("The dog chased the cat.", &sample_analysis())
        .unwrap();

    let json = serde_json::to_value(&record).unwrap();
    assert!(json["id"].is_i64());
    assert_eq!(json["text"], "The dog chased the cat.");
    assert!(json["summary"].is_string());
    assert!(json["metadata"].is_object());
    assert_eq!(json["sentiment"], "positive");
    assert_eq!(json["keywords"], serde_json::json!(["dog", "cat"]));
    // RFC 3339 timestamp
    let created_at = json["created_at"].as_str().unwrap();
    assert!(created_at.contains('T'));
}

/// Search page: { results[], total, limit, offset }
#[test]
fn test_search_page_shape() {
    let dir = TempDir::new().unwrap();
    let store = SqliteStore::open(dir.path()).unwrap();
    store
        .add_analysis("The dog chased the cat.", &sample_analysis())
        .unwrap();

    let page = store.search(&SearchQuery::default()).unwrap();
    let json = serde_json::to_value(&page).unwrap();

    assert_eq!(json["results"].as_array().unwrap().len(), 1);
    assert_eq!(json["total"], 1);
    assert_eq!(json["limit"], 10);
    assert_eq!(json["offset"], 0);
    assert!(json["results"][0]["metadata"]["topics"].is_array());
}
