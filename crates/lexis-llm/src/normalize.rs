//! Validation and normalization of model-produced metadata.
//!
//! The model is asked for `{"title", "topics", "sentiment"}` but rarely obeys
//! exactly. [`normalize`] coerces what it can (topic count, sentiment label)
//! and reports what it cannot as a [`MetadataOutcome`]; callers recover with
//! [`MetadataOutcome::into_metadata`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::warn;

use lexis_core::model::{DEFAULT_TITLE, DEFAULT_TOPICS, MAX_TITLE_CHARS};
use lexis_core::{Metadata, Sentiment};

/// Greedy match from the first `{` to the last `}`.
static JSON_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("JSON object pattern is valid"));

/// Result of validating one metadata payload.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataOutcome {
    Ok(Metadata),
    /// No JSON could be recovered from the response text.
    Malformed { raw: String },
    /// JSON was recovered but does not fit the metadata schema.
    SchemaViolation { raw: String, reason: String },
}

impl MetadataOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, MetadataOutcome::Ok(_))
    }

    /// Collapse to metadata, substituting the fallback for any failure.
    pub fn into_metadata(self) -> Metadata {
        match self {
            MetadataOutcome::Ok(metadata) => metadata,
            MetadataOutcome::Malformed { raw } => {
                warn!(raw_len = raw.len(), "Metadata response was not valid JSON, using fallback");
                Metadata::fallback()
            }
            MetadataOutcome::SchemaViolation { reason, .. } => {
                warn!(reason = %reason, "Metadata validation failed, using fallback");
                Metadata::fallback()
            }
        }
    }
}

/// Recover a JSON value from free-form model output.
///
/// Tries the longest brace-delimited span first, then the whole text.
pub fn extract_json_payload(content: &str) -> Option<Value> {
    let content = content.trim();
    if let Some(m) = JSON_OBJECT.find(content) {
        if let Ok(value) = serde_json::from_str(m.as_str()) {
            return Some(value);
        }
    }
    serde_json::from_str(content).ok()
}

/// Extract and normalize metadata from a raw model response.
pub fn parse_metadata(content: &str) -> MetadataOutcome {
    match extract_json_payload(content) {
        Some(value) => normalize(&value),
        None => MetadataOutcome::Malformed {
            raw: content.to_string(),
        },
    }
}

/// Validate a decoded payload against the metadata schema.
///
/// Model-supplied `keywords` are ignored; keywords are filled in locally.
pub fn normalize(raw: &Value) -> MetadataOutcome {
    let violation = |reason: &str| MetadataOutcome::SchemaViolation {
        raw: raw.to_string(),
        reason: reason.to_string(),
    };

    let Some(obj) = raw.as_object() else {
        return violation("payload is not a JSON object");
    };

    let title = match obj.get("title") {
        None => DEFAULT_TITLE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => return violation("title is not a string"),
    };
    if title.chars().count() > MAX_TITLE_CHARS {
        return violation("title exceeds 50 characters");
    }

    let mut candidates: Vec<&Value> = match obj.get("topics") {
        None => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(scalar) if is_truthy(scalar) => vec![scalar],
        Some(_) => Vec::new(),
    };
    candidates.truncate(DEFAULT_TOPICS.len());

    // Positions not supplied by the model keep their default topic
    let mut topics: [String; 3] = DEFAULT_TOPICS.map(String::from);
    for (slot, value) in topics.iter_mut().zip(candidates) {
        match value {
            Value::String(s) => *slot = s.clone(),
            _ => return violation("topics must be strings"),
        }
    }

    let sentiment = obj
        .get("sentiment")
        .and_then(Value::as_str)
        .and_then(Sentiment::parse_exact)
        .unwrap_or_default();

    MetadataOutcome::Ok(Metadata {
        title,
        topics,
        sentiment,
        keywords: Vec::new(),
    })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ok(value: Value) -> Metadata {
        match normalize(&value) {
            MetadataOutcome::Ok(m) => m,
            other => panic!("expected Ok, got {:?}", other),
        }
    }

    #[test]
    fn test_topics_always_three() {
        let cases = [
            (json!([]), ["general", "information", "content"]),
            (json!(["x"]), ["x", "information", "content"]),
            (json!(["x", "y"]), ["x", "y", "content"]),
            (json!(["x", "y", "z"]), ["x", "y", "z"]),
            (json!(["x", "y", "z", "w", "v"]), ["x", "y", "z"]),
        ];
        for (topics, expected) in cases {
            let m = ok(json!({"title": "T", "topics": topics, "sentiment": "neutral"}));
            assert_eq!(m.topics, expected);
        }
    }

    #[test]
    fn test_topics_absent_or_scalar() {
        let m = ok(json!({"title": "T"}));
        assert_eq!(m.topics, ["general", "information", "content"]);

        let m = ok(json!({"topics": "rust"}));
        assert_eq!(m.topics, ["rust", "information", "content"]);

        for falsy in [json!(null), json!(false), json!(0), json!(""), json!({})] {
            let m = ok(json!({"topics": falsy}));
            assert_eq!(m.topics, ["general", "information", "content"]);
        }
    }

    #[test]
    fn test_non_string_topic_is_violation() {
        let outcome = normalize(&json!({"title": "T", "topics": ["a", 5]}));
        assert!(matches!(outcome, MetadataOutcome::SchemaViolation { .. }));
        // Truncated away before validation
        assert!(normalize(&json!({"topics": ["a", "b", "c", 5]})).is_ok());
    }

    #[test]
    fn test_sentiment_coercion() {
        assert_eq!(ok(json!({"sentiment": "positive"})).sentiment, Sentiment::Positive);
        assert_eq!(ok(json!({"sentiment": "angry"})).sentiment, Sentiment::Neutral);
        assert_eq!(ok(json!({"sentiment": "Positive"})).sentiment, Sentiment::Neutral);
        assert_eq!(ok(json!({"sentiment": 1})).sentiment, Sentiment::Neutral);
        assert_eq!(ok(json!({})).sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_title_rules() {
        assert_eq!(ok(json!({})).title, "No Title Generated");
        assert!(!normalize(&json!({"title": 42})).is_ok());
        assert!(!normalize(&json!({"title": null})).is_ok());
        assert!(!normalize(&json!({"title": "x".repeat(51)})).is_ok());
        assert_eq!(ok(json!({"title": "é".repeat(50)})).title.chars().count(), 50);
    }

    #[test]
    fn test_non_object_and_keywords() {
        assert!(!normalize(&json!(["a", "b"])).is_ok());
        assert!(!normalize(&json!("text")).is_ok());
        let m = ok(json!({"title": "T", "keywords": ["ignored"]}));
        assert!(m.keywords.is_empty());
    }

    #[test]
    fn test_parse_with_preamble_and_fence() {
        let content = "Some preamble ```json\n{\"title\":\"T\",\"topics\":[\"a\",\"b\"],\"sentiment\":\"positive\"}\n``` trailing";
        let m = parse_metadata(content).into_metadata();
        assert_eq!(m.title, "T");
        assert_eq!(m.topics, ["a", "b", "content"]);
        assert_eq!(m.sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_unparseable_falls_back() {
        let outcome = parse_metadata("Invalid JSON response");
        assert!(matches!(outcome, MetadataOutcome::Malformed { .. }));
        assert!(outcome.into_metadata().is_fallback());

        // Braces present but not valid JSON
        assert!(parse_metadata("{not json}").into_metadata().is_fallback());
    }

    #[test]
    fn test_whole_content_fallback() {
        // Not an object, so the brace pattern finds nothing; whole-text parse succeeds
        let outcome = parse_metadata("  [1, 2]  ");
        assert!(matches!(outcome, MetadataOutcome::SchemaViolation { .. }));
    }
}
