//! Database schema SQL.

/// Analysis records. `sentiment` duplicates `metadata_json.sentiment` for filtering.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS analyses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    text TEXT NOT NULL,
    summary TEXT NOT NULL,
    metadata_json TEXT NOT NULL,
    sentiment TEXT NOT NULL,
    keywords_json TEXT NOT NULL DEFAULT '[]',
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_analyses_sentiment ON analyses(sentiment);
CREATE INDEX IF NOT EXISTS idx_analyses_created_at ON analyses(created_at);
"#;
