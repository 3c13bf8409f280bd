//! SQLite-backed analysis store.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::schema::SCHEMA_SQL;
use crate::types::*;
use lexis_core::{AnalysisResult, Error, Result, Sentiment};

/// Shared filter for search and count. `?1` is the LIKE pattern, `?2` the sentiment.
const SEARCH_FILTER: &str = "(?1 IS NULL \
      OR text LIKE ?1 ESCAPE '\\' \
      OR summary LIKE ?1 ESCAPE '\\' \
      OR keywords_json LIKE ?1 ESCAPE '\\') \
     AND (?2 IS NULL OR sentiment = ?2)";

/// SQLite store for analysis records.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Open or create the store. The file will be `db_dir/lexis.db`.
    pub fn open(db_dir: impl AsRef<Path>) -> Result<Self> {
        let db_dir = db_dir.as_ref();
        std::fs::create_dir_all(db_dir).map_err(|e| Error::Storage(e.to_string()))?;
        let db_path = db_dir.join("lexis.db");

        let conn = Self::create_connection(&db_path)?;
        Self::init_schema(&conn)?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path,
        };

        info!(
            "SqliteStore initialized: {} analyses, path={}",
            store.count_analyses()?,
            store.db_path.display()
        );

        Ok(store)
    }

    fn create_connection(db_path: &Path) -> Result<Connection> {
        let conn = Connection::open(db_path).map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| Error::Database(e.to_string()))?;
        Ok(conn)
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| Error::Database(format!("Schema init failed: {}", e)))?;
        Ok(())
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Persist one analysis. Returns the stored record.
    pub fn add_analysis(&self, text: &str, analysis: &AnalysisResult) -> Result<AnalysisRecord> {
        // Stored at millisecond precision; round now so the returned record matches a re-read
        let created_ms = Utc::now().timestamp_millis();
        let created_at = millis_to_datetime(created_ms);

        let metadata = &analysis.metadata;
        let metadata_json = serde_json::to_string(metadata)?;
        let keywords_json = serde_json::to_string(&metadata.keywords)?;

        let conn = self.conn.lock();
        let id = conn
            .prepare_cached(
                "INSERT INTO analyses (text, summary, metadata_json, sentiment, keywords_json, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![
                text,
                analysis.summary,
                metadata_json,
                metadata.sentiment.as_str(),
                keywords_json,
                created_ms
            ])
            .map_err(|e| Error::Database(e.to_string()))?;

        debug!(id, sentiment = %metadata.sentiment, "Stored analysis");

        Ok(AnalysisRecord {
            id,
            text: text.to_string(),
            summary: analysis.summary.clone(),
            metadata: metadata.clone(),
            sentiment: metadata.sentiment,
            keywords: metadata.keywords.clone(),
            created_at,
        })
    }

    /// Get an analysis by ID.
    pub fn get_analysis(&self, id: i64) -> Result<Option<AnalysisRecord>> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached("SELECT * FROM analyses WHERE id = ?1")
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![id], |row| Ok(Self::row_to_record(row)))
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(row)
    }

    /// Filtered, paginated search, newest first.
    pub fn search(&self, query: &SearchQuery) -> Result<SearchPage> {
        let pattern = query
            .keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(|k| format!("%{}%", escape_like(k)));
        let sentiment = query.sentiment.map(|s| s.as_str());

        let conn = self.conn.lock();

        let total: i64 = conn
            .prepare_cached(&format!("SELECT COUNT(*) FROM analyses WHERE {SEARCH_FILTER}"))
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![pattern, sentiment], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))?;

        let mut stmt = conn
            .prepare_cached(&format!(
                "SELECT * FROM analyses WHERE {SEARCH_FILTER} \
                 ORDER BY created_at DESC, id DESC LIMIT ?3 OFFSET ?4"
            ))
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map(
                params![pattern, sentiment, query.limit as i64, query.offset as i64],
                |row| Ok(Self::row_to_record(row)),
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        let results: Vec<AnalysisRecord> = rows.filter_map(|r| r.ok()).collect();

        debug!(
            keyword = ?query.keyword,
            sentiment = ?sentiment,
            total,
            returned = results.len(),
            "Search complete"
        );

        Ok(SearchPage {
            results,
            total: total as usize,
            limit: query.limit,
            offset: query.offset,
        })
    }

    /// Count stored analyses.
    pub fn count_analyses(&self) -> Result<usize> {
        let conn = self.conn.lock();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM analyses", [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(count as usize)
    }

    fn row_to_record(row: &rusqlite::Row<'_>) -> AnalysisRecord {
        let metadata: lexis_core::Metadata = row
            .get::<_, String>("metadata_json")
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();
        let sentiment = row
            .get::<_, String>("sentiment")
            .ok()
            .and_then(|s| Sentiment::parse_exact(&s))
            .unwrap_or(metadata.sentiment);
        AnalysisRecord {
            id: row.get("id").unwrap_or(0),
            text: row.get("text").unwrap_or_default(),
            summary: row.get("summary").unwrap_or_default(),
            sentiment,
            keywords: row
                .get::<_, String>("keywords_json")
                .ok()
                .and_then(|s| serde_json::from_str(&s).ok())
                .unwrap_or_default(),
            created_at: millis_to_datetime(row.get("created_at").unwrap_or(0)),
            metadata,
        }
    }
}

fn millis_to_datetime(ms: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(ms).unwrap_or_default()
}

/// Escape LIKE wildcards so the keyword matches literally.
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
