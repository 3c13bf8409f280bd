//! Service configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Paths to the Lexis data directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Database directory (`data/db/`).
    pub db: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            db: root.join("db"),
            root,
        };
        std::fs::create_dir_all(&paths.db)?;
        Ok(paths)
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexisConfig {
    /// Bind address for the HTTP server.
    pub host: String,
    /// HTTP server port.
    pub port: u16,
    /// Data directory paths.
    pub data_paths: DataPaths,
    /// Upper bound on one `analyze_text` call. `None` disables the limit.
    pub analysis_timeout: Option<Duration>,
    /// Number of keywords merged into each analysis.
    pub keyword_count: usize,
    /// Sentence count requested from the summarizer.
    pub summary_sentences: usize,
}

impl LexisConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> Result<Self> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env_parse("PORT", 8000u16)?;
        let timeout_secs = env_parse("LEXIS_ANALYSIS_TIMEOUT_SECS", 60u64)?;
        let keyword_count = env_parse("LEXIS_KEYWORD_COUNT", 3usize)?;
        let summary_sentences = env_parse("LEXIS_SUMMARY_SENTENCES", 2usize)?;

        if summary_sentences == 0 {
            return Err(Error::Config(
                "LEXIS_SUMMARY_SENTENCES must be at least 1".to_string(),
            ));
        }

        let data_paths = DataPaths::new(data_dir)?;

        Ok(Self {
            host,
            port,
            data_paths,
            analysis_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            keyword_count,
            summary_sentences,
        })
    }

    /// `host:port` string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse an environment variable, falling back to `default` when unset.
///
/// A set-but-unparseable value is a configuration error rather than a silent default.
pub fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("invalid value for {key}: {raw:?}"))),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_paths_created() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("data");
        let paths = DataPaths::new(&dir).unwrap();
        assert!(paths.db.is_dir());
        assert_eq!(paths.root, dir);
        assert_eq!(paths.db, dir.join("db"));
    }

    #[test]
    fn test_env_parse_default_when_unset() {
        let v: u16 = env_parse("LEXIS_TEST_SURELY_UNSET_VAR", 42).unwrap();
        assert_eq!(v, 42);
    }
}
