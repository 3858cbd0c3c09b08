use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};
use std::path::PathBuf;

use crate::paths;
use crate::translation::TranslationRequest;

/// SQLite-backed cache of span translations.
///
/// Entries are keyed by [`TranslationRequest::cache_key`], so the same span
/// translated between different language pairs or endpoints is stored
/// separately.
pub struct CacheManager {
    conn: Connection,
    endpoint: String,
}

impl CacheManager {
    /// Opens the cache at `$XDG_CACHE_HOME/cmtl/translations.db`.
    pub fn new(endpoint: &str) -> Result<Self> {
        let cache_dir = paths::cache_dir()?;

        std::fs::create_dir_all(&cache_dir).with_context(|| {
            format!("Failed to create cache directory: {}", cache_dir.display())
        })?;

        Self::open(cache_dir.join("translations.db"), endpoint)
    }

    /// Opens (or creates) a cache database at an explicit path.
    pub fn open(db_path: PathBuf, endpoint: &str) -> Result<Self> {
        let conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open cache database: {}", db_path.display()))?;

        let manager = Self {
            conn,
            endpoint: endpoint.to_string(),
        };
        manager.init_db()?;

        Ok(manager)
    }

    fn init_db(&self) -> Result<()> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS span_translations (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    cache_key TEXT UNIQUE NOT NULL,
                    source_text TEXT NOT NULL,
                    translated_text TEXT NOT NULL,
                    from_language TEXT NOT NULL,
                    to_language TEXT NOT NULL,
                    endpoint TEXT NOT NULL,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                    accessed_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )
            .context("Failed to create span_translations table")?;

        self.conn
            .execute(
                "CREATE INDEX IF NOT EXISTS idx_span_cache_key ON span_translations(cache_key)",
                [],
            )
            .context("Failed to create index")?;

        Ok(())
    }

    pub fn get(&self, request: &TranslationRequest) -> Result<Option<String>> {
        let cache_key = request.cache_key(&self.endpoint);

        let result: Option<String> = self
            .conn
            .query_row(
                "SELECT translated_text FROM span_translations WHERE cache_key = ?1",
                [&cache_key],
                |row| row.get(0),
            )
            .optional()
            .context("Failed to query translation cache")?;

        if result.is_some() {
            self.conn.execute(
                "UPDATE span_translations SET accessed_at = CURRENT_TIMESTAMP WHERE cache_key = ?1",
                [&cache_key],
            )?;
        }

        Ok(result)
    }

    pub fn put(&self, request: &TranslationRequest, translated_text: &str) -> Result<()> {
        let cache_key = request.cache_key(&self.endpoint);

        self.conn
            .execute(
                "INSERT OR REPLACE INTO span_translations
                 (cache_key, source_text, translated_text, from_language, to_language, endpoint)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                [
                    cache_key.as_str(),
                    request.source_text.as_str(),
                    translated_text,
                    request.from.as_str(),
                    request.to.as_str(),
                    self.endpoint.as_str(),
                ],
            )
            .context("Failed to insert translation into cache")?;

        Ok(())
    }
}
