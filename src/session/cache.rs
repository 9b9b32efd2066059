//! SQLite response cache
//!
//! Stores successful response bodies keyed by a hash of the request line so
//! that repeated runs (and repeated URLs within a run) are served locally.

use crate::session::Page;
use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};
use std::path::Path;
use url::Url;

/// SQL schema for the response cache
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS responses (
    cache_key TEXT PRIMARY KEY,
    url TEXT NOT NULL,
    final_url TEXT NOT NULL,
    status INTEGER NOT NULL,
    body BLOB NOT NULL,
    created_at TEXT NOT NULL
);
"#;

/// SQLite-backed cache of GET responses
pub struct ResponseCache {
    conn: Connection,
    expire_after: Option<Duration>,
}

impl ResponseCache {
    /// Opens (or creates) a cache database at `path`
    ///
    /// `expire_after` of `None` keeps entries until the cache is cleared.
    pub fn open(path: &Path, expire_after: Option<Duration>) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;
        conn.execute_batch(SCHEMA_SQL)?;

        Ok(Self { conn, expire_after })
    }

    /// Creates a cache that lives only as long as this value
    pub fn in_memory(expire_after: Option<Duration>) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self { conn, expire_after })
    }

    /// Computes the cache key for a GET of `url`
    pub fn cache_key(url: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(b"GET ");
        hasher.update(url.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Returns the cached response for `url`, if present and not expired
    pub fn lookup(&self, url: &str) -> Result<Option<Page>, rusqlite::Error> {
        let row: Option<(String, i64, Vec<u8>, String)> = self
            .conn
            .query_row(
                "SELECT final_url, status, body, created_at FROM responses WHERE cache_key = ?1",
                params![Self::cache_key(url)],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .optional()?;

        let Some((final_url, status, body, created_at)) = row else {
            return Ok(None);
        };

        if self.is_expired(&created_at) {
            tracing::debug!(url, "Cached response expired");
            return Ok(None);
        }

        // An unparseable stored URL is treated as a miss and refetched
        let Ok(final_url) = Url::parse(&final_url) else {
            return Ok(None);
        };

        Ok(Some(Page {
            url: final_url,
            status: status as u16,
            body,
        }))
    }

    /// Stores `page` as the response for a GET of `url`, replacing any previous entry
    pub fn store(&self, url: &str, page: &Page) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO responses (cache_key, url, final_url, status, body, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                Self::cache_key(url),
                url,
                page.url.as_str(),
                page.status as i64,
                page.body,
                Utc::now().to_rfc3339()
            ],
        )?;
        Ok(())
    }

    /// Removes every cached response, returning how many were dropped
    pub fn clear(&self) -> Result<usize, rusqlite::Error> {
        self.conn.execute("DELETE FROM responses", [])
    }

    /// Number of cached responses
    pub fn len(&self) -> Result<u64, rusqlite::Error> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM responses", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    pub fn is_empty(&self) -> Result<bool, rusqlite::Error> {
        Ok(self.len()? == 0)
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    fn is_expired(&self, created_at: &str) -> bool {
        let Some(expire_after) = self.expire_after else {
            return false;
        };

        match created_at.parse::<DateTime<Utc>>() {
            Ok(created) => Utc::now() - created > expire_after,
            Err(_) => true,
        }
    }
}
