//! The SQLite store behind the report cache.

use std::str::FromStr;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

use precall_core::AuditReport;

/// How often the opportunistic expired-row sweep may run.
const CLEANUP_INTERVAL_HOURS: i64 = 24;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error("cache entry serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// TTL-bounded cache of complete audit reports.
///
/// Rows carry their own expiry; reads ignore expired rows immediately and a
/// sweep deletes them at most once per [`CLEANUP_INTERVAL_HOURS`].
#[derive(Clone)]
pub struct AuditCache {
    pool: SqlitePool,
    ttl_hours: i64,
    last_cleanup: Arc<Mutex<DateTime<Utc>>>,
}

impl AuditCache {
    /// Opens (creating if missing) the cache database at `path` and runs an
    /// initial expired-row sweep.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Sqlx`] if the database cannot be opened or the
    /// schema cannot be created.
    pub async fn connect(path: &str, ttl_hours: u64) -> Result<Self, CacheError> {
        let options = SqliteConnectOptions::from_str(path)?.create_if_missing(true);
        // SQLite serializes writes anyway; one connection keeps in-memory
        // databases coherent too.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS audit_cache (
                 cache_key TEXT PRIMARY KEY,
                 report_json TEXT NOT NULL,
                 created_at INTEGER NOT NULL,
                 expires_at INTEGER NOT NULL
             )",
        )
        .execute(&pool)
        .await?;
        tracing::info!(path, "cache database initialized");

        let cache = Self {
            pool,
            // Clamped so expiry arithmetic cannot overflow.
            ttl_hours: i64::try_from(ttl_hours.min(876_000)).unwrap_or(876_000),
            last_cleanup: Arc::new(Mutex::new(Utc::now())),
        };
        cache.cleanup_expired().await?;
        Ok(cache)
    }

    /// Fetches a cached report, treating expired rows as absent.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Sqlx`] on query failure or [`CacheError::Json`]
    /// if a stored row no longer parses as a report.
    pub async fn get(&self, cache_key: &str) -> Result<Option<AuditReport>, CacheError> {
        self.maybe_cleanup().await?;

        let row: Option<String> = sqlx::query_scalar(
            "SELECT report_json FROM audit_cache WHERE cache_key = ?1 AND expires_at > ?2",
        )
        .bind(cache_key)
        .bind(Utc::now().timestamp())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(json) => {
                tracing::info!(cache_key, "cache hit");
                Ok(Some(serde_json::from_str(&json)?))
            }
            None => {
                tracing::debug!(cache_key, "cache miss");
                Ok(None)
            }
        }
    }

    /// Stores a report under `cache_key`, replacing any previous entry and
    /// restarting its TTL.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Sqlx`] on write failure or [`CacheError::Json`]
    /// if the report cannot be serialized.
    pub async fn put(&self, cache_key: &str, report: &AuditReport) -> Result<(), CacheError> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.ttl_hours);

        sqlx::query(
            "INSERT OR REPLACE INTO audit_cache (cache_key, report_json, created_at, expires_at) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(cache_key)
        .bind(serde_json::to_string(report)?)
        .bind(now.timestamp())
        .bind(expires_at.timestamp())
        .execute(&self.pool)
        .await?;
        tracing::info!(cache_key, "cached audit report");
        Ok(())
    }

    /// Deletes expired rows and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Sqlx`] on delete failure.
    pub async fn cleanup_expired(&self) -> Result<u64, CacheError> {
        let result = sqlx::query("DELETE FROM audit_cache WHERE expires_at <= ?1")
            .bind(Utc::now().timestamp())
            .execute(&self.pool)
            .await?;
        let deleted = result.rows_affected();
        if deleted > 0 {
            tracing::info!(deleted, "removed expired cache entries");
        }
        if let Ok(mut last) = self.last_cleanup.lock() {
            *last = Utc::now();
        }
        Ok(deleted)
    }

    async fn maybe_cleanup(&self) -> Result<(), CacheError> {
        let due = self
            .last_cleanup
            .lock()
            .map(|last| Utc::now() - *last >= Duration::hours(CLEANUP_INTERVAL_HOURS))
            .unwrap_or(false);
        if due {
            self.cleanup_expired().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
