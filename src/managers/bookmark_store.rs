//! Saved-items store for BrewBrowser.
//!
//! Implements `BookmarkStoreTrait` over a single row of the SQLite
//! `kv_store` table. The row holds a JSON array of item identifiers under a
//! fixed namespaced key; the array is always read and written whole.

use std::sync::MutexGuard;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, OptionalExtension};
use tracing::{debug, warn};

use crate::database::connection::{Database, SharedDatabase};
use crate::types::errors::BookmarkError;

/// Trait defining the saved-items store.
pub trait BookmarkStoreTrait: Send + Sync {
    /// Returns the persisted identifiers in insertion order.
    ///
    /// An absent or malformed slot yields an empty list. Only storage
    /// failures are errors.
    fn get_ids(&self) -> Result<Vec<String>, BookmarkError>;
    /// Overwrites the persisted identifiers.
    fn save_ids(&self, ids: &[String]) -> Result<(), BookmarkError>;
    /// Removes the slot entirely.
    fn clear(&self) -> Result<(), BookmarkError>;
}

/// Saved-items store backed by the shared SQLite database.
pub struct BookmarkStore {
    db: SharedDatabase,
    key: String,
}

impl BookmarkStore {
    /// Creates a store that keeps its identifiers under `key`.
    pub fn new(db: SharedDatabase, key: &str) -> Self {
        Self {
            db,
            key: key.to_string(),
        }
    }

    /// The namespaced key of the slot.
    pub fn key(&self) -> &str {
        &self.key
    }

    fn lock(&self) -> Result<MutexGuard<'_, Database>, BookmarkError> {
        self.db
            .lock()
            .map_err(|e| BookmarkError::DatabaseError(format!("database lock poisoned: {}", e)))
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    /// Reads the raw slot value, if any.
    pub fn read_raw(&self) -> Result<Option<String>, BookmarkError> {
        let db = self.lock()?;
        db.connection()
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![self.key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))
    }

    /// Writes a raw slot value without validating it.
    pub fn write_raw(&self, value: &str) -> Result<(), BookmarkError> {
        let db = self.lock()?;
        db.connection()
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![self.key, value, Self::now()],
            )
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}

/// Decodes a persisted slot value, normalising anything unexpected to empty.
pub fn parse_ids(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(ids) => ids,
        Err(e) => {
            warn!(error = %e, "discarding malformed saved list");
            Vec::new()
        }
    }
}

impl BookmarkStoreTrait for BookmarkStore {
    fn get_ids(&self) -> Result<Vec<String>, BookmarkError> {
        Ok(match self.read_raw()? {
            Some(raw) => parse_ids(&raw),
            None => Vec::new(),
        })
    }

    fn save_ids(&self, ids: &[String]) -> Result<(), BookmarkError> {
        let json = serde_json::to_string(ids)
            .map_err(|e| BookmarkError::SerializationError(e.to_string()))?;
        self.write_raw(&json)?;
        debug!(count = ids.len(), key = %self.key, "saved list written");
        Ok(())
    }

    fn clear(&self) -> Result<(), BookmarkError> {
        let db = self.lock()?;
        db.connection()
            .execute("DELETE FROM kv_store WHERE key = ?1", params![self.key])
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;
        debug!(key = %self.key, "saved list cleared");
        Ok(())
    }
}
