//! Key-value cache access and typed snapshot helpers.
//!
//! The snapshot is stored as a single JSON blob under
//! [`huddle_shared::constants::CACHE_KEY`].  JSON keeps the blob
//! human-readable and tolerant of absent optional fields on decode.

use rusqlite::{params, OptionalExtension};

use huddle_shared::constants::CACHE_KEY;
use huddle_shared::Message;

use crate::database::Database;
use crate::error::Result;

/// Typed handle over the `cache` table.
pub struct SnapshotCache {
    db: Database,
}

impl SnapshotCache {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Open the cache in the default platform data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Database::new()?))
    }

    /// Fetch the raw blob stored under `key`, if any.
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self
            .db
            .conn()
            .query_row(
                "SELECT value FROM cache WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Store `value` under `key`, replacing any previous blob.
    pub fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.db.conn().execute(
            "INSERT INTO cache (key, value, updated_at)
             VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
             ON CONFLICT(key) DO UPDATE
             SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove `key`.  Removing an absent key is not an error.
    pub fn delete(&self, key: &str) -> Result<()> {
        self.db
            .conn()
            .execute("DELETE FROM cache WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Load the cached message snapshot, newest-first.
    ///
    /// Returns `Ok(None)` when no snapshot has been persisted yet.  A blob
    /// that fails to parse surfaces as [`crate::StoreError::Parse`]; the
    /// session treats that as "no snapshot" and logs it.
    pub fn load_snapshot(&self) -> Result<Option<Vec<Message>>> {
        match self.get(CACHE_KEY)? {
            Some(blob) => Ok(Some(serde_json::from_slice(&blob)?)),
            None => Ok(None),
        }
    }

    /// Persist the full message snapshot, overwriting the previous one.
    pub fn save_snapshot(&self, messages: &[Message]) -> Result<()> {
        let blob = serde_json::to_vec(messages)?;
        self.set(CACHE_KEY, &blob)
    }

    /// Drop the persisted snapshot entirely.
    pub fn clear_snapshot(&self) -> Result<()> {
        self.delete(CACHE_KEY)
    }
}
