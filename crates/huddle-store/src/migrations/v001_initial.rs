//! v001 -- Initial schema creation.
//!
//! Creates the single `cache` key-value table.  The message snapshot lives
//! under one fixed key; the table is generic so future revisions can cache
//! other blobs without a schema change.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS cache (
    key        TEXT PRIMARY KEY NOT NULL,
    value      BLOB NOT NULL,
    updated_at TEXT NOT NULL                 -- ISO-8601 / RFC-3339
);
"#;

pub fn up(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(UP_SQL)
}
