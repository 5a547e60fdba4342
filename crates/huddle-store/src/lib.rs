//! # huddle-store
//!
//! The on-device message cache, backed by SQLite.
//!
//! The cache is a fallback snapshot, not a source of truth: it holds the
//! last-known message list as a single JSON blob under a fixed key, and
//! every authoritative remote snapshot overwrites it.  The crate exposes a
//! synchronous `SnapshotCache` handle that wraps a `rusqlite::Connection`
//! and provides raw key-value access plus typed snapshot helpers.

pub mod cache;
pub mod database;
pub mod migrations;

mod error;

pub use cache::SnapshotCache;
pub use database::Database;
pub use error::StoreError;
