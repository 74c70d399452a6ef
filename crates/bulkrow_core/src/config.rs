//! Connection configuration passed explicitly at startup.
//!
//! # Responsibility
//! - Describe where the database lives and how the connection is tuned.
//! - Keep connection parameters out of process-wide state.
//!
//! # Invariants
//! - A `DbConfig` is plain data; constructing one performs no I/O.
//! - Defaults produce a usable in-memory database.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Where the SQLite database is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageLocation {
    /// Database file on disk, created on first open if absent.
    File(PathBuf),
    /// Private in-memory database, dropped when the connection closes.
    Memory,
}

/// Connection settings owned by the caller and handed to `db::open_db`.
///
/// The session handle built from this config is long-lived: open it once per
/// process and pass it by reference to writers and readers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbConfig {
    pub storage: StorageLocation,
    /// How long a statement waits on a locked database before failing.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// Whether `PRAGMA foreign_keys` is enabled on open.
    #[serde(default = "default_foreign_keys")]
    pub foreign_keys: bool,
}

impl DbConfig {
    /// Config for a file-backed database at `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            storage: StorageLocation::File(path.into()),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            foreign_keys: true,
        }
    }

    /// Config for a private in-memory database.
    pub fn in_memory() -> Self {
        Self {
            storage: StorageLocation::Memory,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            foreign_keys: true,
        }
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self::in_memory()
    }
}

fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

fn default_foreign_keys() -> bool {
    true
}
