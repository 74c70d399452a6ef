//! Bulk record persistence core.
//!
//! Provides a transactional bulk-write helper with uniform row mapping over
//! SQLite, plus a companion reader that returns records in ascending
//! identity order. The connection is a caller-owned, long-lived session
//! handle; writers and readers only borrow it.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{DbConfig, StorageLocation};
pub use db::{open_db, ping, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{book::Book, user::User, Record, RecordId, RecordValidationError};
pub use repo::record_repo::{
    BulkRecordWriter, RecordReader, RepoError, RepoResult, SqliteRecordRepository,
};
pub use service::record_service::{RecordService, WriteMode};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
