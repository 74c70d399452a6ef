//! Record ingest/read-back service.
//!
//! # Responsibility
//! - Dispatch a bulk write to the repository method matching the chosen mode.
//! - Emit one structured event per bulk write with mode, count and duration.
//!
//! # Invariants
//! - Service APIs never weaken or reinterpret repository guarantees; the
//!   caller picks the atomicity mode explicitly.

use crate::model::Record;
use crate::repo::record_repo::{BulkRecordWriter, RecordReader, RepoResult};
use log::{error, info};
use std::time::Instant;

/// Atomicity mode for a bulk write. There is no implied default; callers
/// state which guarantee they want.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// One insert per record; rows before the first failure stay persisted.
    PerRow,
    /// One unit of work around per-record inserts; all-or-nothing.
    Transaction,
    /// One unit of work around a single batched submission; all-or-nothing.
    Batch,
}

impl WriteMode {
    fn as_str(self) -> &'static str {
        match self {
            Self::PerRow => "per_row",
            Self::Transaction => "transaction",
            Self::Batch => "batch",
        }
    }
}

/// Thin wrapper pairing a repository with event logging.
pub struct RecordService<S> {
    store: S,
}

impl<S> RecordService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persists `records` using the chosen mode.
    ///
    /// Returns the number of rows written; on failure the repository's
    /// mode-specific guarantee says what remains persisted.
    pub fn write_all<R>(&self, records: &[R], mode: WriteMode) -> RepoResult<usize>
    where
        R: Record,
        S: BulkRecordWriter<R>,
    {
        let started_at = Instant::now();
        let result = match mode {
            WriteMode::PerRow => self.store.insert_each(records),
            WriteMode::Transaction => self.store.insert_all_tx(records),
            WriteMode::Batch => self.store.insert_all_batched(records),
        };

        match &result {
            Ok(written) => info!(
                "event=bulk_write module=service status=ok mode={} records={} written={} duration_ms={}",
                mode.as_str(),
                records.len(),
                written,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=bulk_write module=service status=error mode={} records={} duration_ms={} error={}",
                mode.as_str(),
                records.len(),
                started_at.elapsed().as_millis(),
                err
            ),
        }

        result
    }

    /// Reads every persisted record back, ascending by identity.
    pub fn read_all<R>(&self) -> RepoResult<Vec<R>>
    where
        R: Record,
        S: RecordReader<R>,
    {
        self.store.list_all()
    }
}

#[cfg(test)]
mod tests {
    use super::WriteMode;

    #[test]
    fn mode_names_are_stable_log_tokens() {
        assert_eq!(WriteMode::PerRow.as_str(), "per_row");
        assert_eq!(WriteMode::Transaction.as_str(), "transaction");
        assert_eq!(WriteMode::Batch.as_str(), "batch");
    }
}
