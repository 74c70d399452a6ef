//! Bulk record writer and ordered reader over SQLite.
//!
//! # Responsibility
//! - Persist ordered record sequences in one of three explicitly named modes.
//! - Read persisted records back in ascending identity order.
//!
//! # Invariants
//! - Inserts execute in input order in every mode.
//! - Transactional modes are atomic: any failure rolls the unit of work back.
//! - Per-row mode deliberately keeps rows inserted before the first failure.
//! - The backing table is created if absent before any write.

use crate::db::batch::InsertBatch;
use crate::db::DbError;
use crate::model::{Record, RecordValidationError};
use log::{debug, warn};
use rusqlite::{params_from_iter, Connection, Transaction};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for bulk write and ordered read operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(RecordValidationError),
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
        }
    }
}

impl From<RecordValidationError> for RepoError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Bulk writer contract: three modes, strongest to weakest guarantee.
///
/// All modes insert in input order and surface the first failure verbatim;
/// they differ only in what remains persisted after that failure.
pub trait BulkRecordWriter<R: Record> {
    /// One insert per record, no unit of work. Rows inserted before the
    /// first failure stay persisted. The weakest guarantee, kept as an
    /// explicitly named mode rather than a default.
    fn insert_each(&self, records: &[R]) -> RepoResult<usize>;

    /// All inserts inside one unit of work: either every record becomes
    /// visible or none does.
    fn insert_all_tx(&self, records: &[R]) -> RepoResult<usize>;

    /// Like `insert_all_tx`, but all rows are staged and submitted as a
    /// single batched statement before commit.
    fn insert_all_batched(&self, records: &[R]) -> RepoResult<usize>;
}

/// Ordered reader contract.
pub trait RecordReader<R: Record> {
    /// Returns every persisted record, ascending by identity. An empty table
    /// yields an empty vector, not an error.
    fn list_all(&self) -> RepoResult<Vec<R>>;
}

/// SQLite-backed writer/reader borrowing a caller-owned connection.
///
/// The connection is the long-lived session handle; this repository never
/// opens or closes it.
pub struct SqliteRecordRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Creates the backing table for `R` when absent. Idempotent.
    pub fn ensure_table<R: Record>(&self) -> RepoResult<()> {
        self.conn.execute_batch(R::CREATE_TABLE_SQL)?;
        Ok(())
    }

    fn insert_one_by_one<R: Record>(conn: &Connection, records: &[R]) -> RepoResult<usize> {
        let sql = insert_sql::<R>();
        let mut written = 0;
        for record in records {
            record.validate()?;
            written += conn.execute(&sql, params_from_iter(record.insert_values()))?;
        }
        Ok(written)
    }

    fn stage_and_apply<R: Record>(tx: &Transaction<'_>, records: &[R]) -> RepoResult<usize> {
        let mut batch = InsertBatch::new(R::TABLE, R::INSERT_COLUMNS);
        for record in records {
            record.validate()?;
            batch.queue(record.insert_values())?;
        }
        debug!(
            "event=batch_staged module=repo table={} rows={}",
            R::TABLE,
            batch.len()
        );
        let written = batch.apply(tx)?;
        Ok(written)
    }

    /// Resolves `tx` based on `outcome`: commit on success, rollback on
    /// failure. The original error wins over a secondary rollback failure.
    fn resolve<T>(tx: Transaction<'_>, table: &str, outcome: RepoResult<T>) -> RepoResult<T> {
        match outcome {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback() {
                    warn!(
                        "event=bulk_write_rollback module=repo status=error table={table} error={rollback_err}"
                    );
                } else {
                    warn!(
                        "event=bulk_write_rollback module=repo status=ok table={table} cause={err}"
                    );
                }
                Err(err)
            }
        }
    }
}

impl<R: Record> BulkRecordWriter<R> for SqliteRecordRepository<'_> {
    fn insert_each(&self, records: &[R]) -> RepoResult<usize> {
        self.ensure_table::<R>()?;
        Self::insert_one_by_one(self.conn, records)
    }

    fn insert_all_tx(&self, records: &[R]) -> RepoResult<usize> {
        self.ensure_table::<R>()?;
        let tx = self.conn.unchecked_transaction()?;
        let outcome = Self::insert_one_by_one(&tx, records);
        Self::resolve(tx, R::TABLE, outcome)
    }

    fn insert_all_batched(&self, records: &[R]) -> RepoResult<usize> {
        self.ensure_table::<R>()?;
        if records.is_empty() {
            return Ok(0);
        }
        let tx = self.conn.unchecked_transaction()?;
        let outcome = Self::stage_and_apply(&tx, records);
        Self::resolve(tx, R::TABLE, outcome)
    }
}

impl<R: Record> RecordReader<R> for SqliteRecordRepository<'_> {
    fn list_all(&self) -> RepoResult<Vec<R>> {
        let sql = format!(
            "SELECT id, {} FROM {} ORDER BY id ASC;",
            R::INSERT_COLUMNS.join(", "),
            R::TABLE
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        // The terminal `next()?` doubles as the deferred cursor-error check;
        // skipping it would silently swallow late scan failures.
        while let Some(row) = rows.next()? {
            records.push(R::from_row(row)?);
        }

        Ok(records)
    }
}

fn insert_sql<R: Record>() -> String {
    let placeholders = R::INSERT_COLUMNS
        .iter()
        .map(|_| "?")
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({});",
        R::TABLE,
        R::INSERT_COLUMNS.join(", "),
        placeholders
    )
}
