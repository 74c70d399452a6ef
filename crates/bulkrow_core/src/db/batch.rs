//! Ordered insert batch submitted as one statement.
//!
//! # Responsibility
//! - Stage pending row inserts for a single table in input order.
//! - Submit all staged rows to the store in one parameterized statement.
//!
//! # Invariants
//! - Queued rows execute in the order they were queued.
//! - Every queued row binds exactly the batch's column list.
//! - `apply` must check statement finalization for a deferred error even
//!   when execution itself reported success.

use super::{DbError, DbResult};
use rusqlite::params_from_iter;
use rusqlite::types::Value;
use rusqlite::Connection;

/// Staged multi-row insert for one table.
///
/// Values are always bound as parameters; SQL text is built only from the
/// static table and column names supplied at construction.
#[derive(Debug)]
pub struct InsertBatch {
    table: &'static str,
    columns: &'static [&'static str],
    rows: Vec<Vec<Value>>,
}

impl InsertBatch {
    pub fn new(table: &'static str, columns: &'static [&'static str]) -> Self {
        Self {
            table,
            columns,
            rows: Vec::new(),
        }
    }

    /// Stages one row of bound values.
    ///
    /// Fails at queue time when the value count does not match the column
    /// list, so a malformed row never reaches the store.
    pub fn queue(&mut self, values: Vec<Value>) -> DbResult<()> {
        if values.len() != self.columns.len() {
            return Err(DbError::ColumnCountMismatch {
                expected: self.columns.len(),
                actual: values.len(),
            });
        }
        self.rows.push(values);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Submits every staged row in one multi-row `INSERT`.
    ///
    /// Returns the number of rows written. The statement is explicitly
    /// finalized and that result checked, because SQLite can defer reporting
    /// some failures until the statement is torn down.
    pub fn apply(self, conn: &Connection) -> DbResult<usize> {
        if self.rows.is_empty() {
            return Err(DbError::EmptyBatch);
        }

        let sql = self.sql();
        let mut stmt = conn.prepare(&sql)?;
        let written = stmt.execute(params_from_iter(self.rows.into_iter().flatten()))?;
        stmt.finalize()?;
        Ok(written)
    }

    fn sql(&self) -> String {
        let placeholders_per_row = format!(
            "({})",
            self.columns
                .iter()
                .map(|_| "?")
                .collect::<Vec<_>>()
                .join(", ")
        );
        let all_rows = std::iter::repeat(placeholders_per_row.as_str())
            .take(self.rows.len())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES {};",
            self.table,
            self.columns.join(", "),
            all_rows
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{DbError, InsertBatch};
    use rusqlite::types::Value;

    fn text(value: &str) -> Value {
        Value::Text(value.to_string())
    }

    #[test]
    fn sql_repeats_placeholder_groups_per_row() {
        let mut batch = InsertBatch::new("users", &["name"]);
        batch.queue(vec![text("a")]).unwrap();
        batch.queue(vec![text("b")]).unwrap();

        assert_eq!(batch.sql(), "INSERT INTO users (name) VALUES (?), (?);");
    }

    #[test]
    fn sql_joins_multiple_columns() {
        let mut batch = InsertBatch::new("books", &["title", "year"]);
        batch.queue(vec![text("t"), Value::Integer(1985)]).unwrap();

        assert_eq!(
            batch.sql(),
            "INSERT INTO books (title, year) VALUES (?, ?);"
        );
    }

    #[test]
    fn len_tracks_queued_rows() {
        let mut batch = InsertBatch::new("users", &["name"]);
        assert_eq!(batch.len(), 0);
        assert!(batch.is_empty());

        batch.queue(vec![text("a")]).unwrap();
        batch.queue(vec![text("b")]).unwrap();
        assert_eq!(batch.len(), 2);
        assert!(!batch.is_empty());
    }

    #[test]
    fn queue_rejects_wrong_value_count() {
        let mut batch = InsertBatch::new("books", &["title", "year"]);
        let err = batch.queue(vec![text("only title")]).unwrap_err();

        assert!(matches!(
            err,
            DbError::ColumnCountMismatch {
                expected: 2,
                actual: 1
            }
        ));
        assert!(batch.is_empty());
    }

    #[test]
    fn apply_rejects_empty_batch() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let batch = InsertBatch::new("users", &["name"]);

        let err = batch.apply(&conn).unwrap_err();
        assert!(matches!(err, DbError::EmptyBatch));
    }
}
