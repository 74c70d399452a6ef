//! Book record.
//!
//! # Responsibility
//! - Model the `books` table: title and year per row, identity assigned by
//!   the store.

use super::{Record, RecordId, RecordValidationError};
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// A titled book row in the `books` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Store-assigned identity; `None` before the row is persisted.
    pub id: Option<RecordId>,
    pub title: String,
    pub year: i64,
}

impl Book {
    /// Creates a book pending persistence (no identity yet).
    pub fn new(title: impl Into<String>, year: i64) -> Self {
        Self {
            id: None,
            title: title.into(),
            year,
        }
    }
}

impl Record for Book {
    const TABLE: &'static str = "books";
    const INSERT_COLUMNS: &'static [&'static str] = &["title", "year"];
    const CREATE_TABLE_SQL: &'static str = "CREATE TABLE IF NOT EXISTS books (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        year INTEGER NOT NULL
    );";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn insert_values(&self) -> Vec<Value> {
        vec![Value::Text(self.title.clone()), Value::Integer(self.year)]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get("id")?),
            title: row.get("title")?,
            year: row.get("year")?,
        })
    }

    fn validate(&self) -> Result<(), RecordValidationError> {
        if self.title.trim().is_empty() {
            return Err(RecordValidationError::EmptyField("title"));
        }
        Ok(())
    }
}
