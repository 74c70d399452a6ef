//! User record.
//!
//! # Responsibility
//! - Model the `users` table: one name per row, identity assigned by the store.

use super::{Record, RecordId, RecordValidationError};
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// A named user row in the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identity; `None` before the row is persisted.
    pub id: Option<RecordId>,
    pub name: String,
}

impl User {
    /// Creates a user pending persistence (no identity yet).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

impl Record for User {
    const TABLE: &'static str = "users";
    const INSERT_COLUMNS: &'static [&'static str] = &["name"];
    const CREATE_TABLE_SQL: &'static str = "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    );";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn insert_values(&self) -> Vec<Value> {
        vec![Value::Text(self.name.clone())]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get("id")?),
            name: row.get("name")?,
        })
    }

    fn validate(&self) -> Result<(), RecordValidationError> {
        if self.name.trim().is_empty() {
            return Err(RecordValidationError::EmptyField("name"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::User;
    use crate::model::{Record, RecordValidationError};

    #[test]
    fn new_user_has_no_identity() {
        let user = User::new("Rob Pike");
        assert_eq!(user.id, None);
        assert_eq!(user.name, "Rob Pike");
    }

    #[test]
    fn blank_name_fails_validation() {
        let user = User::new("   ");
        assert_eq!(
            user.validate(),
            Err(RecordValidationError::EmptyField("name"))
        );
    }
}
