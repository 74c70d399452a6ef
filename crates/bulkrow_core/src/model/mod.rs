//! Domain records and their uniform row mapping.
//!
//! # Responsibility
//! - Define the `Record` contract shared by every persisted entity kind.
//! - Keep one table per entity kind with a store-assigned identity key.
//!
//! # Invariants
//! - Identity is assigned by the store on commit, never by the caller.
//! - Every non-identity column is NOT NULL and must be supplied on insert.

use rusqlite::types::Value;
use rusqlite::Row;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod book;
pub mod user;

/// Store-assigned ascending identity of a persisted record.
pub type RecordId = i64;

/// Validation failure for a record that is about to be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordValidationError {
    /// A required non-identity field was left empty.
    EmptyField(&'static str),
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "required field `{field}` is empty"),
        }
    }
}

impl Error for RecordValidationError {}

/// Uniform mapping between one entity kind and its backing table.
///
/// Implementors describe their schema statically (table name, insert columns,
/// idempotent DDL) and convert themselves to bound parameter values and back
/// from scanned rows. The repository stays generic over this contract and
/// never concatenates values into SQL text.
pub trait Record: Sized {
    /// Backing table name.
    const TABLE: &'static str;

    /// Non-identity columns, in insert order.
    const INSERT_COLUMNS: &'static [&'static str];

    /// Idempotent `CREATE TABLE IF NOT EXISTS` statement for the table.
    const CREATE_TABLE_SQL: &'static str;

    /// Store-assigned identity; `None` until the record has been read back
    /// after a successful commit.
    fn id(&self) -> Option<RecordId>;

    /// Values for `INSERT_COLUMNS`, in the same order.
    ///
    /// Any caller-supplied identity is deliberately absent here; the store
    /// assigns it on insert.
    fn insert_values(&self) -> Vec<Value>;

    /// Scans one row selected as `id` followed by `INSERT_COLUMNS`.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Checks that every non-identity field is supplied.
    fn validate(&self) -> Result<(), RecordValidationError>;
}
