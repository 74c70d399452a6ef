//! SQLite session bootstrap and low-level database errors.
//!
//! # Responsibility
//! - Open and configure the long-lived connection used as the session handle.
//! - Define the transport-level error taxonomy shared by all persistence code.
//!
//! # Invariants
//! - Connections returned by `open_db` have passed a liveness check.
//! - The caller owns the connection lifecycle; nothing here closes it.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod batch;
mod open;

pub use open::{open_db, ping};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// A queued batch row did not match the batch's column list.
    ColumnCountMismatch { expected: usize, actual: usize },
    /// A batch was applied without any queued rows.
    EmptyBatch,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::ColumnCountMismatch { expected, actual } => write!(
                f,
                "batch row has {actual} values but the batch binds {expected} columns"
            ),
            Self::EmptyBatch => write!(f, "cannot apply a batch with no queued rows"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::ColumnCountMismatch { .. } | Self::EmptyBatch => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
