//! Connection bootstrap for the caller-owned session handle.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections from a `DbConfig`.
//! - Apply connection pragmas and verify liveness before handing out.
//!
//! # Invariants
//! - Returned connections have passed a `ping` round trip.
//! - `foreign_keys` and busy-timeout settings match the supplied config.

use super::DbResult;
use crate::config::{DbConfig, StorageLocation};
use log::{error, info};
use rusqlite::Connection;
use std::time::{Duration, Instant};

/// Opens a connection according to `config` and verifies it is usable.
///
/// The connection is the long-lived session handle: open it once per process
/// and pass it by reference to repositories. Closing it is the caller's job.
///
/// # Side effects
/// - Creates the database file when a `File` location does not exist yet.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(config: &DbConfig) -> DbResult<Connection> {
    let started_at = Instant::now();
    let mode = storage_mode(&config.storage);
    info!("event=db_open module=db status=start mode={mode}");

    let opened = match &config.storage {
        StorageLocation::File(path) => Connection::open(path),
        StorageLocation::Memory => Connection::open_in_memory(),
    };
    let conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&conn, config) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Verifies the connection answers a trivial query.
///
/// Opening can succeed while the handle is unusable; callers that hold a
/// connection for a long time can re-check liveness with this probe.
pub fn ping(conn: &Connection) -> DbResult<()> {
    conn.query_row("SELECT 1;", [], |row| row.get::<_, i64>(0))?;
    Ok(())
}

fn bootstrap_connection(conn: &Connection, config: &DbConfig) -> DbResult<()> {
    if config.foreign_keys {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    }
    conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
    ping(conn)?;
    Ok(())
}

fn storage_mode(storage: &StorageLocation) -> &'static str {
    match storage {
        StorageLocation::File(_) => "file",
        StorageLocation::Memory => "memory",
    }
}
