//! Demo entry point for the bulk record writer.
//!
//! # Responsibility
//! - Exercise the full flow: open session, bulk write, ordered read-back.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Takes an optional database path as the first argument; without one the
//! demo runs against an in-memory database. Any error is fatal.

use bulkrow_core::{
    open_db, ping, DbConfig, RecordService, SqliteRecordRepository, User, WriteMode,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("bulkrow: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => DbConfig::file(path),
        None => DbConfig::in_memory(),
    };

    let conn = open_db(&config)?;
    ping(&conn)?;
    println!("Successfully connected!");

    let service = RecordService::new(SqliteRecordRepository::new(&conn));

    let users = vec![User::new("Rob Pike"), User::new("Ken Thompson")];
    service.write_all(&users, WriteMode::Batch)?;

    for user in service.read_all::<User>()? {
        let id = user.id.unwrap_or_default();
        println!("{id}\t{}", user.name);
    }

    Ok(())
}
