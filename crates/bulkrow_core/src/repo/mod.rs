//! Repository layer: bulk persistence contracts and SQLite implementation.
//!
//! # Responsibility
//! - Define the writer/reader contracts consumed by services.
//! - Isolate SQL and transaction handling from orchestration code.
//!
//! # Invariants
//! - Writers validate each record before its insert reaches the store.
//! - Every unit of work is resolved (committed or rolled back) before the
//!   owning call returns, on every exit path.

pub mod record_repo;
