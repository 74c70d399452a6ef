//! Use-case layer over the repository contracts.
//!
//! # Responsibility
//! - Offer mode-dispatching entry points for bulk ingest and read-back.
//! - Keep orchestration storage-agnostic via the repository traits.

pub mod record_service;
