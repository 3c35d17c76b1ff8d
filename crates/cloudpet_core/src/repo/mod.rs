//! Repository layer over the durable key-value substrate.
//!
//! # Responsibility
//! - Define the slot storage contract used by persistence.
//! - Isolate SQLite query details from snapshot encoding.
//!
//! # Invariants
//! - A slot holds exactly one value; writes replace it whole.

pub mod slot_repo;
