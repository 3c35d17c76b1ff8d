//! Core use-case services.
//!
//! # Responsibility
//! - Own the live pet collection and apply inbound intents to it.
//! - Keep presentation callers decoupled from slot storage details.

pub mod collection_store;
pub mod intent;
