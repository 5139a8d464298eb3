//! The media registry: a persistent ledger of saved entries (SQLite via
//! sqlx).
//!
//! A save on the registry path declares its entry first (pending), then
//! writes the bytes, then publishes the entry — the staged-insert-then-
//! write sequence. Identifiers handed back to callers are
//! `content://downloads/<id>` URIs.

pub mod db;
mod entries;
pub mod types;
pub mod uri;

pub use db::*;
pub use types::*;
pub use uri::{entry_uri, parse_entry_uri};

#[cfg(test)]
mod tests;
