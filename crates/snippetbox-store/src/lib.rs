//! snippetbox-store: persistence for Snippetbox snippets.
//!
//! Handlers depend only on the [`SnippetStore`] trait. Two implementations
//! ship with the crate:
//!
//! - [`PgSnippetStore`], backed by a `sqlx` PostgreSQL pool, for production.
//! - [`MemorySnippetStore`], a lock-guarded map with an injectable clock,
//!   for tests and local experiments.
//!
//! # Expiry
//!
//! Expiry is a query-time filter: `get` and `latest` never return a snippet
//! whose `expires` is not in the future. Rows are only physically removed by
//! [`SnippetStore::purge_expired`], which the optional [`Reaper`] calls on a
//! fixed interval.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod reaper;
pub mod store;
pub mod types;

pub use error::{StoreError, StoreResult};
pub use memory::MemorySnippetStore;
pub use postgres::PgSnippetStore;
pub use reaper::Reaper;
pub use store::SnippetStore;
pub use types::*;
