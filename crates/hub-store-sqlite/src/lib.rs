//! SQLite backend for the source code hub.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. A single [`SqliteStore`] can serve as
//! the client-side [`LocalCache`](hub_core::cache::LocalCache) and as the
//! server-side [`DocumentStore`](hub_core::store::DocumentStore); the two use
//! disjoint tables.

mod cache;
mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
