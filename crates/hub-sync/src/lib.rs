//! Client-side data synchronisation for the source code hub.
//!
//! [`SyncFacade`] is the single entry point for project and admin data. Every
//! read and write tries the document service first through a
//! [`RemoteRepository`](hub_core::remote::RemoteRepository) and falls back to
//! the [`LocalCache`](hub_core::cache::LocalCache) when that fails. Remote
//! failures never reach the caller. [`SessionManager`] tracks the logged-in
//! admin independently of the network.

pub mod assets;
pub mod cache;
pub mod chat;
pub mod detached;
pub mod error;
pub mod facade;
pub mod remote;
pub mod session;

pub use error::{Error, Result};
pub use facade::SyncFacade;
pub use remote::{HttpRemote, RemoteConfig, RemoteError};
pub use session::SessionManager;

#[cfg(test)]
mod tests;
