//! Core types and trait definitions for the source code hub.
//!
//! This crate has no HTTP or database dependencies.
//! The storage backend, the document service, and the client sync layer all
//! depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod admin;
pub mod cache;
pub mod error;
pub mod project;
pub mod remote;
pub mod seed;
pub mod session;
pub mod store;

pub use error::{Error, Result};
