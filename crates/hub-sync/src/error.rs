//! Error type for `hub-sync`.
//!
//! Remote failures have no variant here: the facade converts them into
//! fallback behaviour before they could become an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("local cache error: {0}")]
  Cache(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("corrupt cache snapshot: {0}")]
  Snapshot(#[from] hub_core::Error),

  /// Does not say whether the username or the secret was wrong.
  #[error("invalid username or secret")]
  InvalidCredentials,

  /// `target` names what was to be changed, e.g. `admin admin-1`.
  #[error("admin {actor} may not modify {target}")]
  Forbidden { actor: String, target: String },
}

impl Error {
  pub(crate) fn cache<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Cache(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
