//! The session manager — who is logged in on this client.
//!
//! State machine: `Anonymous → Authenticated` on a successful login,
//! `Authenticated → Anonymous` on logout. Sessions never expire. Admin lookup
//! is local-only, so login works the same whether or not the document service
//! is reachable.

use hub_core::{admin::AdminPatch, cache::LocalCache, session::Session};

use crate::{Error, Result, cache::Cache};

pub struct SessionManager<C> {
  cache: Cache<C>,
}

impl<C> Clone for SessionManager<C> {
  fn clone(&self) -> Self { Self { cache: self.cache.clone() } }
}

impl<C: LocalCache> SessionManager<C> {
  pub fn new(cache: Cache<C>) -> Self { Self { cache } }

  /// Authenticate by exact username and secret. On success the admin
  /// snapshot becomes the persisted session. On failure any existing session
  /// is left as it was.
  pub async fn login(&self, username: &str, secret: &str) -> Result<Session> {
    let admin = self
      .cache
      .admins()
      .await?
      .into_iter()
      .find(|a| a.matches(username, secret));

    let Some(admin) = admin else {
      tracing::info!(username, "login rejected");
      return Err(Error::InvalidCredentials);
    };

    let session = Session::new(admin);
    let stored = session.clone();
    self.cache.update_session(move |s| *s = Some(stored)).await?;
    tracing::info!(admin = session.admin_id(), "logged in");
    Ok(session)
  }

  /// Drop the current session. Logging out while anonymous is a no-op.
  pub async fn logout(&self) -> Result<()> {
    let previous = self.cache.update_session(Option::take).await?;
    if let Some(s) = previous {
      tracing::info!(admin = s.admin_id(), "logged out");
    }
    Ok(())
  }

  pub async fn current(&self) -> Result<Option<Session>> { self.cache.session().await }

  /// Patch the persisted session if it belongs to `admin_id`.
  pub(crate) async fn apply_patch(&self, admin_id: &str, patch: &AdminPatch) -> Result<bool> {
    self
      .cache
      .update_session(|s| match s {
        Some(s) if s.admin_id() == admin_id => {
          s.apply(patch);
          true
        }
        _ => false,
      })
      .await
  }
}
