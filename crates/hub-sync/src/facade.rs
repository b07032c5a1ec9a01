//! [`SyncFacade`] — arbitration between the document service and the local
//! cache.
//!
//! | Operation | Remote | On remote failure | Cache |
//! |-----------|--------|-------------------|-------|
//! | `list_projects` | list | cached set (seeded on first read) | read only |
//! | `save_project` | create | keep the locally built project | always prepended |
//! | `delete_project` | delete, after the author check | ignored | always removed |
//! | `increment_like` / `increment_download` | detached increment | ignored | incremented first |
//! | `update_admin` | put, after the cache | ignored | patched, session too |
//!
//! An empty remote collection is served as the seed set, exactly like an
//! unreachable one is served from the cache: callers never see an empty
//! gallery. Counters bumped locally are never reconciled with the server.

use std::sync::Arc;

use chrono::Utc;

use hub_core::{
  admin::{AdminPatch, AdminProfile},
  cache::LocalCache,
  project::{Project, ProjectDraft},
  remote::RemoteRepository,
  seed,
  session::Session,
};

use crate::{Error, Result, cache::Cache, detached::Detached, session::SessionManager};

/// The single entry point for project and admin data.
pub struct SyncFacade<R, C> {
  remote:   Arc<R>,
  cache:    Cache<C>,
  sessions: SessionManager<C>,
  detached: Detached,
}

impl<R, C> SyncFacade<R, C>
where
  R: RemoteRepository + 'static,
  C: LocalCache + 'static,
{
  pub fn new(remote: R, cache: C) -> Self {
    let cache = Cache::new(cache);
    Self {
      remote: Arc::new(remote),
      sessions: SessionManager::new(cache.clone()),
      cache,
      detached: Detached::new(),
    }
  }

  pub fn sessions(&self) -> &SessionManager<C> { &self.sessions }

  pub fn cache(&self) -> &Cache<C> { &self.cache }

  /// Wait for every detached remote call issued so far.
  pub async fn settle(&self) { self.detached.settle().await; }

  // ── Projects ──────────────────────────────────────────────────────────────

  /// All projects, newest first.
  pub async fn list_projects(&self) -> Result<Vec<Project>> {
    match self.remote.list_projects().await {
      Ok(projects) if !projects.is_empty() => return Ok(projects),
      Ok(_) => {
        tracing::debug!("remote collection is empty; serving seed data");
        return Ok(seed::projects(Utc::now()));
      }
      Err(e) => {
        tracing::warn!(error = %e, "backend unavailable; falling back to local cache")
      }
    }
    self.cache.projects().await
  }

  /// Publish a new project authored by the session's admin.
  ///
  /// The id is synthesized locally as `p-<unix millis>`; two saves within the
  /// same millisecond collide.
  pub async fn save_project(&self, session: &Session, draft: ProjectDraft) -> Result<Project> {
    let local = Project::from_draft(draft, session.admin_id(), Utc::now());

    let saved = match self.remote.create_project(&local).await {
      Ok(stored) => stored,
      Err(e) => {
        tracing::warn!(id = %local.id, error = %e, "backend unavailable; project saved locally");
        local
      }
    };

    let head = saved.clone();
    self.cache.update_projects(move |projects| projects.insert(0, head)).await?;
    Ok(saved)
  }

  /// Remove a project authored by the session's admin (an owner may remove
  /// any). The remote delete is awaited so that the next listing no longer
  /// carries the project; its failure is only logged. The cache is updated
  /// either way.
  pub async fn delete_project(&self, session: &Session, id: &str) -> Result<()> {
    let author = self
      .cache
      .projects()
      .await?
      .into_iter()
      .find(|p| p.id == id)
      .map(|p| p.author_id);
    if let Some(author) = author
      && !session.may_edit(&author)
    {
      return Err(Error::Forbidden {
        actor:  session.admin_id().to_owned(),
        target: format!("project {id}"),
      });
    }

    if let Err(e) = self.remote.delete_project(id).await {
      tracing::warn!(id, error = %e, "backend unavailable; project deleted locally only");
    }

    let removed = self
      .cache
      .update_projects(|projects| {
        let before = projects.len();
        projects.retain(|p| p.id != id);
        before - projects.len()
      })
      .await?;

    tracing::debug!(id, admin = session.admin_id(), removed, "project deleted");
    Ok(())
  }

  /// Record a like. Returns the new cached count, or `None` if the project is
  /// not in the local cache.
  pub async fn increment_like(&self, id: &str) -> Result<Option<u64>> {
    let likes = self
      .cache
      .update_projects(|projects| {
        projects.iter_mut().find(|p| p.id == id).map(|p| {
          p.record_like();
          p.likes
        })
      })
      .await?;

    let remote = self.remote.clone();
    let target = id.to_owned();
    self.detached.spawn("increment_like", target.clone(), async move {
      remote.increment_like(&target).await
    });
    Ok(likes)
  }

  /// Record a download. Same contract as [`Self::increment_like`].
  pub async fn increment_download(&self, id: &str) -> Result<Option<u64>> {
    let downloads = self
      .cache
      .update_projects(|projects| {
        projects.iter_mut().find(|p| p.id == id).map(|p| {
          p.record_download();
          p.downloads
        })
      })
      .await?;

    let remote = self.remote.clone();
    let target = id.to_owned();
    self.detached.spawn("increment_download", target.clone(), async move {
      remote.increment_download(&target).await
    });
    Ok(downloads)
  }

  // ── Admins ────────────────────────────────────────────────────────────────

  /// The admin directory, local-only.
  pub async fn list_admins(&self) -> Result<Vec<AdminProfile>> {
    Ok(self.cache.admins().await?.iter().map(|a| a.profile()).collect())
  }

  /// Resolve an author. A dangling id yields `None`, not an error.
  pub async fn find_admin(&self, id: &str) -> Result<Option<AdminProfile>> {
    Ok(
      self
        .cache
        .admins()
        .await?
        .iter()
        .find(|a| a.id == id)
        .map(|a| a.profile()),
    )
  }

  /// Patch an admin's profile: cache first, then the remote (whose failure is
  /// ignored), then the persisted session if it is the same admin.
  pub async fn update_admin(
    &self,
    session: &Session,
    id: &str,
    patch: AdminPatch,
  ) -> Result<()> {
    if !session.may_edit(id) {
      return Err(Error::Forbidden {
        actor:  session.admin_id().to_owned(),
        target: format!("admin {id}"),
      });
    }

    let found = self
      .cache
      .update_admins(|admins| {
        admins
          .iter_mut()
          .find(|a| a.id == id)
          .map(|a| patch.apply(a))
          .is_some()
      })
      .await?;
    if !found {
      tracing::debug!(id, "admin not in local cache; nothing patched locally");
    }

    if let Err(e) = self.remote.update_admin(id, &patch).await {
      tracing::warn!(id, error = %e, "backend unavailable; profile change kept locally");
    }

    if self.sessions.apply_patch(id, &patch).await? {
      tracing::debug!(id, "session snapshot patched");
    }
    Ok(())
  }
}
