//! Typed, partition-locked access to a [`LocalCache`].
//!
//! Every read-modify-write of a partition runs while holding that
//! partition's async mutex, so two operations can never interleave their
//! cycles on the same snapshot. Different partitions never block each other.
//! No method holds more than one partition lock at a time.

use std::sync::Arc;

use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;

use hub_core::{
  admin::Admin,
  cache::{LocalCache, Partition, decode_snapshot, encode_snapshot},
  project::Project,
  seed,
  session::Session,
};

use crate::{Error, Result};

#[derive(Default)]
struct Locks {
  projects: Mutex<()>,
  admins:   Mutex<()>,
  session:  Mutex<()>,
}

/// The local cache store, typed per partition.
///
/// Cloning is cheap; clones share the backend and the locks.
pub struct Cache<C> {
  store: Arc<C>,
  locks: Arc<Locks>,
}

impl<C> Clone for Cache<C> {
  fn clone(&self) -> Self {
    Self { store: self.store.clone(), locks: self.locks.clone() }
  }
}

impl<C: LocalCache> Cache<C> {
  pub fn new(store: C) -> Self {
    Self { store: Arc::new(store), locks: Arc::default() }
  }

  pub fn backend(&self) -> &C { &self.store }

  // ── Raw snapshot access (caller holds the partition lock) ─────────────────

  /// Read a partition, seeding and persisting `seed()` on first access.
  async fn read_or_seed<T, F>(&self, partition: Partition, seed: F) -> Result<T>
  where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> T,
  {
    match self.store.load(partition).await.map_err(Error::cache)? {
      Some(raw) => Ok(decode_snapshot(&raw)?),
      None => {
        let value = seed();
        self.write(partition, &value).await?;
        tracing::debug!(key = partition.key(), "seeded local cache partition");
        Ok(value)
      }
    }
  }

  async fn write<T: Serialize + ?Sized>(&self, partition: Partition, value: &T) -> Result<()> {
    let snapshot = encode_snapshot(value)?;
    self.store.store(partition, snapshot).await.map_err(Error::cache)
  }

  // ── Projects ──────────────────────────────────────────────────────────────

  pub async fn projects(&self) -> Result<Vec<Project>> {
    let _guard = self.locks.projects.lock().await;
    self.read_or_seed(Partition::Projects, || seed::projects(Utc::now())).await
  }

  /// Atomically read, modify and write back the project partition.
  pub async fn update_projects<T>(&self, f: impl FnOnce(&mut Vec<Project>) -> T) -> Result<T> {
    let _guard = self.locks.projects.lock().await;
    let mut projects: Vec<Project> = self
      .read_or_seed(Partition::Projects, || seed::projects(Utc::now()))
      .await?;
    let out = f(&mut projects);
    self.write(Partition::Projects, &projects).await?;
    Ok(out)
  }

  // ── Admins ────────────────────────────────────────────────────────────────

  pub async fn admins(&self) -> Result<Vec<Admin>> {
    let _guard = self.locks.admins.lock().await;
    self.read_or_seed(Partition::Admins, seed::admins).await
  }

  /// Atomically read, modify and write back the admin partition.
  pub async fn update_admins<T>(&self, f: impl FnOnce(&mut Vec<Admin>) -> T) -> Result<T> {
    let _guard = self.locks.admins.lock().await;
    let mut admins: Vec<Admin> = self.read_or_seed(Partition::Admins, seed::admins).await?;
    let out = f(&mut admins);
    self.write(Partition::Admins, &admins).await?;
    Ok(out)
  }

  // ── Session ───────────────────────────────────────────────────────────────

  pub async fn session(&self) -> Result<Option<Session>> {
    let _guard = self.locks.session.lock().await;
    self.read_session().await
  }

  /// Atomically read, modify and write back the session partition. A `None`
  /// result removes the partition.
  pub async fn update_session<T>(
    &self,
    f: impl FnOnce(&mut Option<Session>) -> T,
  ) -> Result<T> {
    let _guard = self.locks.session.lock().await;
    let mut session = self.read_session().await?;
    let out = f(&mut session);
    match &session {
      Some(s) => self.write(Partition::CurrentSession, s).await?,
      None => self
        .store
        .clear(Partition::CurrentSession)
        .await
        .map_err(Error::cache)?,
    }
    Ok(out)
  }

  async fn read_session(&self) -> Result<Option<Session>> {
    let raw = self
      .store
      .load(Partition::CurrentSession)
      .await
      .map_err(Error::cache)?;
    Ok(raw.as_deref().map(decode_snapshot::<Session>).transpose()?)
  }
}
