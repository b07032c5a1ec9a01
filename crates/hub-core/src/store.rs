//! The `DocumentStore` trait — server-side persistence for the document
//! service.
//!
//! Implemented by storage backends (e.g. `hub-store-sqlite`) and consumed by
//! `hub-api`. Counters can only be incremented; there is no way to set
//! them.

use std::future::Future;

use crate::{
  admin::{AdminPatch, AdminProfile},
  project::Project,
};

pub trait DocumentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Projects ──────────────────────────────────────────────────────────

  /// All projects, newest `created_at` first.
  fn list_projects(
    &self,
  ) -> impl Future<Output = Result<Vec<Project>, Self::Error>> + Send + '_;

  fn get_project(
    &self,
    id: String,
  ) -> impl Future<Output = Result<Option<Project>, Self::Error>> + Send + '_;

  /// Insert `project` as given, keeping its id. Returns `None`, and writes
  /// nothing, if the id is already taken.
  fn insert_project(
    &self,
    project: Project,
  ) -> impl Future<Output = Result<Option<Project>, Self::Error>> + Send + '_;

  /// Delete a project permanently. Returns `false` if it did not exist.
  fn delete_project(
    &self,
    id: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Returns `false` if the project does not exist.
  fn increment_likes(
    &self,
    id: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Returns `false` if the project does not exist.
  fn increment_downloads(
    &self,
    id: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Admins ────────────────────────────────────────────────────────────

  fn list_admins(
    &self,
  ) -> impl Future<Output = Result<Vec<AdminProfile>, Self::Error>> + Send + '_;

  /// Insert `profiles` if and only if no admin exists yet. Returns the number
  /// of rows written.
  fn seed_admins(
    &self,
    profiles: Vec<AdminProfile>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Apply `patch` to an admin. Returns `false` if the admin does not exist.
  fn update_admin(
    &self,
    id: String,
    patch: AdminPatch,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
