//! The `RemoteRepository` trait — the client's view of the document service.
//!
//! Implementations are thin request/response mappings with no retries. Any
//! error, whatever its cause, means "unavailable" to the sync layer; the
//! associated error type exists for logging only.

use std::future::Future;

use crate::{admin::AdminPatch, project::Project};

pub trait RemoteRepository: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All projects, newest `created_at` first.
  fn list_projects(
    &self,
  ) -> impl Future<Output = Result<Vec<Project>, Self::Error>> + Send + '_;

  /// Persist `project` and return the stored record.
  fn create_project<'a>(
    &'a self,
    project: &'a Project,
  ) -> impl Future<Output = Result<Project, Self::Error>> + Send + 'a;

  fn delete_project<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  fn increment_like<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  fn increment_download<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  fn update_admin<'a>(
    &'a self,
    id: &'a str,
    patch: &'a AdminPatch,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
