//! Async HTTP client for the hub JSON API.

use std::time::Duration;

use hub_core::{admin::AdminPatch, project::Project, remote::RemoteRepository};
use reqwest::{Client, Response, StatusCode};
use thiserror::Error;

/// Connection settings for the document service.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
  /// Server root, e.g. `http://localhost:5000`. `/api` is appended.
  pub base_url: String,
  /// Per-request timeout. `None` leaves the transport default in place, so a
  /// hung request is simply never answered.
  pub timeout:  Option<Duration>,
}

impl Default for RemoteConfig {
  fn default() -> Self {
    Self { base_url: "http://localhost:5000".to_string(), timeout: None }
  }
}

/// Why a remote call did not succeed. The sync layer treats every variant
/// the same way: the service is unavailable.
#[derive(Debug, Error)]
pub enum RemoteError {
  #[error("transport error: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("{op} → {status}")]
  Status { op: String, status: StatusCode },
}

/// Async HTTP client for the hub JSON REST API.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct HttpRemote {
  client: Client,
  config: RemoteConfig,
}

impl HttpRemote {
  pub fn new(config: RemoteConfig) -> Result<Self, RemoteError> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.timeout {
      builder = builder.timeout(timeout);
    }
    Ok(Self { client: builder.build()?, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }
}

fn check(op: impl Into<String>, resp: Response) -> Result<Response, RemoteError> {
  if resp.status().is_success() {
    Ok(resp)
  } else {
    Err(RemoteError::Status { op: op.into(), status: resp.status() })
  }
}

impl RemoteRepository for HttpRemote {
  type Error = RemoteError;

  /// `GET /api/projects`
  async fn list_projects(&self) -> Result<Vec<Project>, RemoteError> {
    let resp = self.client.get(self.url("/projects")).send().await?;
    Ok(check("GET /projects", resp)?.json().await?)
  }

  /// `POST /api/projects`
  async fn create_project(&self, project: &Project) -> Result<Project, RemoteError> {
    let resp = self
      .client
      .post(self.url("/projects"))
      .json(project)
      .send()
      .await?;
    Ok(check("POST /projects", resp)?.json().await?)
  }

  /// `DELETE /api/projects/:id`
  async fn delete_project(&self, id: &str) -> Result<(), RemoteError> {
    let path = format!("/projects/{id}");
    let resp = self.client.delete(self.url(&path)).send().await?;
    check(format!("DELETE {path}"), resp)?;
    Ok(())
  }

  /// `POST /api/projects/:id/like`
  async fn increment_like(&self, id: &str) -> Result<(), RemoteError> {
    let path = format!("/projects/{id}/like");
    let resp = self.client.post(self.url(&path)).send().await?;
    check(format!("POST {path}"), resp)?;
    Ok(())
  }

  /// `POST /api/projects/:id/download`
  async fn increment_download(&self, id: &str) -> Result<(), RemoteError> {
    let path = format!("/projects/{id}/download");
    let resp = self.client.post(self.url(&path)).send().await?;
    check(format!("POST {path}"), resp)?;
    Ok(())
  }

  /// `PUT /api/admins/:id`
  async fn update_admin(&self, id: &str, patch: &AdminPatch) -> Result<(), RemoteError> {
    let path = format!("/admins/{id}");
    let resp = self.client.put(self.url(&path)).json(patch).send().await?;
    check(format!("PUT {path}"), resp)?;
    Ok(())
  }
}
