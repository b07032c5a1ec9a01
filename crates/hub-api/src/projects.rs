//! Handlers for `/projects` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/projects` | Newest first |
//! | `POST`   | `/projects` | Body: a full project; 201, 409 if the id exists |
//! | `DELETE` | `/projects/:id` | 204, 404 if absent |
//! | `POST`   | `/projects/:id/like` | 204, 404 if absent |
//! | `POST`   | `/projects/:id/download` | 204, 404 if absent |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use hub_core::{project::Project, store::DocumentStore};

use crate::error::ApiError;

/// `GET /projects`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Project>>, ApiError>
where
  S: DocumentStore,
{
  let projects = store.list_projects().await.map_err(ApiError::store)?;
  Ok(Json(projects))
}

/// `POST /projects`. The body keeps its client-assigned id.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(project): Json<Project>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DocumentStore,
{
  let id = project.id.clone();
  let Some(stored) = store.insert_project(project).await.map_err(ApiError::store)? else {
    return Err(ApiError::Conflict(format!("project {id} already exists")));
  };
  tracing::info!(id = %stored.id, "project deployed");
  Ok((StatusCode::CREATED, Json(stored)))
}

/// `DELETE /projects/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: DocumentStore,
{
  found(store.delete_project(id.clone()).await.map_err(ApiError::store)?, &id)
}

/// `POST /projects/:id/like`
pub async fn like<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: DocumentStore,
{
  found(store.increment_likes(id.clone()).await.map_err(ApiError::store)?, &id)
}

/// `POST /projects/:id/download`
pub async fn download<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: DocumentStore,
{
  found(
    store.increment_downloads(id.clone()).await.map_err(ApiError::store)?,
    &id,
  )
}

fn found(hit: bool, id: &str) -> Result<StatusCode, ApiError> {
  if hit {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("project {id} not found")))
  }
}
