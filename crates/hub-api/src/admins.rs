//! Handlers for `/admins` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/admins` | Public profiles only |
//! | `PUT`  | `/admins/:id` | Body: partial profile; 204, 404 if absent |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
};
use hub_core::{
  admin::{AdminPatch, AdminProfile},
  store::DocumentStore,
};

use crate::error::ApiError;

/// `GET /admins`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<AdminProfile>>, ApiError>
where
  S: DocumentStore,
{
  let admins = store.list_admins().await.map_err(ApiError::store)?;
  Ok(Json(admins))
}

/// `PUT /admins/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  Json(patch): Json<AdminPatch>,
) -> Result<StatusCode, ApiError>
where
  S: DocumentStore,
{
  let hit = store
    .update_admin(id.clone(), patch)
    .await
    .map_err(ApiError::store)?;

  if !hit {
    return Err(ApiError::NotFound(format!("admin {id} not found")));
  }
  Ok(StatusCode::NO_CONTENT)
}
