//! JSON REST API for the source code hub — the remote document service the
//! client sync layer talks to.
//!
//! Exposes an axum [`Router`] backed by any [`DocumentStore`]. TLS and auth
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", hub_api::api_router(store.clone()))
//! ```

pub mod admins;
pub mod error;
pub mod projects;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{
  Router,
  routing::{get, post, put},
};
use hub_core::{seed, store::DocumentStore};
use hub_store_sqlite::SqliteStore;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and `HUB_*`
/// environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

impl ServerConfig {
  /// Read `path` if it exists, then let `HUB_*` environment variables
  /// override individual fields.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("HUB"))
      .build()?
      .try_deserialize()
  }

  pub fn bind_address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Open the document store at `path` and give it the seed admin profiles if
/// it has none yet.
pub async fn open_store(path: &Path) -> hub_store_sqlite::Result<SqliteStore> {
  let store = SqliteStore::open(path).await?;
  store
    .seed_admins(seed::admins().iter().map(|a| a.profile()).collect())
    .await?;
  Ok(store)
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 5000 }

fn default_store_path() -> PathBuf { PathBuf::from("hub.db") }

// ─── Routers ──────────────────────────────────────────────────────────────────

/// Build the API router for `store`, without the `/api` prefix.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: DocumentStore + 'static,
{
  Router::new()
    // Projects
    .route("/projects", get(projects::list::<S>).post(projects::create::<S>))
    .route("/projects/{id}", axum::routing::delete(projects::delete_one::<S>))
    .route("/projects/{id}/like", post(projects::like::<S>))
    .route("/projects/{id}/download", post(projects::download::<S>))
    // Admins
    .route("/admins", get(admins::list::<S>))
    .route("/admins/{id}", put(admins::update::<S>))
    .with_state(store)
}

/// The full application: the API under `/api`, request tracing, and a
/// permissive CORS policy so browser clients on other origins can reach it.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: DocumentStore + 'static,
{
  Router::new()
    .nest("/api", api_router(store))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
}
