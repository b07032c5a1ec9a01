//! Behavioural tests for the sync facade and session manager.
//!
//! Offline tests use stub remotes. Online tests bind a real `hub-api` server
//! on an ephemeral port, backed by an in-memory SQLite document store.

use std::{
  sync::{Arc, Mutex},
  time::Duration,
};

use hub_core::{
  admin::{AdminPatch, AdminRole},
  cache::{LocalCache, Partition},
  project::{Project, ProjectDraft, ProjectKind},
  remote::RemoteRepository,
  seed,
  session::Session,
  store::DocumentStore,
};
use hub_store_sqlite::SqliteStore;

use crate::{Error, HttpRemote, RemoteConfig, SyncFacade};

// ─── Stub remotes ────────────────────────────────────────────────────────────

fn unreachable() -> std::io::Error {
  std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "unreachable")
}

/// A document service that is never reachable.
struct Offline;

impl RemoteRepository for Offline {
  type Error = std::io::Error;

  async fn list_projects(&self) -> Result<Vec<Project>, std::io::Error> { Err(unreachable()) }

  async fn create_project(&self, _: &Project) -> Result<Project, std::io::Error> {
    Err(unreachable())
  }

  async fn delete_project(&self, _: &str) -> Result<(), std::io::Error> { Err(unreachable()) }

  async fn increment_like(&self, _: &str) -> Result<(), std::io::Error> { Err(unreachable()) }

  async fn increment_download(&self, _: &str) -> Result<(), std::io::Error> {
    Err(unreachable())
  }

  async fn update_admin(&self, _: &str, _: &AdminPatch) -> Result<(), std::io::Error> {
    Err(unreachable())
  }
}

/// A reachable service with an empty collection that records every call.
#[derive(Clone, Default)]
struct EmptyRecorder {
  calls: Arc<Mutex<Vec<String>>>,
}

impl EmptyRecorder {
  fn record(&self, call: String) { self.calls.lock().unwrap().push(call); }

  fn calls(&self) -> Vec<String> { self.calls.lock().unwrap().clone() }
}

impl RemoteRepository for EmptyRecorder {
  type Error = std::io::Error;

  async fn list_projects(&self) -> Result<Vec<Project>, std::io::Error> {
    self.record("list".into());
    Ok(Vec::new())
  }

  async fn create_project(&self, p: &Project) -> Result<Project, std::io::Error> {
    self.record(format!("create {}", p.id));
    Ok(p.clone())
  }

  async fn delete_project(&self, id: &str) -> Result<(), std::io::Error> {
    self.record(format!("delete {id}"));
    Ok(())
  }

  async fn increment_like(&self, id: &str) -> Result<(), std::io::Error> {
    self.record(format!("like {id}"));
    Ok(())
  }

  async fn increment_download(&self, id: &str) -> Result<(), std::io::Error> {
    self.record(format!("download {id}"));
    Ok(())
  }

  async fn update_admin(&self, id: &str, _: &AdminPatch) -> Result<(), std::io::Error> {
    self.record(format!("update {id}"));
    Ok(())
  }
}

// ─── Fixtures ────────────────────────────────────────────────────────────────

async fn cache() -> SqliteStore { SqliteStore::open_in_memory().await.expect("in-memory store") }

async fn offline() -> SyncFacade<Offline, SqliteStore> { SyncFacade::new(Offline, cache().await) }

fn draft(name: &str) -> ProjectDraft {
  ProjectDraft::new(name, "Rust", ProjectKind::Code, "fn main() {}")
}

async fn login_owner<R, C>(facade: &SyncFacade<R, C>) -> Session
where
  R: RemoteRepository + 'static,
  C: LocalCache + 'static,
{
  facade.sessions().login("BraynOfficial", "admin").await.unwrap()
}

/// Start a `hub-api` server and return its base URL and backing store.
async fn serve() -> (String, Arc<SqliteStore>) {
  let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
  store
    .seed_admins(seed::admins().iter().map(|a| a.profile()).collect())
    .await
    .unwrap();

  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  let app = hub_api::app(store.clone());
  tokio::spawn(async move { axum::serve(listener, app).await });
  (format!("http://{addr}"), store)
}

async fn online() -> (SyncFacade<HttpRemote, SqliteStore>, Arc<SqliteStore>) {
  let (base_url, store) = serve().await;
  let remote = HttpRemote::new(RemoteConfig {
    base_url,
    timeout: Some(Duration::from_secs(5)),
  })
  .unwrap();
  (SyncFacade::new(remote, cache().await), store)
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn offline_list_serves_seed_and_persists_it() {
  let facade = offline().await;
  let projects = facade.list_projects().await.unwrap();

  let ids: Vec<_> = projects.iter().map(|p| p.id.as_str()).collect();
  assert_eq!(ids, ["p-1", "p-2"]);
  assert!(facade.cache().backend().load(Partition::Projects).await.unwrap().is_some());
}

#[tokio::test]
async fn empty_remote_collection_serves_seed_not_empty() {
  let remote = EmptyRecorder::default();
  let facade = SyncFacade::new(remote.clone(), cache().await);

  let projects = facade.list_projects().await.unwrap();
  assert_eq!(projects.len(), 2);
  assert_eq!(remote.calls(), ["list"]);
}

#[tokio::test]
async fn online_list_returns_remote_collection() {
  let (facade, store) = online().await;
  let remote_only = Project::from_draft(draft("remote"), "admin-2", chrono::Utc::now());
  store.insert_project(remote_only.clone()).await.unwrap();

  let projects = facade.list_projects().await.unwrap();
  assert_eq!(projects.len(), 1);
  assert_eq!(projects[0].id, remote_only.id);
  assert_eq!(projects[0].name, "remote");
}

#[tokio::test]
async fn unreachable_http_remote_falls_back() {
  // Nothing listens on the discard port of localhost in the test environment.
  let remote = HttpRemote::new(RemoteConfig {
    base_url: "http://127.0.0.1:9".into(),
    timeout:  Some(Duration::from_secs(2)),
  })
  .unwrap();
  let facade = SyncFacade::new(remote, cache().await);

  let projects = facade.list_projects().await.unwrap();
  assert_eq!(projects[0].id, "p-1");
}

// ─── Saving ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn offline_saves_stack_newest_first_with_distinct_ids() {
  let facade = offline().await;
  let session = login_owner(&facade).await;

  let mut saved = Vec::new();
  for name in ["one", "two", "three"] {
    saved.push(facade.save_project(&session, draft(name)).await.unwrap());
    tokio::time::sleep(Duration::from_millis(2)).await;
  }

  for p in &saved {
    assert!(p.id.starts_with("p-"));
    assert_eq!((p.likes, p.downloads), (0, 0));
    assert_eq!(p.author_id, "admin-1");
  }
  let stamps: Vec<i64> = saved.iter().map(|p| p.id[2..].parse().unwrap()).collect();
  assert!(stamps.windows(2).all(|w| w[0] < w[1]));

  let names: Vec<_> = facade
    .list_projects()
    .await
    .unwrap()
    .into_iter()
    .map(|p| p.name)
    .collect();
  assert_eq!(
    names,
    ["three", "two", "one", "Cyberpunk UI Kit", "Deep Neural Visualizer"]
  );
}

#[tokio::test]
async fn online_save_persists_remotely_and_mirrors_to_cache() {
  let (facade, store) = online().await;
  let session = facade.sessions().login("Silverhold", "admin").await.unwrap();

  let saved = facade.save_project(&session, draft("mirrored")).await.unwrap();

  let remote = store.get_project(saved.id.clone()).await.unwrap().unwrap();
  assert_eq!(remote.author_id, "admin-2");

  let cached = facade.cache().projects().await.unwrap();
  assert_eq!(cached[0].id, saved.id);
  assert_eq!(cached.len(), 3);
}

// ─── Deleting ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_locally_even_when_remote_fails() {
  let facade = offline().await;
  let session = login_owner(&facade).await;

  facade.delete_project(&session, "p-1").await.unwrap();

  let ids: Vec<_> = facade
    .list_projects()
    .await
    .unwrap()
    .into_iter()
    .map(|p| p.id)
    .collect();
  assert_eq!(ids, ["p-2"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn online_delete_is_gone_from_the_next_listing() {
  let (facade, store) = online().await;
  let session = login_owner(&facade).await;

  for i in 0..10 {
    let saved = facade
      .save_project(&session, draft(&format!("short-lived {i}")))
      .await
      .unwrap();
    facade.delete_project(&session, &saved.id).await.unwrap();

    let listed = facade.list_projects().await.unwrap();
    assert!(listed.iter().all(|p| p.id != saved.id), "{} still listed", saved.id);
    assert!(store.get_project(saved.id.clone()).await.unwrap().is_none());
  }
  let cached = facade.cache().projects().await.unwrap();
  assert!(cached.iter().all(|p| !p.name.starts_with("short-lived")));
}

#[tokio::test]
async fn non_author_may_not_delete() {
  let facade = offline().await;
  let silver = facade.sessions().login("Silverhold", "admin").await.unwrap();

  let err = facade.delete_project(&silver, "p-1").await.unwrap_err();
  assert!(matches!(err, Error::Forbidden { ref target, .. } if target == "project p-1"));

  let cached = facade.cache().projects().await.unwrap();
  assert_eq!(cached.len(), 2);

  // Their own project is fine.
  facade.delete_project(&silver, "p-2").await.unwrap();
  assert_eq!(facade.cache().projects().await.unwrap().len(), 1);
}

#[tokio::test]
async fn owner_may_delete_any_project() {
  let facade = offline().await;
  let session = login_owner(&facade).await;

  facade.delete_project(&session, "p-2").await.unwrap();
  let cached = facade.cache().projects().await.unwrap();
  assert_eq!(cached[0].id, "p-1");
  assert_eq!(cached.len(), 1);
}

// ─── Counters ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn like_is_visible_immediately_offline() {
  let facade = offline().await;

  assert_eq!(facade.increment_like("p-1").await.unwrap(), Some(125));

  let projects = facade.list_projects().await.unwrap();
  assert_eq!(projects[0].id, "p-1");
  assert_eq!(projects[0].likes, 125);
  assert_eq!(projects[1].id, "p-2");
  assert_eq!(projects[1].likes, 89);
}

#[tokio::test]
async fn two_likes_add_exactly_two() {
  let facade = offline().await;
  assert_eq!(facade.increment_like("p-2").await.unwrap(), Some(90));
  assert_eq!(facade.increment_like("p-2").await.unwrap(), Some(91));
}

#[tokio::test]
async fn downloads_count_independently_of_likes() {
  let facade = offline().await;
  assert_eq!(facade.increment_download("p-1").await.unwrap(), Some(451));

  let cached = facade.cache().projects().await.unwrap();
  assert_eq!(cached[0].likes, 124);
  assert_eq!(cached[0].downloads, 451);
}

#[tokio::test]
async fn counter_on_unknown_project_is_none_but_still_sent() {
  let remote = EmptyRecorder::default();
  let facade = SyncFacade::new(remote.clone(), cache().await);

  assert_eq!(facade.increment_like("p-404").await.unwrap(), None);
  facade.settle().await;
  assert_eq!(remote.calls(), ["like p-404"]);
}

#[tokio::test]
async fn concurrent_likes_are_not_lost() {
  let facade = Arc::new(offline().await);
  let mut handles = Vec::new();
  for _ in 0..20 {
    let facade = facade.clone();
    handles.push(tokio::spawn(async move { facade.increment_like("p-1").await.unwrap() }));
  }
  for h in handles {
    h.await.unwrap();
  }

  let cached = facade.cache().projects().await.unwrap();
  assert_eq!(cached[0].likes, 144);
}

#[tokio::test]
async fn counters_reach_remote_after_settle() {
  let (facade, store) = online().await;
  let session = login_owner(&facade).await;
  let saved = facade.save_project(&session, draft("popular")).await.unwrap();

  facade.increment_like(&saved.id).await.unwrap();
  facade.increment_like(&saved.id).await.unwrap();
  facade.increment_download(&saved.id).await.unwrap();
  facade.settle().await;

  let remote = store.get_project(saved.id.clone()).await.unwrap().unwrap();
  assert_eq!((remote.likes, remote.downloads), (2, 1));
  let cached = facade.cache().projects().await.unwrap();
  assert_eq!((cached[0].likes, cached[0].downloads), (2, 1));
}

// ─── Sessions ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn login_then_current_then_logout() {
  let facade = offline().await;
  let sessions = facade.sessions();

  assert!(sessions.current().await.unwrap().is_none());

  let session = sessions.login("BraynOfficial", "admin").await.unwrap();
  assert_eq!(session.role(), AdminRole::Owner);
  let current = sessions.current().await.unwrap().unwrap();
  assert_eq!(current.admin().username, "BraynOfficial");

  sessions.logout().await.unwrap();
  assert!(sessions.current().await.unwrap().is_none());
  sessions.logout().await.unwrap();
}

#[tokio::test]
async fn failed_login_leaves_prior_session_untouched() {
  let facade = offline().await;
  let sessions = facade.sessions();
  sessions.login("Silverhold", "admin").await.unwrap();

  let err = sessions.login("BraynOfficial", "wrong").await.unwrap_err();
  assert!(matches!(err, Error::InvalidCredentials));
  let unknown = sessions.login("nobody", "admin").await.unwrap_err();
  assert_eq!(err.to_string(), unknown.to_string());

  let current = sessions.current().await.unwrap().unwrap();
  assert_eq!(current.admin_id(), "admin-2");
}

#[tokio::test]
async fn session_survives_reopening_the_cache() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("cache.db");

  {
    let facade = SyncFacade::new(Offline, SqliteStore::open(&path).await.unwrap());
    facade.sessions().login("Silverhold", "admin").await.unwrap();
  }

  let facade = SyncFacade::new(Offline, SqliteStore::open(&path).await.unwrap());
  let current = facade.sessions().current().await.unwrap().unwrap();
  assert_eq!(current.admin_id(), "admin-2");
}

// ─── Admins ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn admin_directory_hides_secrets() {
  let facade = offline().await;
  let admins = facade.list_admins().await.unwrap();
  assert_eq!(admins.len(), 2);
  let json = serde_json::to_string(&admins).unwrap();
  assert!(!json.contains("password"));
}

#[tokio::test]
async fn dangling_author_resolves_to_none() {
  let facade = offline().await;
  assert!(facade.find_admin("admin-404").await.unwrap().is_none());
  assert_eq!(
    facade.find_admin("admin-2").await.unwrap().unwrap().name,
    "Silverhold"
  );
}

#[tokio::test]
async fn self_update_patches_cache_and_session_offline() {
  let facade = offline().await;
  let session = facade.sessions().login("Silverhold", "admin").await.unwrap();
  let patch = AdminPatch { quote: Some("Offline edit".into()), ..Default::default() };

  facade.update_admin(&session, "admin-2", patch).await.unwrap();

  let profile = facade.find_admin("admin-2").await.unwrap().unwrap();
  assert_eq!(profile.quote, "Offline edit");
  let current = facade.sessions().current().await.unwrap().unwrap();
  assert_eq!(current.admin().quote, "Offline edit");
  assert_eq!(current.admin().secret, "admin");
}

#[tokio::test]
async fn owner_update_of_other_admin_leaves_own_session_alone() {
  let facade = offline().await;
  let session = login_owner(&facade).await;
  let patch = AdminPatch { name: Some("Silver".into()), ..Default::default() };

  facade.update_admin(&session, "admin-2", patch).await.unwrap();

  assert_eq!(facade.find_admin("admin-2").await.unwrap().unwrap().name, "Silver");
  let current = facade.sessions().current().await.unwrap().unwrap();
  assert_eq!(current.admin().name, "Brayn Official");
}

#[tokio::test]
async fn non_owner_may_not_edit_others() {
  let facade = offline().await;
  let session = facade.sessions().login("Silverhold", "admin").await.unwrap();
  let patch = AdminPatch { name: Some("Hijacked".into()), ..Default::default() };

  let err = facade.update_admin(&session, "admin-1", patch).await.unwrap_err();
  assert!(matches!(err, Error::Forbidden { .. }));
  assert_eq!(
    facade.find_admin("admin-1").await.unwrap().unwrap().name,
    "Brayn Official"
  );
}

#[tokio::test]
async fn online_update_reaches_remote_profile() {
  let (facade, store) = online().await;
  let session = login_owner(&facade).await;
  let patch = AdminPatch {
    hashtags: Some(vec!["#Rustacean".into()]),
    ..Default::default()
  };

  facade.update_admin(&session, "admin-1", patch).await.unwrap();

  let remote = store.list_admins().await.unwrap();
  let brayn = remote.iter().find(|a| a.id == "admin-1").unwrap();
  assert_eq!(brayn.hashtags, ["#Rustacean"]);
  let current = facade.sessions().current().await.unwrap().unwrap();
  assert_eq!(current.admin().hashtags, ["#Rustacean"]);
}
