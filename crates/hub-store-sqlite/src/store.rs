//! [`SqliteStore`] — the SQLite implementation of [`DocumentStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use hub_core::{
  admin::{AdminPatch, AdminProfile},
  project::Project,
  store::DocumentStore,
};

use crate::{
  Error, Result,
  encode::{
    ADMIN_COLUMNS, PROJECT_COLUMNS, RawAdmin, RawProject, encode_counter, encode_dt,
    encode_hashtags, encode_kind, encode_role,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A hub store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a statement whose only parameter is a project id and report
  /// whether a row was touched.
  async fn execute_by_id(&self, sql: &'static str, id: String) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| Ok(conn.execute(sql, rusqlite::params![id])?))
      .await?;
    Ok(changed > 0)
  }
}

// ─── DocumentStore impl ──────────────────────────────────────────────────────

impl DocumentStore for SqliteStore {
  type Error = Error;

  // ── Projects ──────────────────────────────────────────────────────────────

  async fn list_projects(&self) -> Result<Vec<Project>> {
    let raws: Vec<RawProject> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt
          .query_map([], RawProject::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProject::into_project).collect()
  }

  async fn get_project(&self, id: String) -> Result<Option<Project>> {
    let raw: Option<RawProject> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1"),
              rusqlite::params![id],
              RawProject::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawProject::into_project).transpose()
  }

  async fn insert_project(&self, project: Project) -> Result<Option<Project>> {
    let id          = project.id.clone();
    let name        = project.name.clone();
    let language    = project.language.clone();
    let kind        = encode_kind(project.kind);
    let content     = project.content.clone();
    let notes       = project.notes.clone();
    let preview_url = project.preview_url.clone();
    let likes       = encode_counter(project.likes)?;
    let downloads   = encode_counter(project.downloads)?;
    let author_id   = project.author_id.clone();
    let created_at  = encode_dt(project.created_at);

    // A taken id inserts nothing, so racing creates cannot both succeed.
    let inserted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "INSERT INTO projects (
             id, name, language, kind, content, notes,
             preview_url, likes, downloads, author_id, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
           ON CONFLICT(id) DO NOTHING",
          rusqlite::params![
            id,
            name,
            language,
            kind,
            content,
            notes,
            preview_url,
            likes,
            downloads,
            author_id,
            created_at,
          ],
        )?)
      })
      .await?;

    Ok((inserted > 0).then_some(project))
  }

  async fn delete_project(&self, id: String) -> Result<bool> {
    self.execute_by_id("DELETE FROM projects WHERE id = ?1", id).await
  }

  async fn increment_likes(&self, id: String) -> Result<bool> {
    self
      .execute_by_id("UPDATE projects SET likes = likes + 1 WHERE id = ?1", id)
      .await
  }

  async fn increment_downloads(&self, id: String) -> Result<bool> {
    self
      .execute_by_id("UPDATE projects SET downloads = downloads + 1 WHERE id = ?1", id)
      .await
  }

  // ── Admins ────────────────────────────────────────────────────────────────

  async fn list_admins(&self) -> Result<Vec<AdminProfile>> {
    let raws: Vec<RawAdmin> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {ADMIN_COLUMNS} FROM admins ORDER BY id"))?;
        let rows = stmt
          .query_map([], RawAdmin::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAdmin::into_profile).collect()
  }

  async fn seed_admins(&self, profiles: Vec<AdminProfile>) -> Result<usize> {
    let rows = profiles
      .into_iter()
      .map(|p| {
        Ok((
          p.id,
          p.username,
          p.name,
          encode_role(p.role),
          p.quote,
          encode_hashtags(&p.hashtags)?,
          p.photo_url,
        ))
      })
      .collect::<Result<Vec<_>>>()?;

    let written = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let existing: i64 =
          tx.query_row("SELECT COUNT(*) FROM admins", [], |r| r.get(0))?;
        if existing > 0 {
          return Ok(0);
        }

        let mut written = 0;
        for (id, username, name, role, quote, hashtags, photo_url) in &rows {
          written += tx.execute(
            "INSERT INTO admins (id, username, name, role, quote, hashtags, photo_url)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![id, username, name, role, quote, hashtags, photo_url],
          )?;
        }
        tx.commit()?;
        Ok(written)
      })
      .await?;

    if written > 0 {
      tracing::info!(count = written, "seeded admin profiles");
    }
    Ok(written)
  }

  async fn update_admin(&self, id: String, patch: AdminPatch) -> Result<bool> {
    let hashtags = patch.hashtags.as_deref().map(encode_hashtags).transpose()?;
    let AdminPatch { name, quote, photo_url, .. } = patch;

    // Absent fields bind as NULL and COALESCE back to the stored value.
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE admins SET
             name      = COALESCE(?2, name),
             quote     = COALESCE(?3, quote),
             hashtags  = COALESCE(?4, hashtags),
             photo_url = COALESCE(?5, photo_url)
           WHERE id = ?1",
          rusqlite::params![id, name, quote, hashtags, photo_url],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }
}
