//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with a fixed millisecond width
//! and a `Z` suffix, so that lexical order equals chronological order.
//! Hashtags are stored as compact JSON arrays.

use chrono::{DateTime, SecondsFormat, Utc};
use hub_core::{
  admin::{AdminProfile, AdminRole},
  project::{Project, ProjectKind},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Counters ────────────────────────────────────────────────────────────────

pub fn encode_counter(n: u64) -> Result<i64> {
  i64::try_from(n).map_err(|_| Error::CounterOverflow(n))
}

pub fn decode_counter(n: i64) -> Result<u64> {
  u64::try_from(n).map_err(|_| Error::NegativeCounter(n))
}

// ─── Enums ───────────────────────────────────────────────────────────────────

pub fn encode_kind(k: ProjectKind) -> String { k.to_string() }

pub fn encode_role(r: AdminRole) -> String { r.to_string() }

// ─── Hashtags ────────────────────────────────────────────────────────────────

pub fn encode_hashtags(tags: &[String]) -> Result<String> {
  Ok(serde_json::to_string(tags)?)
}

pub fn decode_hashtags(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Raw row types ───────────────────────────────────────────────────────────

/// Column values for a `projects` row, as read from SQLite.
pub struct RawProject {
  pub id:          String,
  pub name:        String,
  pub language:    String,
  pub kind:        String,
  pub content:     String,
  pub notes:       String,
  pub preview_url: String,
  pub likes:       i64,
  pub downloads:   i64,
  pub author_id:   String,
  pub created_at:  String,
}

pub const PROJECT_COLUMNS: &str = "id, name, language, kind, content, notes, \
   preview_url, likes, downloads, author_id, created_at";

impl RawProject {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      name:        row.get(1)?,
      language:    row.get(2)?,
      kind:        row.get(3)?,
      content:     row.get(4)?,
      notes:       row.get(5)?,
      preview_url: row.get(6)?,
      likes:       row.get(7)?,
      downloads:   row.get(8)?,
      author_id:   row.get(9)?,
      created_at:  row.get(10)?,
    })
  }

  pub fn into_project(self) -> Result<Project> {
    Ok(Project {
      id:          self.id,
      name:        self.name,
      language:    self.language,
      kind:        ProjectKind::parse(&self.kind)?,
      content:     self.content,
      notes:       self.notes,
      preview_url: self.preview_url,
      likes:       decode_counter(self.likes)?,
      downloads:   decode_counter(self.downloads)?,
      author_id:   self.author_id,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Column values for an `admins` row, as read from SQLite.
pub struct RawAdmin {
  pub id:        String,
  pub username:  String,
  pub name:      String,
  pub role:      String,
  pub quote:     String,
  pub hashtags:  String,
  pub photo_url: String,
}

pub const ADMIN_COLUMNS: &str =
  "id, username, name, role, quote, hashtags, photo_url";

impl RawAdmin {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:        row.get(0)?,
      username:  row.get(1)?,
      name:      row.get(2)?,
      role:      row.get(3)?,
      quote:     row.get(4)?,
      hashtags:  row.get(5)?,
      photo_url: row.get(6)?,
    })
  }

  pub fn into_profile(self) -> Result<AdminProfile> {
    Ok(AdminProfile {
      id:        self.id,
      username:  self.username,
      name:      self.name,
      role:      AdminRole::parse(&self.role)?,
      quote:     self.quote,
      hashtags:  decode_hashtags(&self.hashtags)?,
      photo_url: self.photo_url,
    })
  }
}
