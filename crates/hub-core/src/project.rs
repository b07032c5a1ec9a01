//! Project types — the published artifacts shown in the gallery.
//!
//! A project's like and download counters only ever move upwards. Nothing in
//! this crate exposes a setter for them; the only mutations are
//! [`Project::record_like`] and [`Project::record_download`].

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{Error, Result};

// ─── Kind ────────────────────────────────────────────────────────────────────

/// How a project's `content` is interpreted.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ProjectKind {
  /// `content` is literal source text.
  Code,
  /// `content` is an external URL to a downloadable artifact.
  File,
}

impl ProjectKind {
  /// Parse the wire/database tag (`CODE` or `FILE`, case-insensitive).
  pub fn parse(s: &str) -> Result<Self> {
    Self::from_str(s).map_err(|_| Error::UnknownProjectKind(s.to_owned()))
  }
}

// ─── Project ─────────────────────────────────────────────────────────────────

/// A published artifact.
///
/// `author_id` refers to an [`Admin`](crate::admin::Admin) but is never
/// checked; readers must tolerate authors that no longer resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
  pub id:          String,
  pub name:        String,
  pub language:    String,
  #[serde(rename = "type")]
  pub kind:        ProjectKind,
  pub content:     String,
  pub notes:       String,
  pub preview_url: String,
  pub likes:       u64,
  pub downloads:   u64,
  pub author_id:   String,
  /// Set once at creation; never changes afterwards.
  pub created_at:  DateTime<Utc>,
}

impl Project {
  /// Build a fresh project from a draft with a client-assigned id of the form
  /// `p-<unix millis>` and zeroed counters.
  pub fn from_draft(
    draft: ProjectDraft,
    author_id: impl Into<String>,
    now: DateTime<Utc>,
  ) -> Self {
    Self {
      id:          local_id(now),
      name:        draft.name,
      language:    draft.language,
      kind:        draft.kind,
      content:     draft.content,
      notes:       draft.notes,
      preview_url: draft.preview_url,
      likes:       0,
      downloads:   0,
      author_id:   author_id.into(),
      created_at:  now,
    }
  }

  pub fn record_like(&mut self) { self.likes = self.likes.saturating_add(1); }

  pub fn record_download(&mut self) {
    self.downloads = self.downloads.saturating_add(1);
  }
}

/// The id synthesized for a project created on this client.
pub fn local_id(now: DateTime<Utc>) -> String {
  format!("p-{}", now.timestamp_millis())
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// Input to a project save. The id, counters, creation time and author are
/// always assigned by the sync layer; they are not accepted from callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
  pub name:        String,
  pub language:    String,
  #[serde(rename = "type")]
  pub kind:        ProjectKind,
  pub content:     String,
  #[serde(default)]
  pub notes:       String,
  #[serde(default)]
  pub preview_url: String,
}

impl ProjectDraft {
  /// Convenience constructor with notes and preview left empty.
  pub fn new(
    name: impl Into<String>,
    language: impl Into<String>,
    kind: ProjectKind,
    content: impl Into<String>,
  ) -> Self {
    Self {
      name: name.into(),
      language: language.into(),
      kind,
      content: content.into(),
      notes: String::new(),
      preview_url: String::new(),
    }
  }

  pub fn with_preview(mut self, url: impl Into<String>) -> Self {
    self.preview_url = url.into();
    self
  }
}
