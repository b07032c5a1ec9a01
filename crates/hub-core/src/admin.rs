//! Admin identities — the people allowed to publish projects and to be
//! impersonated by the chat relay.
//!
//! An [`Admin`] carries its credential secret and is only ever stored on the
//! local client. Everything that leaves the client, or is shown to a visitor,
//! goes through [`AdminProfile`], which has no secret field at all.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{Error, Result};

// ─── Role ────────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum AdminRole {
  Owner,
  Admin,
}

impl AdminRole {
  pub fn parse(s: &str) -> Result<Self> {
    Self::from_str(s).map_err(|_| Error::UnknownRole(s.to_owned()))
  }
}

// ─── Admin ───────────────────────────────────────────────────────────────────

/// A full admin record, including the plaintext credential secret.
///
/// Secrets are compared verbatim. This mirrors how the gallery has always
/// authenticated and is not suitable for a production deployment.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
  pub id:        String,
  /// The sole login key.
  pub username:  String,
  pub name:      String,
  pub role:      AdminRole,
  pub quote:     String,
  pub hashtags:  Vec<String>,
  pub photo_url: String,
  #[serde(rename = "password", default)]
  pub secret:    String,
}

impl Admin {
  /// Whether `username` and `secret` both match exactly.
  pub fn matches(&self, username: &str, secret: &str) -> bool {
    self.username == username && self.secret == secret
  }

  /// The outward-facing projection of this admin.
  pub fn profile(&self) -> AdminProfile {
    AdminProfile {
      id:        self.id.clone(),
      username:  self.username.clone(),
      name:      self.name.clone(),
      role:      self.role,
      quote:     self.quote.clone(),
      hashtags:  self.hashtags.clone(),
      photo_url: self.photo_url.clone(),
    }
  }
}

// Keep the secret out of logs.
impl fmt::Debug for Admin {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Admin")
      .field("id", &self.id)
      .field("username", &self.username)
      .field("name", &self.name)
      .field("role", &self.role)
      .field("quote", &self.quote)
      .field("hashtags", &self.hashtags)
      .field("photo_url", &self.photo_url)
      .field("secret", &"<redacted>")
      .finish()
  }
}

// ─── Profile ─────────────────────────────────────────────────────────────────

/// An admin as seen by visitors and by the document service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
  pub id:        String,
  pub username:  String,
  pub name:      String,
  pub role:      AdminRole,
  pub quote:     String,
  pub hashtags:  Vec<String>,
  pub photo_url: String,
}

// ─── Patch ───────────────────────────────────────────────────────────────────

/// A partial update to an admin's profile fields. `None` leaves the field
/// unchanged. Identity, role and secret are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name:      Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub quote:     Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub hashtags:  Option<Vec<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub photo_url: Option<String>,
}

impl AdminPatch {
  pub fn is_empty(&self) -> bool {
    self.name.is_none()
      && self.quote.is_none()
      && self.hashtags.is_none()
      && self.photo_url.is_none()
  }

  /// Overwrite the fields present in the patch; leave the rest alone.
  pub fn apply(&self, admin: &mut Admin) {
    if let Some(v) = &self.name {
      admin.name.clone_from(v);
    }
    if let Some(v) = &self.quote {
      admin.quote.clone_from(v);
    }
    if let Some(v) = &self.hashtags {
      admin.hashtags.clone_from(v);
    }
    if let Some(v) = &self.photo_url {
      admin.photo_url.clone_from(v);
    }
  }
}
