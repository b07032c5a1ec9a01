//! Session — the single active login of a client.
//!
//! A session is a full snapshot of the authenticated [`Admin`], persisted in
//! the local cache. Operations that need an identity take a `&Session`
//! explicitly rather than looking one up behind the caller's back.

use serde::{Deserialize, Serialize};

use crate::admin::{Admin, AdminPatch, AdminProfile, AdminRole};

/// The authenticated identity of the current client.
///
/// Serialises as the bare admin snapshot. Note that this includes the
/// credential secret, since that is what the cache has always stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
  admin: Admin,
}

impl Session {
  pub fn new(admin: Admin) -> Self { Self { admin } }

  pub fn admin(&self) -> &Admin { &self.admin }

  pub fn admin_id(&self) -> &str { &self.admin.id }

  pub fn role(&self) -> AdminRole { self.admin.role }

  pub fn profile(&self) -> AdminProfile { self.admin.profile() }

  /// Owners may edit anyone; everyone else only themselves.
  pub fn may_edit(&self, admin_id: &str) -> bool {
    self.admin.role == AdminRole::Owner || self.admin.id == admin_id
  }

  pub fn apply(&mut self, patch: &AdminPatch) { patch.apply(&mut self.admin); }
}
