//! The `LocalCache` trait — durable, client-private key-value storage.
//!
//! A cache holds three independent partitions, each a single serialised
//! snapshot. Writes replace a partition wholesale; merging is the caller's
//! business. Backends make no attempt at concurrency control, so callers that
//! read-modify-write a partition must serialise those cycles themselves.

use std::future::Future;

use serde::{Serialize, de::DeserializeOwned};

use crate::Result;

// ─── Partitions ──────────────────────────────────────────────────────────────

/// One of the logical partitions of the local cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
  Projects,
  Admins,
  /// Absent while the client is anonymous.
  CurrentSession,
}

impl Partition {
  pub const ALL: [Partition; 3] =
    [Partition::Projects, Partition::Admins, Partition::CurrentSession];

  /// The storage key for this partition.
  pub fn key(self) -> &'static str {
    match self {
      Self::Projects => "sh_projects",
      Self::Admins => "sh_admins",
      Self::CurrentSession => "sh_current_admin",
    }
  }
}

// ─── Snapshots ───────────────────────────────────────────────────────────────

pub fn encode_snapshot<T: Serialize + ?Sized>(value: &T) -> Result<String> {
  Ok(serde_json::to_string(value)?)
}

pub fn decode_snapshot<T: DeserializeOwned>(raw: &str) -> Result<T> {
  Ok(serde_json::from_str(raw)?)
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a persistent client-side snapshot store.
pub trait LocalCache: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Return the raw snapshot for `partition`, or `None` if it has never been
  /// written (or has been cleared).
  fn load(
    &self,
    partition: Partition,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + '_;

  /// Replace the snapshot for `partition`.
  fn store(
    &self,
    partition: Partition,
    snapshot: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Remove the snapshot for `partition`. Clearing an absent partition is not
  /// an error.
  fn clear(
    &self,
    partition: Partition,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partition_keys_are_distinct() {
    let keys: std::collections::HashSet<_> =
      Partition::ALL.iter().map(|p| p.key()).collect();
    assert_eq!(keys.len(), Partition::ALL.len());
  }

  #[test]
  fn snapshot_decode_reports_garbage() {
    let err = decode_snapshot::<Vec<String>>("{not json").unwrap_err();
    assert!(matches!(err, crate::Error::Serialization(_)));
  }
}
