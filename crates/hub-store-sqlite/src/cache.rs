//! [`LocalCache`] over the `snapshots` table.

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use hub_core::cache::{LocalCache, Partition};

use crate::{Error, Result, SqliteStore, encode::encode_dt};

impl LocalCache for SqliteStore {
  type Error = Error;

  async fn load(&self, partition: Partition) -> Result<Option<String>> {
    let key = partition.key();
    let raw = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT value_json FROM snapshots WHERE key = ?1",
              rusqlite::params![key],
              |r| r.get::<_, String>(0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(raw)
  }

  async fn store(&self, partition: Partition, snapshot: String) -> Result<()> {
    let key = partition.key();
    let at  = encode_dt(Utc::now());
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO snapshots (key, value_json, written_at) VALUES (?1, ?2, ?3)
           ON CONFLICT(key) DO UPDATE SET
             value_json = excluded.value_json,
             written_at = excluded.written_at",
          rusqlite::params![key, snapshot, at],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn clear(&self, partition: Partition) -> Result<()> {
    let key = partition.key();
    self
      .conn
      .call(move |conn| {
        conn.execute("DELETE FROM snapshots WHERE key = ?1", rusqlite::params![key])?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
