//! Error type for `hub-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] hub_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("counter too large to store: {0}")]
  CounterOverflow(u64),

  #[error("negative counter in database: {0}")]
  NegativeCounter(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
