//! Error type for `gumby-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("schema error: {0}")]
  Schema(#[from] gumby_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// A stored body that is valid JSON but not a document object.
  #[error("document {index}/{id} is not a JSON object")]
  NotAnObject { index: String, id: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
