//! [`SqliteStore`], the SQLite implementation of [`DocumentStore`].

use std::path::Path;

use chrono::Utc;
use gumby_core::{StoreDocument, store::DocumentStore};
use rusqlite::OptionalExtension as _;

use crate::{
  Result,
  encode::{RawDocument, encode_body, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Gumby document store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
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

  /// Number of documents stored in `index`.
  pub async fn count(&self, index: &'static str) -> Result<usize> {
    let count: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM documents WHERE index_name = ?1",
          rusqlite::params![index],
          |row| row.get(0),
        )?)
      })
      .await?;
    Ok(usize::try_from(count).unwrap_or_default())
  }
}

// ─── DocumentStore impl ──────────────────────────────────────────────────────

impl DocumentStore for SqliteStore {
  type Error = crate::Error;

  async fn put(
    &self,
    index: &'static str,
    id: String,
    doc: StoreDocument,
  ) -> Result<()> {
    let body = encode_body(&doc)?;
    let at_str = encode_dt(Utc::now());
    tracing::debug!(index, id = %id, bytes = body.len(), "indexing document");

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO documents (index_name, doc_id, body, indexed_at)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT (index_name, doc_id)
           DO UPDATE SET body = excluded.body, indexed_at = excluded.indexed_at",
          rusqlite::params![index, id, body, at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn get(
    &self,
    index: &'static str,
    id: String,
  ) -> Result<Option<StoreDocument>> {
    tracing::debug!(index, id = %id, "fetching document");

    let raw: Option<RawDocument> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT index_name, doc_id, body FROM documents
               WHERE index_name = ?1 AND doc_id = ?2",
              rusqlite::params![index, id],
              |row| {
                Ok(RawDocument {
                  index_name: row.get(0)?,
                  doc_id:     row.get(1)?,
                  body:       row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawDocument::into_document).transpose()
  }

  async fn delete(&self, index: &'static str, id: String) -> Result<bool> {
    tracing::debug!(index, id = %id, "deleting document");

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM documents WHERE index_name = ?1 AND doc_id = ?2",
          rusqlite::params![index, id],
        )?)
      })
      .await?;
    Ok(removed > 0)
  }

  async fn list(&self, index: &'static str) -> Result<Vec<StoreDocument>> {
    let raws: Vec<RawDocument> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT index_name, doc_id, body FROM documents
           WHERE index_name = ?1 ORDER BY doc_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![index], |row| {
            Ok(RawDocument {
              index_name: row.get(0)?,
              doc_id:     row.get(1)?,
              body:       row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    tracing::debug!(index, count = raws.len(), "listed documents");
    raws.into_iter().map(RawDocument::into_document).collect()
  }
}
