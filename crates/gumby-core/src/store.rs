//! The `DocumentStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `gumby-store-sqlite`).
//! Backends only move opaque [`StoreDocument`]s in and out of named indices;
//! all validation and coercion happens in the provided `save`/`load` methods
//! through the [`Document`](crate::Document) schema.

use std::future::Future;

use crate::{
  Error,
  document::{IndexedDocument, StoreDocument},
};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a document store backend.
///
/// Writes replace the whole document; there is no partial update.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes.
pub trait DocumentStore: Send + Sync {
  type Error: std::error::Error + From<Error> + Send + Sync + 'static;

  // ── Raw documents ─────────────────────────────────────────────────────

  /// Insert or replace the document stored under `id` in `index`.
  fn put(
    &self,
    index: &'static str,
    id: String,
    doc: StoreDocument,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Fetch a document. Returns `None` if not found.
  fn get(
    &self,
    index: &'static str,
    id: String,
  ) -> impl Future<Output = Result<Option<StoreDocument>, Self::Error>> + Send + '_;

  /// Remove a document. Returns `false` if there was nothing to remove.
  fn delete(
    &self,
    index: &'static str,
    id: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Every document in `index`, ordered by id.
  fn list(
    &self,
    index: &'static str,
  ) -> impl Future<Output = Result<Vec<StoreDocument>, Self::Error>> + Send + '_;

  // ── Typed documents ───────────────────────────────────────────────────

  /// Validate, encode and store `doc` under its own index and id.
  fn save<'a, D: IndexedDocument>(
    &'a self,
    doc: &'a D,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a {
    async move {
      doc.validate().map_err(Error::Validation)?;
      let id = doc.document_id()?;
      let body = doc.encode()?;
      self.put(D::INDEX, id, body).await
    }
  }

  /// Fetch and decode the document with identifier `id`.
  fn load<D: IndexedDocument>(
    &self,
    id: uuid::Uuid,
  ) -> impl Future<Output = Result<Option<D>, Self::Error>> + Send + '_ {
    async move {
      match self.get(D::INDEX, id.hyphenated().to_string()).await? {
        Some(body) => Ok(Some(D::decode(&body)?)),
        None => Ok(None),
      }
    }
  }

  /// Fetch and decode every document of type `D`.
  fn load_all<D: IndexedDocument>(
    &self,
  ) -> impl Future<Output = Result<Vec<D>, Self::Error>> + Send + '_ {
    async move {
      let bodies = self.list(D::INDEX).await?;
      let docs = bodies
        .iter()
        .map(D::decode)
        .collect::<Result<Vec<_>, Error>>()?;
      Ok(docs)
    }
  }
}
