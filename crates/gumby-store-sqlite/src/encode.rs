//! Conversions between store documents and the text stored in SQLite
//! columns.
//!
//! Bodies are stored as compact JSON; timestamps as RFC 3339 strings.

use chrono::{DateTime, Utc};
use gumby_core::StoreDocument;
use serde_json::Value;

use crate::{Error, Result};

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn encode_body(doc: &StoreDocument) -> Result<String> {
  Ok(serde_json::to_string(doc)?)
}

/// Raw strings read directly from a `documents` row.
pub struct RawDocument {
  pub index_name: String,
  pub doc_id:     String,
  pub body:       String,
}

impl RawDocument {
  pub fn into_document(self) -> Result<StoreDocument> {
    match serde_json::from_str(&self.body)? {
      Value::Object(doc) => Ok(doc),
      _ => Err(Error::NotAnObject {
        index: self.index_name,
        id:    self.doc_id,
      }),
    }
  }
}
