//! Document schemas and the store-native document representation.
//!
//! A schema is an ordered list of [`Field`](crate::field::Field)s. A
//! [`Document`] type pairs a schema with the typed struct it describes and
//! converts between the two. Nested collections of sub-documents are a field
//! kind of their own, [`Nested`].

use std::marker::PhantomData;

use serde_json::{Map, Value, json};

use crate::{
  Error, Result, ValidationErrors,
  field::{FieldKind, RawField, type_name},
  path::FieldPath,
};

/// A document as the store sees it: field name to store-native value.
pub type StoreDocument = Map<String, Value>;

// ─── Schema ──────────────────────────────────────────────────────────────────

/// An ordered set of named fields.
pub struct Schema {
  name:   &'static str,
  fields: &'static [&'static dyn RawField],
}

impl Schema {
  pub const fn new(
    name: &'static str,
    fields: &'static [&'static dyn RawField],
  ) -> Self {
    Self { name, fields }
  }

  pub fn name(&self) -> &'static str { self.name }

  pub fn fields(&self) -> impl Iterator<Item = &'static dyn RawField> + '_ {
    self.fields.iter().copied()
  }

  pub fn field_names(&self) -> Vec<&'static str> {
    self.fields().map(|f| f.name()).collect()
  }

  /// The `properties` object of the index mapping, in field order.
  pub fn properties(&self) -> Map<String, Value> {
    self
      .fields()
      .map(|f| (f.name().to_owned(), f.mapping()))
      .collect()
  }

  /// Check every field of a store document, collecting all violations.
  /// Keys the schema does not declare are ignored.
  pub fn validate_document(
    &self,
    doc: &StoreDocument,
  ) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    for field in self.fields() {
      errors.check(field.validate_raw(doc.get(field.name())));
    }
    errors.into_result()
  }
}

impl std::fmt::Debug for Schema {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Schema")
      .field("name", &self.name)
      .field("fields", &self.field_names())
      .finish()
  }
}

// ─── Document ────────────────────────────────────────────────────────────────

/// A typed record with a fixed schema.
pub trait Document:
  Sized + Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static
{
  fn schema() -> &'static Schema;

  /// Validate every field, reporting all violations at once.
  fn validate(&self) -> Result<(), ValidationErrors>;

  /// Convert to the store-native form. Fails on the first required field
  /// holding null or the first value that cannot be represented.
  fn encode(&self) -> Result<StoreDocument>;

  /// Convert from the store-native form. Fails on the first field that
  /// cannot be decoded; the error names that field.
  fn decode(doc: &StoreDocument) -> Result<Self>;

  /// Validate a store document without decoding it.
  fn validate_document(doc: &StoreDocument) -> Result<(), ValidationErrors> {
    Self::schema().validate_document(doc)
  }

  /// The index mapping for this document type.
  fn mapping() -> Value { json!({ "properties": Self::schema().properties() }) }
}

/// A root document persisted under a fixed index.
pub trait IndexedDocument: Document {
  /// Name of the index every document of this type lives in.
  const INDEX: &'static str;

  /// The store key of this document: its identifier in canonical form.
  fn document_id(&self) -> Result<String>;
}

// ─── Nested collections ──────────────────────────────────────────────────────

/// An ordered collection of sub-documents stored inline in the parent.
pub struct Nested<D>(PhantomData<fn() -> D>);

impl<D> Nested<D> {
  pub const fn new() -> Self { Self(PhantomData) }
}

impl<D> Clone for Nested<D> {
  fn clone(&self) -> Self { *self }
}

impl<D> Copy for Nested<D> {}

impl<D> std::fmt::Debug for Nested<D> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "Nested<{}>", std::any::type_name::<D>())
  }
}

fn element(index: usize) -> FieldPath { FieldPath::root().index(index) }

fn elements(raw: &Value) -> Result<&[Value]> {
  raw.as_array().map(Vec::as_slice).ok_or(Error::UnexpectedType {
    expected: "array",
    found:    type_name(raw),
  })
}

fn element_object(raw: &Value) -> Result<&StoreDocument> {
  raw.as_object().ok_or(Error::UnexpectedType {
    expected: "object",
    found:    type_name(raw),
  })
}

impl<D: Document> FieldKind for Nested<D> {
  type Value = Vec<D>;

  fn mapping(&self) -> Value {
    json!({ "type": "nested", "properties": D::schema().properties() })
  }

  fn encode(&self, value: &Vec<D>) -> Result<Value> {
    value
      .iter()
      .enumerate()
      .map(|(i, doc)| {
        doc
          .encode()
          .map(Value::Object)
          .map_err(|e| e.at(&element(i)))
      })
      .collect::<Result<Vec<_>>>()
      .map(Value::Array)
  }

  fn decode(&self, raw: &Value) -> Result<Vec<D>> {
    elements(raw)?
      .iter()
      .enumerate()
      .map(|(i, item)| {
        element_object(item)
          .and_then(D::decode)
          .map_err(|e| e.at(&element(i)))
      })
      .collect()
  }

  fn check(&self, value: &Vec<D>) -> Result<()> {
    let mut errors = ValidationErrors::default();
    for (i, doc) in value.iter().enumerate() {
      if let Err(e) = doc.validate() {
        errors.push(Error::Validation(e).at(&element(i)));
      }
    }
    errors.into_result().map_err(Error::Validation)
  }

  fn validate_raw(&self, raw: &Value) -> Result<()> {
    let mut errors = ValidationErrors::default();
    for (i, item) in elements(raw)?.iter().enumerate() {
      let outcome = element_object(item)
        .and_then(|doc| D::validate_document(doc).map_err(Error::Validation));
      errors.check(outcome.map_err(|e| e.at(&element(i))));
    }
    errors.into_result().map_err(Error::Validation)
  }
}
