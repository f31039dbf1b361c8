//! Schema fields: a storage kind plus a name and a required flag.
//!
//! A [`FieldKind`] knows how one non-null value converts between its domain
//! type and the store-native JSON form. [`Field`] wraps a kind with the
//! field's name and required-ness and owns all null handling, so a kind never
//! sees a null.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::{Value, json};

use crate::{
  Error, Result, document::StoreDocument, geo::GeoPoint, path::FieldPath,
};

// ─── Kind capability ─────────────────────────────────────────────────────────

/// Conversion and validation for one storage kind.
pub trait FieldKind: Send + Sync {
  type Value: Clone + PartialEq + std::fmt::Debug;

  /// The index mapping entry for fields of this kind.
  fn mapping(&self) -> Value;

  /// Project a domain value to its store-native form.
  fn encode(&self, value: &Self::Value) -> Result<Value>;

  /// Parse a non-null store value.
  fn decode(&self, raw: &Value) -> Result<Self::Value>;

  /// Constraints on an in-memory value beyond what its type guarantees.
  fn check(&self, _value: &Self::Value) -> Result<()> { Ok(()) }

  /// Check a non-null store value without keeping the decoded result.
  fn validate_raw(&self, raw: &Value) -> Result<()> {
    self.decode(raw).and_then(|v| self.check(&v))
  }

  /// Turn a failure of this kind into a violation of the field at `field`.
  fn violation(&self, field: &FieldPath, error: Error) -> Error {
    error.at(field)
  }
}

// ─── Field ───────────────────────────────────────────────────────────────────

/// A named field of a document schema.
#[derive(Debug, Clone, Copy)]
pub struct Field<K> {
  name:     &'static str,
  required: bool,
  kind:     K,
}

impl<K> Field<K> {
  pub const fn required(name: &'static str, kind: K) -> Self {
    Self {
      name,
      required: true,
      kind,
    }
  }

  pub const fn optional(name: &'static str, kind: K) -> Self {
    Self {
      name,
      required: false,
      kind,
    }
  }

  pub fn name(&self) -> &'static str { self.name }

  pub fn is_required(&self) -> bool { self.required }

  pub fn kind(&self) -> &K { &self.kind }

  fn path(&self) -> FieldPath { FieldPath::from(self.name) }

  fn missing(&self) -> Error {
    Error::MissingRequiredField { field: self.path() }
  }
}

impl<K: FieldKind> Field<K> {
  /// Validate an in-memory value.
  pub fn validate(&self, value: Option<&K::Value>) -> Result<()> {
    match value {
      None if self.required => Err(self.missing()),
      None => Ok(()),
      Some(v) => self
        .kind
        .check(v)
        .map_err(|e| self.kind.violation(&self.path(), e)),
    }
  }

  /// Validate a store-native value; `None` (absent key) counts as null.
  pub fn validate_raw(&self, raw: Option<&Value>) -> Result<()> {
    match non_null(raw) {
      None if self.required => Err(self.missing()),
      None => Ok(()),
      Some(v) => self
        .kind
        .validate_raw(v)
        .map_err(|e| self.kind.violation(&self.path(), e)),
    }
  }

  /// Encode a value; null stays null unless the field is required.
  pub fn encode(&self, value: Option<&K::Value>) -> Result<Value> {
    match value {
      None if self.required => Err(self.missing()),
      None => Ok(Value::Null),
      Some(v) => self.kind.encode(v),
    }
  }

  /// Decode a store-native value; null (or an absent key) yields `None`.
  pub fn decode(&self, raw: Option<&Value>) -> Result<Option<K::Value>> {
    non_null(raw).map(|v| self.kind.decode(v)).transpose()
  }

  /// Encode `value` into `doc` under this field's name.
  pub fn write(&self, doc: &mut StoreDocument, value: Option<&K::Value>) -> Result<()> {
    let encoded = match value {
      None if self.required => return Err(self.missing()),
      None => Value::Null,
      Some(v) => self.kind.encode(v).map_err(|e| e.at(&self.path()))?,
    };
    doc.insert(self.name.to_owned(), encoded);
    Ok(())
  }

  /// Decode this field out of `doc`, tagging any failure with its name.
  pub fn read(&self, doc: &StoreDocument) -> Result<Option<K::Value>> {
    self
      .decode(doc.get(self.name))
      .map_err(|e| e.at(&self.path()))
  }
}

fn non_null(raw: Option<&Value>) -> Option<&Value> {
  raw.filter(|v| !v.is_null())
}

// ─── Untyped view ────────────────────────────────────────────────────────────

/// The parts of a field that do not depend on its domain type; lets a
/// schema hold its fields as one ordered list.
pub trait RawField: Send + Sync {
  fn name(&self) -> &'static str;
  fn is_required(&self) -> bool;
  fn mapping(&self) -> Value;
  fn validate_raw(&self, raw: Option<&Value>) -> Result<()>;
}

impl<K: FieldKind> RawField for Field<K> {
  fn name(&self) -> &'static str { self.name }

  fn is_required(&self) -> bool { self.required }

  fn mapping(&self) -> Value { self.kind.mapping() }

  fn validate_raw(&self, raw: Option<&Value>) -> Result<()> {
    Field::validate_raw(self, raw)
  }
}

/// JSON type name used in [`Error::UnexpectedType`].
pub(crate) fn type_name(raw: &Value) -> &'static str {
  match raw {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

pub(crate) fn expect_str<'a>(raw: &'a Value, expected: &'static str) -> Result<&'a str> {
  raw.as_str().ok_or(Error::UnexpectedType {
    expected,
    found: type_name(raw),
  })
}

// ─── Plain kinds ─────────────────────────────────────────────────────────────

/// An exact-match string.
#[derive(Debug, Clone, Copy, Default)]
pub struct Keyword;

impl FieldKind for Keyword {
  type Value = String;

  fn mapping(&self) -> Value { json!({ "type": "keyword" }) }

  fn encode(&self, value: &String) -> Result<Value> {
    Ok(Value::String(value.clone()))
  }

  fn decode(&self, raw: &Value) -> Result<String> {
    expect_str(raw, "string").map(str::to_owned)
  }
}

/// A native boolean.
#[derive(Debug, Clone, Copy, Default)]
pub struct Boolean;

impl FieldKind for Boolean {
  type Value = bool;

  fn mapping(&self) -> Value { json!({ "type": "boolean" }) }

  fn encode(&self, value: &bool) -> Result<Value> { Ok(Value::Bool(*value)) }

  fn decode(&self, raw: &Value) -> Result<bool> {
    raw.as_bool().ok_or(Error::UnexpectedType {
      expected: "boolean",
      found:    type_name(raw),
    })
  }
}

/// A UTC timestamp, stored as RFC 3339 text.
///
/// Decoding also accepts what the search engine's default date format does:
/// naive ISO-8601 date-times (taken as UTC), bare dates, and epoch
/// milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Date;

impl FieldKind for Date {
  type Value = DateTime<Utc>;

  fn mapping(&self) -> Value { json!({ "type": "date" }) }

  fn encode(&self, value: &DateTime<Utc>) -> Result<Value> {
    Ok(Value::String(value.to_rfc3339_opts(SecondsFormat::AutoSi, true)))
  }

  fn decode(&self, raw: &Value) -> Result<DateTime<Utc>> {
    match raw {
      Value::String(s) => parse_date(s),
      Value::Number(n) => n
        .as_i64()
        .and_then(DateTime::from_timestamp_millis)
        .ok_or_else(|| Error::InvalidDate { given: n.to_string() }),
      other => Err(Error::UnexpectedType {
        expected: "date string or epoch milliseconds",
        found:    type_name(other),
      }),
    }
  }
}

fn parse_date(s: &str) -> Result<DateTime<Utc>> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Ok(dt.with_timezone(&Utc));
  }
  if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
    return Ok(naive.and_utc());
  }
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .ok()
    .and_then(|d| d.and_hms_opt(0, 0, 0))
    .map(|naive| naive.and_utc())
    .ok_or_else(|| Error::InvalidDate { given: s.to_owned() })
}

/// A latitude/longitude pair, stored as `{"lat": .., "lon": ..}`.
///
/// Decoding also accepts a `[lon, lat]` array and a `"lat,lon"` string.
#[derive(Debug, Clone, Copy, Default)]
pub struct Geo;

impl FieldKind for Geo {
  type Value = GeoPoint;

  fn mapping(&self) -> Value { json!({ "type": "geo_point" }) }

  fn encode(&self, value: &GeoPoint) -> Result<Value> {
    value.check()?;
    Ok(json!({ "lat": value.lat, "lon": value.lon }))
  }

  fn decode(&self, raw: &Value) -> Result<GeoPoint> {
    let (lat, lon) = match raw {
      Value::Object(map) => {
        let coord = |key: &str| map.get(key).and_then(Value::as_f64);
        coord("lat")
          .zip(coord("lon"))
          .ok_or_else(|| Error::MalformedPoint { given: raw.to_string() })?
      }
      Value::Array(items) => match items.as_slice() {
        [lon, lat] => lat
          .as_f64()
          .zip(lon.as_f64())
          .ok_or_else(|| Error::MalformedPoint { given: raw.to_string() })?,
        _ => return Err(Error::MalformedPoint { given: raw.to_string() }),
      },
      Value::String(s) => s
        .split_once(',')
        .and_then(|(lat, lon)| {
          Some((lat.trim().parse::<f64>().ok()?, lon.trim().parse::<f64>().ok()?))
        })
        .ok_or_else(|| Error::MalformedPoint { given: s.clone() })?,
      other => {
        return Err(Error::UnexpectedType {
          expected: "geo point",
          found:    type_name(other),
        });
      }
    };
    GeoPoint::new(lat, lon)
  }

  fn check(&self, value: &GeoPoint) -> Result<()> { value.check() }
}
