//! Coerced keyword fields: typed values persisted as keyword strings.

use std::marker::PhantomData;

use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
  Error, Result,
  enumeration::Enumeration,
  field::{FieldKind, expect_str},
  path::FieldPath,
};

// ─── Enumeration-backed ──────────────────────────────────────────────────────

/// A keyword holding one member of the enumeration `E`, persisted as the
/// member's canonical string.
pub struct EnumKeyword<E>(PhantomData<fn() -> E>);

impl<E> EnumKeyword<E> {
  pub const fn new() -> Self { Self(PhantomData) }
}

impl<E> Clone for EnumKeyword<E> {
  fn clone(&self) -> Self { *self }
}

impl<E> Copy for EnumKeyword<E> {}

impl<E> std::fmt::Debug for EnumKeyword<E> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "EnumKeyword<{}>", std::any::type_name::<E>())
  }
}

impl<E: Enumeration> FieldKind for EnumKeyword<E> {
  type Value = E;

  fn mapping(&self) -> Value { json!({ "type": "keyword" }) }

  fn encode(&self, value: &E) -> Result<Value> {
    Ok(Value::String(value.as_str().to_owned()))
  }

  fn decode(&self, raw: &Value) -> Result<E> {
    E::from_canonical(expect_str(raw, "string")?)
  }

  /// An unknown member is reported together with every allowed value.
  fn violation(&self, field: &FieldPath, error: Error) -> Error {
    match error {
      Error::UnknownEnumMember { given } => Error::InvalidEnumValue {
        field: field.clone(),
        given,
        allowed: E::allowed(),
      },
      other => other.at(field),
    }
  }
}

// ─── Identifier ──────────────────────────────────────────────────────────────

/// A keyword holding a UUID, persisted as lowercase hyphenated text.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidKeyword;

impl UuidKeyword {
  /// Coerce either an identifier or its text into an identifier.
  ///
  /// Already-structured input is returned unchanged.
  pub fn coerce(input: impl IntoIdentifier) -> Result<Uuid> {
    input.into_identifier()
  }
}

impl FieldKind for UuidKeyword {
  type Value = Uuid;

  fn mapping(&self) -> Value { json!({ "type": "keyword" }) }

  fn encode(&self, value: &Uuid) -> Result<Value> {
    Ok(Value::String(value.hyphenated().to_string()))
  }

  fn decode(&self, raw: &Value) -> Result<Uuid> {
    UuidKeyword::coerce(expect_str(raw, "string")?)
  }
}

/// Anything that can become an identifier.
pub trait IntoIdentifier {
  fn into_identifier(self) -> Result<Uuid>;
}

impl IntoIdentifier for Uuid {
  fn into_identifier(self) -> Result<Uuid> { Ok(self) }
}

impl IntoIdentifier for &str {
  fn into_identifier(self) -> Result<Uuid> {
    Uuid::parse_str(self).map_err(|_| Error::MalformedIdentifier {
      given: self.to_owned(),
    })
  }
}

impl IntoIdentifier for &String {
  fn into_identifier(self) -> Result<Uuid> { self.as_str().into_identifier() }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{field::Field, sex::Sex};

  const SEX: Field<EnumKeyword<Sex>> = Field::optional("sex", EnumKeyword::new());
  const REQUIRED_SEX: Field<EnumKeyword<Sex>> =
    Field::required("sex", EnumKeyword::new());
  const ID: Field<UuidKeyword> = Field::required("id", UuidKeyword);

  #[test]
  fn every_member_round_trips() {
    for &sex in Sex::MEMBERS {
      let encoded = SEX.encode(Some(&sex)).unwrap();
      assert_eq!(encoded, Value::String(sex.as_str().to_owned()));
      assert_eq!(SEX.decode(Some(&encoded)).unwrap(), Some(sex));
    }
  }

  #[test]
  fn null_is_not_unknown() {
    assert_eq!(SEX.encode(None).unwrap(), Value::Null);
    assert_eq!(SEX.decode(Some(&Value::Null)).unwrap(), None);
    assert_eq!(
      SEX.decode(Some(&json!("unknown"))).unwrap(),
      Some(Sex::Unknown)
    );
  }

  #[test]
  fn unknown_string_fails_decode() {
    let err = SEX.decode(Some(&json!("martian"))).unwrap_err();
    assert!(matches!(err, Error::UnknownEnumMember { ref given } if given == "martian"));
  }

  #[test]
  fn validate_lists_allowed_values() {
    let err = SEX.validate_raw(Some(&json!("martian"))).unwrap_err();
    match err {
      Error::InvalidEnumValue {
        field,
        given,
        allowed,
      } => {
        assert_eq!(field.to_string(), "sex");
        assert_eq!(given, "martian");
        assert_eq!(allowed, vec!["unknown", "non-binary", "female", "male"]);
      }
      other => panic!("unexpected error: {other:?}"),
    }
    assert!(SEX.validate_raw(Some(&json!("non-binary"))).is_ok());
    assert!(SEX.validate_raw(None).is_ok());
  }

  #[test]
  fn required_enum_null_is_one_missing_violation() {
    assert!(matches!(
      REQUIRED_SEX.validate(None),
      Err(Error::MissingRequiredField { .. })
    ));
    assert!(matches!(
      REQUIRED_SEX.validate_raw(Some(&Value::Null)),
      Err(Error::MissingRequiredField { .. })
    ));
    assert!(SEX.validate(None).is_ok());
  }

  #[test]
  fn identifier_round_trips_canonically() {
    let id = Uuid::new_v4();
    let encoded = ID.encode(Some(&id)).unwrap();
    assert_eq!(encoded, Value::String(id.hyphenated().to_string()));
    assert_eq!(ID.decode(Some(&encoded)).unwrap(), Some(id));
  }

  #[test]
  fn identifier_encodes_lowercase() {
    let id = UuidKeyword::coerce("3F5E1C2A-9B1D-4C3E-8F00-0123456789AB").unwrap();
    assert_eq!(
      UuidKeyword.encode(&id).unwrap(),
      json!("3f5e1c2a-9b1d-4c3e-8f00-0123456789ab")
    );
  }

  #[test]
  fn identifier_coerce_is_idempotent() {
    let id = Uuid::new_v4();
    assert_eq!(UuidKeyword::coerce(id).unwrap(), id);
    let text = id.to_string();
    assert_eq!(UuidKeyword::coerce(&text).unwrap(), id);
  }

  #[test]
  fn malformed_identifier() {
    assert!(matches!(
      ID.decode(Some(&json!("not-a-uuid"))),
      Err(Error::MalformedIdentifier { ref given }) if given == "not-a-uuid"
    ));
    assert_eq!(ID.decode(None).unwrap(), None);
  }

  #[test]
  fn required_identifier_null_fails_encode() {
    assert!(matches!(
      ID.encode(None),
      Err(Error::MissingRequiredField { .. })
    ));
  }
}
