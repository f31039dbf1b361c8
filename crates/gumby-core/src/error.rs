//! Error types for `gumby-core`.

use std::fmt;

use thiserror::Error;

use crate::path::FieldPath;

#[derive(Debug, Error)]
pub enum Error {
  #[error("missing required field: {field}")]
  MissingRequiredField { field: FieldPath },

  #[error(
    "{field}: {given:?} is not one of the valid options: {}",
    .allowed.join(", ")
  )]
  InvalidEnumValue {
    field:   FieldPath,
    given:   String,
    allowed: Vec<&'static str>,
  },

  #[error("unknown enumeration member: {given:?}")]
  UnknownEnumMember { given: String },

  #[error("malformed identifier: {given:?}")]
  MalformedIdentifier { given: String },

  #[error("invalid date/time: {given:?}")]
  InvalidDate { given: String },

  #[error("malformed geographic point: {given:?}")]
  MalformedPoint { given: String },

  #[error("geographic point out of range: lat {lat}, lon {lon}")]
  PointOutOfRange { lat: f64, lon: f64 },

  #[error("expected {expected}, found {found}")]
  UnexpectedType {
    expected: &'static str,
    found:    &'static str,
  },

  /// A field-level failure tagged with the location it came from.
  #[error("{field}: {source}")]
  Field {
    field:  FieldPath,
    source: Box<Error>,
  },

  #[error(transparent)]
  Validation(#[from] ValidationErrors),
}

impl Error {
  /// Tag this error with the location of the value that produced it.
  ///
  /// Variants that already name a field have `path` prepended to it; any
  /// other variant is wrapped in [`Error::Field`].
  pub fn at(self, path: &FieldPath) -> Self {
    match self {
      Self::MissingRequiredField { field } => Self::MissingRequiredField {
        field: field.within(path),
      },
      Self::InvalidEnumValue {
        field,
        given,
        allowed,
      } => Self::InvalidEnumValue {
        field: field.within(path),
        given,
        allowed,
      },
      Self::Field { field, source } => Self::Field {
        field: field.within(path),
        source,
      },
      Self::Validation(errors) => Self::Validation(errors.within(path)),
      other => Self::Field {
        field:  path.clone(),
        source: Box::new(other),
      },
    }
  }

  /// The location this error is tagged with, if any.
  pub fn field(&self) -> Option<&FieldPath> {
    match self {
      Self::MissingRequiredField { field }
      | Self::InvalidEnumValue { field, .. }
      | Self::Field { field, .. } => Some(field),
      _ => None,
    }
  }

  /// The innermost error, looking through [`Error::Field`] wrappers.
  pub fn root_cause(&self) -> &Error {
    match self {
      Self::Field { source, .. } => source.root_cause(),
      other => other,
    }
  }
}

/// Every violation found while validating one document.
#[derive(Debug, Default)]
pub struct ValidationErrors {
  pub violations: Vec<Error>,
}

impl ValidationErrors {
  pub fn is_empty(&self) -> bool { self.violations.is_empty() }

  pub fn len(&self) -> usize { self.violations.len() }

  pub fn push(&mut self, violation: Error) {
    match violation {
      Error::Validation(nested) => self.violations.extend(nested.violations),
      other => self.violations.push(other),
    }
  }

  /// Record the outcome of one field check.
  pub fn check(&mut self, outcome: Result<()>) {
    if let Err(e) = outcome {
      self.push(e);
    }
  }

  fn within(self, path: &FieldPath) -> Self {
    Self {
      violations: self.violations.into_iter().map(|e| e.at(path)).collect(),
    }
  }

  /// `Ok(())` when nothing was recorded.
  pub fn into_result(self) -> Result<(), ValidationErrors> {
    if self.is_empty() { Ok(()) } else { Err(self) }
  }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} validation error(s)", self.violations.len())?;
    for (i, violation) in self.violations.iter().enumerate() {
      let sep = if i == 0 { ": " } else { "; " };
      write!(f, "{sep}{violation}")?;
    }
    Ok(())
  }
}

impl std::error::Error for ValidationErrors {}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn at_prefixes_named_variants() {
    let err = Error::MissingRequiredField {
      field: FieldPath::from("submitter_id"),
    };
    let tagged = err.at(&FieldPath::from("encounters").index(1));
    assert_eq!(
      tagged.field().map(ToString::to_string).as_deref(),
      Some("encounters[1].submitter_id"),
    );
  }

  #[test]
  fn at_wraps_untagged_variants() {
    let err = Error::MalformedIdentifier {
      given: "nope".into(),
    }
    .at(&FieldPath::from("id"));
    assert!(matches!(err, Error::Field { .. }));
    assert!(matches!(
      err.root_cause(),
      Error::MalformedIdentifier { given } if given == "nope"
    ));
    assert_eq!(err.to_string(), "id: malformed identifier: \"nope\"");
  }

  #[test]
  fn nested_aggregates_are_flattened() {
    let mut inner = ValidationErrors::default();
    inner.push(Error::MissingRequiredField {
      field: FieldPath::from("point"),
    });
    let mut outer = ValidationErrors::default();
    outer.push(Error::Validation(inner).at(&FieldPath::from("encounters").index(0)));
    assert_eq!(outer.len(), 1);
    assert_eq!(
      outer.to_string(),
      "1 validation error(s): missing required field: encounters[0].point",
    );
  }
}
