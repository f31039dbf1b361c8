//! Biological sex classification of an individual or an encounter.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, enumeration::Enumeration};

/// Recorded sex.
///
/// `Unknown` means "explicitly classified as unknown"; a field that has not
/// been classified at all holds `None` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sex {
  Unknown,
  NonBinary,
  Female,
  Male,
}

impl Enumeration for Sex {
  const MEMBERS: &'static [Self] =
    &[Self::Unknown, Self::NonBinary, Self::Female, Self::Male];

  fn as_str(self) -> &'static str {
    match self {
      Self::Unknown => "unknown",
      Self::NonBinary => "non-binary",
      Self::Female => "female",
      Self::Male => "male",
    }
  }
}

impl fmt::Display for Sex {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Sex {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> { Self::from_canonical(s) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn canonical_strings_round_trip() {
    for &sex in Sex::MEMBERS {
      assert_eq!(Sex::from_canonical(sex.as_str()).unwrap(), sex);
    }
  }

  #[test]
  fn members_are_in_declaration_order() {
    assert_eq!(Sex::allowed(), vec!["unknown", "non-binary", "female", "male"]);
  }

  #[test]
  fn lookup_is_case_sensitive() {
    assert!(Sex::is_member("female"));
    assert!(!Sex::is_member("Female"));
    assert!(!Sex::is_member("non_binary"));
    assert!(matches!(
      "MALE".parse::<Sex>(),
      Err(Error::UnknownEnumMember { given }) if given == "MALE"
    ));
  }

  #[test]
  fn serde_matches_canonical_strings() {
    for &sex in Sex::MEMBERS {
      let json = serde_json::to_value(sex).unwrap();
      assert_eq!(json, serde_json::Value::String(sex.as_str().to_owned()));
    }
  }
}
