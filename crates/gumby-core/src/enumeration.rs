//! Closed sets of string-valued constants.
//!
//! An enumeration member's canonical string is its only identity: two members
//! are equal iff their strings are equal, and that string is exactly what the
//! store persists.

use std::fmt;

use crate::{Error, Result};

/// A closed, ordered set of textual constants.
///
/// Implementors supply the member table and the canonical projection; the
/// reverse lookup and membership test are derived from those two.
pub trait Enumeration: Copy + Eq + fmt::Debug + Send + Sync + 'static {
  /// Every member, in declaration order.
  const MEMBERS: &'static [Self];

  /// The canonical string persisted for this member.
  fn as_str(self) -> &'static str;

  /// Reverse lookup from the canonical string.
  ///
  /// The match is exact: no case folding, no trimming.
  fn from_canonical(s: &str) -> Result<Self> {
    Self::MEMBERS
      .iter()
      .copied()
      .find(|m| m.as_str() == s)
      .ok_or_else(|| Error::UnknownEnumMember { given: s.to_owned() })
  }

  fn is_member(s: &str) -> bool {
    Self::MEMBERS.iter().any(|m| m.as_str() == s)
  }

  /// Canonical strings of every member, in declaration order.
  fn allowed() -> Vec<&'static str> {
    Self::MEMBERS.iter().map(|m| m.as_str()).collect()
  }
}
