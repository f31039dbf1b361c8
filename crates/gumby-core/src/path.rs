//! Field paths used to pinpoint a value inside a (possibly nested) document.

use std::fmt;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
  Name(&'static str),
  Index(usize),
}

/// Location of a field inside a document, rendered as
/// `encounters[2].submitter_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<Segment>);

impl FieldPath {
  pub fn root() -> Self { Self::default() }

  pub fn segments(&self) -> &[Segment] { &self.0 }

  /// A copy of this path extended by one field name.
  pub fn field(&self, name: &'static str) -> Self {
    self.child(Segment::Name(name))
  }

  /// A copy of this path extended by one element index.
  pub fn index(&self, index: usize) -> Self { self.child(Segment::Index(index)) }

  fn child(&self, segment: Segment) -> Self {
    let mut segments = self.0.clone();
    segments.push(segment);
    Self(segments)
  }

  /// Re-root this path underneath `parent`.
  pub fn within(self, parent: &FieldPath) -> Self {
    let mut segments = parent.0.clone();
    segments.extend(self.0);
    Self(segments)
  }
}

impl From<&'static str> for FieldPath {
  fn from(name: &'static str) -> Self { Self(vec![Segment::Name(name)]) }
}

impl fmt::Display for FieldPath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.0.is_empty() {
      return f.write_str("<root>");
    }
    for (i, segment) in self.0.iter().enumerate() {
      match segment {
        Segment::Name(name) if i == 0 => f.write_str(name)?,
        Segment::Name(name) => write!(f, ".{name}")?,
        Segment::Index(index) => write!(f, "[{index}]")?,
      }
    }
    Ok(())
  }
}
