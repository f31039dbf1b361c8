//! One field observation of an individual.
//!
//! Encounters have no identity in the store of their own; they only exist
//! nested inside exactly one [`Individual`](crate::individual::Individual).

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  Result, ValidationErrors,
  coerce::{EnumKeyword, UuidKeyword},
  document::{Document, Schema, StoreDocument},
  field::{Boolean, Date, Field, Geo, Keyword},
  geo::GeoPoint,
  sex::Sex,
};

// ─── Schema ──────────────────────────────────────────────────────────────────

pub mod fields {
  use super::*;

  pub static ID: Field<UuidKeyword> = Field::required("id", UuidKeyword);
  pub static POINT: Field<Geo> = Field::required("point", Geo);
  pub static ANIMATE_STATUS: Field<Keyword> =
    Field::optional("animate_status", Keyword);
  pub static SEX: Field<EnumKeyword<Sex>> =
    Field::optional("sex", EnumKeyword::new());
  pub static SUBMITTER_ID: Field<Keyword> =
    Field::required("submitter_id", Keyword);
  pub static DATE_OCCURRED: Field<Date> = Field::optional("date_occurred", Date);
  pub static GENUS: Field<Keyword> = Field::optional("genus", Keyword);
  pub static SPECIES: Field<Keyword> = Field::optional("species", Keyword);
  pub static HAS_ANNOTATION: Field<Boolean> =
    Field::required("has_annotation", Boolean);
}

pub static SCHEMA: Schema = Schema::new("encounter", &[
  &fields::ID,
  &fields::POINT,
  &fields::ANIMATE_STATUS,
  &fields::SEX,
  &fields::SUBMITTER_ID,
  &fields::DATE_OCCURRED,
  &fields::GENUS,
  &fields::SPECIES,
  &fields::HAS_ANNOTATION,
]);

// ─── Encounter ───────────────────────────────────────────────────────────────

/// A single sighting. Required fields are `Option`s so that an incomplete
/// encounter can still be built and then rejected by [`Document::validate`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Encounter {
  pub id:             Option<Uuid>,
  pub point:          Option<GeoPoint>,
  /// Free-form status keyword, e.g. "alive" or "dead".
  pub animate_status: Option<String>,
  pub sex:            Option<Sex>,
  pub submitter_id:   Option<String>,
  pub date_occurred:  Option<DateTime<Utc>>,
  pub genus:          Option<String>,
  pub species:        Option<String>,
  pub has_annotation: Option<bool>,
}

impl Encounter {
  /// An encounter with every required field set and everything else empty.
  pub fn new(
    id: Uuid,
    point: GeoPoint,
    submitter_id: impl Into<String>,
    has_annotation: bool,
  ) -> Self {
    Self {
      id: Some(id),
      point: Some(point),
      submitter_id: Some(submitter_id.into()),
      has_annotation: Some(has_annotation),
      ..Self::default()
    }
  }
}

impl Document for Encounter {
  fn schema() -> &'static Schema { &SCHEMA }

  fn validate(&self) -> Result<(), ValidationErrors> {
    use fields::*;

    let mut errors = ValidationErrors::default();
    errors.check(ID.validate(self.id.as_ref()));
    errors.check(POINT.validate(self.point.as_ref()));
    errors.check(ANIMATE_STATUS.validate(self.animate_status.as_ref()));
    errors.check(SEX.validate(self.sex.as_ref()));
    errors.check(SUBMITTER_ID.validate(self.submitter_id.as_ref()));
    errors.check(DATE_OCCURRED.validate(self.date_occurred.as_ref()));
    errors.check(GENUS.validate(self.genus.as_ref()));
    errors.check(SPECIES.validate(self.species.as_ref()));
    errors.check(HAS_ANNOTATION.validate(self.has_annotation.as_ref()));
    errors.into_result()
  }

  fn encode(&self) -> Result<StoreDocument> {
    use fields::*;

    let mut doc = StoreDocument::new();
    ID.write(&mut doc, self.id.as_ref())?;
    POINT.write(&mut doc, self.point.as_ref())?;
    ANIMATE_STATUS.write(&mut doc, self.animate_status.as_ref())?;
    SEX.write(&mut doc, self.sex.as_ref())?;
    SUBMITTER_ID.write(&mut doc, self.submitter_id.as_ref())?;
    DATE_OCCURRED.write(&mut doc, self.date_occurred.as_ref())?;
    GENUS.write(&mut doc, self.genus.as_ref())?;
    SPECIES.write(&mut doc, self.species.as_ref())?;
    HAS_ANNOTATION.write(&mut doc, self.has_annotation.as_ref())?;
    Ok(doc)
  }

  fn decode(doc: &StoreDocument) -> Result<Self> {
    use fields::*;

    Ok(Self {
      id:             ID.read(doc)?,
      point:          POINT.read(doc)?,
      animate_status: ANIMATE_STATUS.read(doc)?,
      sex:            SEX.read(doc)?,
      submitter_id:   SUBMITTER_ID.read(doc)?,
      date_occurred:  DATE_OCCURRED.read(doc)?,
      genus:          GENUS.read(doc)?,
      species:        SPECIES.read(doc)?,
      has_annotation: HAS_ANNOTATION.read(doc)?,
    })
  }
}
