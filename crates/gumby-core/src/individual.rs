//! A tracked animal and every encounter recorded for it.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  Error, Result, ValidationErrors,
  coerce::{EnumKeyword, UuidKeyword},
  document::{Document, IndexedDocument, Nested, Schema, StoreDocument},
  encounter::Encounter,
  field::{Date, Field, Keyword},
  sex::Sex,
};

// ─── Schema ──────────────────────────────────────────────────────────────────

pub mod fields {
  use super::*;

  pub static ID: Field<UuidKeyword> = Field::required("id", UuidKeyword);
  pub static NAME: Field<Keyword> = Field::optional("name", Keyword);
  pub static ALIAS: Field<Keyword> = Field::optional("alias", Keyword);
  pub static GENUS: Field<Keyword> = Field::optional("genus", Keyword);
  pub static SPECIES: Field<Keyword> = Field::optional("species", Keyword);
  pub static LAST_SIGHTING: Field<Date> = Field::optional("last_sighting", Date);
  pub static SEX: Field<EnumKeyword<Sex>> =
    Field::optional("sex", EnumKeyword::new());
  pub static ENCOUNTERS: Field<Nested<Encounter>> =
    Field::optional("encounters", Nested::new());
}

pub static SCHEMA: Schema = Schema::new("individual", &[
  &fields::ID,
  &fields::NAME,
  &fields::ALIAS,
  &fields::GENUS,
  &fields::SPECIES,
  &fields::LAST_SIGHTING,
  &fields::SEX,
  &fields::ENCOUNTERS,
]);

// ─── Individual ──────────────────────────────────────────────────────────────

/// A tracked individual.
///
/// `last_sighting` is stored as given. Whoever builds or changes an
/// individual is responsible for keeping it equal to the latest
/// `date_occurred` among `encounters` (or `None` when there are none).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Individual {
  pub id:            Option<Uuid>,
  /// Display name, e.g. `TI-00042`.
  pub name:          Option<String>,
  pub alias:         Option<String>,
  pub genus:         Option<String>,
  pub species:       Option<String>,
  pub last_sighting: Option<DateTime<Utc>>,
  pub sex:           Option<Sex>,
  pub encounters:    Vec<Encounter>,
}

impl Individual {
  pub fn new(id: Uuid) -> Self {
    Self {
      id: Some(id),
      ..Self::default()
    }
  }
}

impl Document for Individual {
  fn schema() -> &'static Schema { &SCHEMA }

  fn validate(&self) -> Result<(), ValidationErrors> {
    use fields::*;

    let mut errors = ValidationErrors::default();
    errors.check(ID.validate(self.id.as_ref()));
    errors.check(NAME.validate(self.name.as_ref()));
    errors.check(ALIAS.validate(self.alias.as_ref()));
    errors.check(GENUS.validate(self.genus.as_ref()));
    errors.check(SPECIES.validate(self.species.as_ref()));
    errors.check(LAST_SIGHTING.validate(self.last_sighting.as_ref()));
    errors.check(SEX.validate(self.sex.as_ref()));
    errors.check(ENCOUNTERS.validate(Some(&self.encounters)));
    errors.into_result()
  }

  fn encode(&self) -> Result<StoreDocument> {
    use fields::*;

    let mut doc = StoreDocument::new();
    ID.write(&mut doc, self.id.as_ref())?;
    NAME.write(&mut doc, self.name.as_ref())?;
    ALIAS.write(&mut doc, self.alias.as_ref())?;
    GENUS.write(&mut doc, self.genus.as_ref())?;
    SPECIES.write(&mut doc, self.species.as_ref())?;
    LAST_SIGHTING.write(&mut doc, self.last_sighting.as_ref())?;
    SEX.write(&mut doc, self.sex.as_ref())?;
    ENCOUNTERS.write(&mut doc, Some(&self.encounters))?;
    Ok(doc)
  }

  fn decode(doc: &StoreDocument) -> Result<Self> {
    use fields::*;

    Ok(Self {
      id:            ID.read(doc)?,
      name:          NAME.read(doc)?,
      alias:         ALIAS.read(doc)?,
      genus:         GENUS.read(doc)?,
      species:       SPECIES.read(doc)?,
      last_sighting: LAST_SIGHTING.read(doc)?,
      sex:           SEX.read(doc)?,
      encounters:    ENCOUNTERS.read(doc)?.unwrap_or_default(),
    })
  }
}

impl IndexedDocument for Individual {
  const INDEX: &'static str = "individuals";

  fn document_id(&self) -> Result<String> {
    self
      .id
      .map(|id| id.hyphenated().to_string())
      .ok_or_else(|| Error::MissingRequiredField {
        field: fields::ID.name().into(),
      })
  }
}
