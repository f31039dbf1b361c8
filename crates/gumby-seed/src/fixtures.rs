//! Random but valid individuals and encounters for seeding an index.

use chrono::{DateTime, Duration, Utc};
use gumby_core::{Encounter, Enumeration, GeoPoint, Individual, Sex};
use rand::{Rng, seq::IndexedRandom};
use uuid::Uuid;

pub const SUBMITTERS: &[&str] = &[
  "julia", "alice", "henry", "josh", "fen", "margo", "kady", "penny", "eliot",
  "quentin",
];

pub const ALIASES: &[&str] =
  &["destiny", "amanda", "brook", "alex", "zoe", "naomi", "rick"];

/// Genus and its species.
pub const BINOMIAL_NOMENCLATURES: &[(&str, &[&str])] = &[(
  "balaenoptera",
  &["acutorostrata", "borealis", "brydei", "edeni", "musculus", "physalus"],
)];

/// Sightings fall between one day and two years before "now".
const MAX_AGE_DAYS: i64 = 365 * 2;

/// Latest `date_occurred` among `encounters`, or `None` if there are none.
pub fn last_sighting(encounters: &[Encounter]) -> Option<DateTime<Utc>> {
  encounters.iter().filter_map(|e| e.date_occurred).max()
}

/// Produces fixtures from a caller-supplied random source.
pub struct Fixtures<R> {
  rng: R,
  now: DateTime<Utc>,
}

impl<R: Rng> Fixtures<R> {
  pub fn new(rng: R) -> Self { Self::with_now(rng, Utc::now()) }

  /// Use a fixed reference time instead of the wall clock.
  pub fn with_now(rng: R, now: DateTime<Utc>) -> Self { Self { rng, now } }

  fn pick(&mut self, options: &[&'static str]) -> &'static str {
    options.choose(&mut self.rng).copied().unwrap_or_default()
  }

  /// Any member, or no value at all, with equal odds.
  fn sex(&mut self) -> Option<Sex> {
    let i = self.rng.random_range(0..=Sex::MEMBERS.len());
    Sex::MEMBERS.get(i).copied()
  }

  fn date_occurred(&mut self) -> DateTime<Utc> {
    self.now - Duration::days(self.rng.random_range(1..=MAX_AGE_DAYS))
  }

  /// A point with microdegree precision.
  fn point(&mut self) -> GeoPoint {
    let lat = self.rng.random_range(-90_000_000..=90_000_000);
    let lon = self.rng.random_range(-180_000_000..=180_000_000);
    GeoPoint {
      lat: f64::from(lat) / 1e6,
      lon: f64::from(lon) / 1e6,
    }
  }

  pub fn scientific_name(&mut self) -> (&'static str, &'static str) {
    match BINOMIAL_NOMENCLATURES.choose(&mut self.rng) {
      Some((genus, species)) => (*genus, self.pick(species)),
      None => ("", ""),
    }
  }

  /// A random encounter of the given taxon.
  pub fn encounter(&mut self, genus: &str, species: &str) -> Encounter {
    let point = self.point();
    let submitter = self.pick(SUBMITTERS);
    let has_annotation = self.rng.random_bool(0.5);
    Encounter {
      sex: self.sex(),
      date_occurred: Some(self.date_occurred()),
      genus: Some(genus.to_owned()),
      species: Some(species.to_owned()),
      ..Encounter::new(Uuid::new_v4(), point, submitter, has_annotation)
    }
  }

  /// A random individual owning `encounters`, with `last_sighting` derived
  /// from them.
  pub fn individual(
    &mut self,
    (genus, species): (&str, &str),
    encounters: Vec<Encounter>,
  ) -> Individual {
    Individual {
      name: Some(format!("TI-{:05}", self.rng.random_range(0..=99_999))),
      alias: Some(self.pick(ALIASES).to_owned()),
      genus: Some(genus.to_owned()),
      species: Some(species.to_owned()),
      last_sighting: last_sighting(&encounters),
      sex: self.sex(),
      encounters,
      ..Individual::new(Uuid::new_v4())
    }
  }

  /// A random individual with between 1 and `max_encounters` encounters.
  pub fn individual_with_encounters(&mut self, max_encounters: usize) -> Individual {
    let taxon = self.scientific_name();
    let count = self.rng.random_range(1..=max_encounters.max(1));
    let encounters = (0..count)
      .map(|_| self.encounter(taxon.0, taxon.1))
      .collect();
    self.individual(taxon, encounters)
  }
}
