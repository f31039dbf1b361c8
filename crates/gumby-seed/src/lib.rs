//! Seeding for the Gumby `individuals` index.
//!
//! [`fixtures`] produces random but valid individuals; [`seed`] validates
//! and stores them through any [`DocumentStore`].

pub mod config;
pub mod fixtures;

use gumby_core::{Document, IndexedDocument, Individual, store::DocumentStore};
use rand::Rng;

use crate::fixtures::Fixtures;

/// Outcome of one [`seed`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
  pub individuals: usize,
  pub encounters:  usize,
  pub skipped:     usize,
}

/// Generate `count` individuals with up to `max_encounters` encounters each
/// and save them into `store`.
pub async fn seed<S, R>(
  store: &S,
  fixtures: &mut Fixtures<R>,
  count: usize,
  max_encounters: usize,
) -> Result<SeedReport, S::Error>
where
  S: DocumentStore,
  R: Rng,
{
  let individuals =
    (0..count).map(|_| fixtures.individual_with_encounters(max_encounters));
  save_all(store, individuals).await
}

/// Save every individual into `store`.
///
/// Individuals that fail validation are logged and skipped; store failures
/// abort the run.
pub async fn save_all<S>(
  store: &S,
  individuals: impl IntoIterator<Item = Individual>,
) -> Result<SeedReport, S::Error>
where
  S: DocumentStore,
{
  let mut report = SeedReport::default();

  for (n, individual) in individuals.into_iter().enumerate() {
    if let Err(errors) = individual.validate() {
      tracing::warn!(n, %errors, "skipping invalid individual");
      report.skipped += 1;
      continue;
    }

    let id = individual.document_id()?;
    store.put(Individual::INDEX, id, individual.encode()?).await?;
    report.individuals += 1;
    report.encounters += individual.encounters.len();

    tracing::debug!(
      index = Individual::INDEX,
      n,
      name = individual.name.as_deref().unwrap_or_default(),
      encounters = individual.encounters.len(),
      "saved individual"
    );
  }

  tracing::info!(
    index = Individual::INDEX,
    individuals = report.individuals,
    encounters = report.encounters,
    skipped = report.skipped,
    "seeding finished"
  );
  Ok(report)
}
