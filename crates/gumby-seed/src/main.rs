//! gumby-seed binary.
//!
//! Reads `seed.toml` (or the path specified with `--config`), opens the
//! SQLite document store, and fills the `individuals` index with random
//! individuals and their encounters.
//!
//! # Index mapping
//!
//! To print the search-engine mapping of the `individuals` index:
//!
//! ```
//! cargo run -p gumby-seed -- --print-mapping
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use gumby_core::{Document, Individual};
use gumby_seed::{config::SeedConfig, fixtures::Fixtures, seed};
use gumby_store_sqlite::SqliteStore;
use rand::{SeedableRng, rngs::StdRng};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Seed the Gumby individuals index")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "seed.toml")]
  config: PathBuf,

  /// Number of individuals to generate; overrides the config file.
  #[arg(short = 'n', long)]
  individuals: Option<usize>,

  /// Seed for the random generator, for reproducible fixtures.
  #[arg(long)]
  seed: Option<u64>,

  /// Print the index mapping as JSON and exit.
  #[arg(long)]
  print_mapping: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Helper mode: print the mapping and exit.
  if cli.print_mapping {
    let mapping = serde_json::to_string_pretty(&Individual::mapping())?;
    println!("{mapping}");
    return Ok(());
  }

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("GUMBY"))
    .build()
    .context("failed to read config file")?;

  let mut seed_cfg: SeedConfig = settings
    .try_deserialize()
    .context("failed to deserialise SeedConfig")?;
  if let Some(n) = cli.individuals {
    seed_cfg.individuals = n;
  }

  let store_path = seed_cfg.resolved_store_path();
  if let Some(parent) = store_path.parent() {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {parent:?}"))?;
  }

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let rng = match cli.seed {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_os_rng(),
  };
  let mut fixtures = Fixtures::new(rng);

  tracing::info!(
    store = %store_path.display(),
    individuals = seed_cfg.individuals,
    max_encounters = seed_cfg.max_encounters,
    "seeding"
  );

  let report = seed(
    &store,
    &mut fixtures,
    seed_cfg.individuals,
    seed_cfg.max_encounters,
  )
  .await
  .context("failed to seed individuals")?;

  println!(
    "indexed {} individuals with {} encounters ({} skipped)",
    report.individuals, report.encounters, report.skipped
  );

  Ok(())
}
