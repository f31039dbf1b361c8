//! Seeder configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Settings read from the TOML config file and `GUMBY_*` environment
/// variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
  /// Path of the SQLite store; a leading `~/` is expanded.
  pub store_path:     PathBuf,
  /// Number of individuals to generate.
  pub individuals:    usize,
  /// Upper bound of encounters per individual (at least one is always made).
  pub max_encounters: usize,
}

impl Default for SeedConfig {
  fn default() -> Self {
    Self {
      store_path:     PathBuf::from("~/.local/share/gumby/gumby.db"),
      individuals:    50,
      max_encounters: 20,
    }
  }
}

impl SeedConfig {
  /// `store_path` with a leading `~` expanded to the user's home directory.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults() {
    let cfg = SeedConfig::default();
    assert_eq!(cfg.individuals, 50);
    assert_eq!(cfg.max_encounters, 20);
  }

  #[test]
  fn absolute_paths_are_untouched() {
    let cfg = SeedConfig {
      store_path: PathBuf::from("/tmp/gumby.db"),
      ..SeedConfig::default()
    };
    assert_eq!(cfg.resolved_store_path(), PathBuf::from("/tmp/gumby.db"));
  }

  #[test]
  fn partial_config_keeps_defaults() {
    let settings = config::Config::builder()
      .set_override("individuals", 5)
      .unwrap()
      .build()
      .unwrap();
    let cfg: SeedConfig = settings.try_deserialize().unwrap();
    assert_eq!(cfg.individuals, 5);
    assert_eq!(cfg.max_encounters, 20);
  }
}
