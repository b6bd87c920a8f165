//! Evaluation settings loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! standard benchmark rules: a 300 s duration cap and `la`/`ra` namespaces.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Result;

/// Label namespace a trial belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
  Left,
  Right,
}

/// Settings shared by the reference loader and the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
  /// Reference annotation table, read once at startup
  pub reference_path: PathBuf,

  /// Upper bound for the end of the last interval of a trial (seconds)
  pub max_end: f64,

  /// Trial ids ending with this suffix use the left namespace
  pub left_suffix: String,

  /// Labels starting with this prefix belong to the left namespace
  pub left_prefix: String,

  /// Labels starting with this prefix belong to the right namespace
  pub right_prefix: String,
}

impl EvalConfig {
  pub const DEFAULT_MAX_END: f64 = 300.0;
  pub const DEFAULT_REFERENCE_PATH: &'static str = "reference_labels.csv";

  /// Load settings from a TOML file.
  pub fn load(path: &Path) -> Result<Self> {
    let content = std::fs::read_to_string(path)?;
    let config: EvalConfig = toml::from_str(&content)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
  }

  /// Load settings, falling back to defaults when the file is absent or invalid.
  pub fn load_or_default(path: &Path) -> Self {
    if path.exists()
      && let Ok(config) = Self::load(path)
    {
      return config;
    }
    Self::default()
  }

  /// Namespace selected by the trial id suffix.
  pub fn namespace_of(&self, trial_id: &str) -> Namespace {
    if trial_id.ends_with(&self.left_suffix) {
      Namespace::Left
    } else {
      Namespace::Right
    }
  }

  /// Label prefix that makes up a namespace's vocabulary partition.
  pub fn label_prefix(&self, namespace: Namespace) -> &str {
    match namespace {
      Namespace::Left => &self.left_prefix,
      Namespace::Right => &self.right_prefix,
    }
  }
}

impl Default for EvalConfig {
  fn default() -> Self {
    Self {
      reference_path: PathBuf::from(Self::DEFAULT_REFERENCE_PATH),
      max_end: Self::DEFAULT_MAX_END,
      left_suffix: "la".to_string(),
      left_prefix: "la".to_string(),
      right_prefix: "ra".to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_default_config() {
    let config = EvalConfig::default();
    assert_eq!(config.reference_path, PathBuf::from("reference_labels.csv"));
    assert!((config.max_end - 300.0).abs() < f64::EPSILON);
    assert_eq!(config.left_suffix, "la");
    assert_eq!(config.left_prefix, "la");
    assert_eq!(config.right_prefix, "ra");
  }

  #[test]
  fn test_partial_toml_keeps_defaults() {
    let config: EvalConfig = toml::from_str("max_end = 120.5\n").unwrap();
    assert!((config.max_end - 120.5).abs() < f64::EPSILON);
    assert_eq!(config.left_suffix, "la");
  }

  #[test]
  fn test_namespace_of() {
    let config = EvalConfig::default();
    assert_eq!(config.namespace_of("subject01_la"), Namespace::Left);
    assert_eq!(config.namespace_of("subject01_ra"), Namespace::Right);
    assert_eq!(config.namespace_of("subject01"), Namespace::Right);
    assert_eq!(config.label_prefix(Namespace::Left), "la");
    assert_eq!(config.label_prefix(Namespace::Right), "ra");
  }

  #[test]
  fn test_load_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("segscore.toml");
    std::fs::write(&path, "reference_path = \"ref.csv\"\nleft_suffix = \"L\"\n").unwrap();

    let config = EvalConfig::load(&path).unwrap();
    assert_eq!(config.reference_path, PathBuf::from("ref.csv"));
    assert_eq!(config.namespace_of("trialL"), Namespace::Left);
  }

  #[test]
  fn test_load_invalid_toml() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("segscore.toml");
    std::fs::write(&path, "max_end = \"soon\"\n").unwrap();

    assert!(EvalConfig::load(&path).is_err());
    assert_eq!(EvalConfig::load_or_default(&path), EvalConfig::default());
  }

  #[test]
  fn test_load_or_default_missing() {
    let config = EvalConfig::load_or_default(Path::new("/nonexistent/segscore.toml"));
    assert_eq!(config, EvalConfig::default());
  }
}
