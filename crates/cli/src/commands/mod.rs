//! CLI command implementations

mod check;
mod evaluate;
mod inspect;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use segscore_core::{EvalConfig, Reference};
use tracing::debug;

pub use check::cmd_check;
pub use evaluate::cmd_evaluate;
pub use inspect::cmd_inspect;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "SEGSCORE_CONFIG";

/// Config file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "segscore.toml";

/// Resolve the config: explicit path, then `$SEGSCORE_CONFIG`, then `./segscore.toml`, then defaults.
///
/// An explicitly named file must load; the working-directory file is optional.
pub fn load_config(explicit: Option<&Path>, reference: Option<PathBuf>) -> Result<EvalConfig> {
  let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
  let mut config = match explicit.or(env_path.as_deref()) {
    Some(path) => EvalConfig::load(path).with_context(|| format!("Failed to load config {}", path.display()))?,
    None => EvalConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE)),
  };

  if let Some(reference) = reference {
    config.reference_path = reference;
  }

  debug!("Using reference {}", config.reference_path.display());
  Ok(config)
}

/// Build the reference once for the lifetime of the command.
fn load_reference(config: &EvalConfig) -> Result<Reference> {
  Reference::load(config).with_context(|| format!("Failed to load reference {}", config.reference_path.display()))
}
