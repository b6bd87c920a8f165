//! Logging setup for CLI commands

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Initialize console logging on stderr, keeping stdout for results.
///
/// `--verbose` selects DEBUG instead of INFO; RUST_LOG overrides both.
pub fn init_cli_logging(verbose: bool) {
  let level = if verbose { Level::DEBUG } else { Level::INFO };
  let env_filter = EnvFilter::builder()
    .with_default_directive(level.into())
    .from_env_lossy();

  tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();
}
