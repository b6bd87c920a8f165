//! segscore CLI - validate and score temporal label submissions

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod format;
mod logging;

use commands::{cmd_check, cmd_evaluate, cmd_inspect, load_config};
use logging::init_cli_logging;

#[derive(Parser)]
#[command(name = "segscore")]
#[command(about = "Validate and score temporal label submissions against a reference")]
#[command(version)]
#[command(after_help = "\
CONFIG:
  --config PATH, then $SEGSCORE_CONFIG, then ./segscore.toml, then defaults

EXAMPLES:
  segscore inspect --reference reference_labels.csv
  segscore check submission.csv
  segscore evaluate team_a.csv team_b.csv --per-trial")]
struct Cli {
  /// Enable verbose logging
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Config file (TOML)
  #[arg(long, global = true, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Reference labels file, overrides the configured path
  #[arg(long, global = true, value_name = "FILE")]
  reference: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Validate and score submissions
  Evaluate {
    /// Submission files
    #[arg(required = true)]
    submissions: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Include per-trial scores
    #[arg(long)]
    per_trial: bool,
  },

  /// Validate a submission without scoring it
  Check {
    /// Submission file
    submission: PathBuf,

    /// Output as JSON
    #[arg(long)]
    json: bool,
  },

  /// Summarize the reference trials and label vocabulary
  Inspect {
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_cli_logging(cli.verbose);

  let config = load_config(cli.config.as_deref(), cli.reference)?;

  match cli.command {
    Commands::Evaluate {
      submissions,
      json,
      per_trial,
    } => cmd_evaluate(&config, &submissions, json, per_trial),
    Commands::Check { submission, json } => cmd_check(&config, &submission, json),
    Commands::Inspect { json } => cmd_inspect(&config, json),
  }
}
