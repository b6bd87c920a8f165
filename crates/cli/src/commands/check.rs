//! Validate a submission without scoring

use std::path::Path;

use anyhow::{Context, Result};
use segscore_core::{EvalConfig, Evaluator, SubmissionError, load_trials, read_table};

use super::load_reference;

pub fn cmd_check(config: &EvalConfig, submission: &Path, json: bool) -> Result<()> {
  let reference = load_reference(config)?;
  let evaluator = Evaluator::new(&reference);

  let records = read_table(submission).with_context(|| format!("Failed to read {}", submission.display()))?;
  let loaded = load_trials(records);
  let result = evaluator.validate_submission(&loaded);

  if json {
    let value = match &result {
      Ok(trials) => serde_json::json!({
        "path": submission,
        "valid": true,
        "message": "OK",
        "trials": trials.len(),
      }),
      Err(e) => serde_json::json!({
        "path": submission,
        "valid": false,
        "message": e.to_string(),
      }),
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    return Ok(());
  }

  match result {
    Ok(trials) => println!("{}: OK ({} trials)", submission.display(), trials.len()),
    Err(SubmissionError::TrialsNotMatching { missing, unexpected }) => {
      println!("{}: Trials not matching", submission.display());
      if !missing.is_empty() {
        println!("  Missing:    {}", missing.join(", "));
      }
      if !unexpected.is_empty() {
        println!("  Unexpected: {}", unexpected.join(", "));
      }
    }
    Err(e) => println!("{}: {}", submission.display(), e),
  }

  Ok(())
}
