//! Score submissions against the reference

use std::path::PathBuf;

use anyhow::Result;
use rayon::prelude::*;
use segscore_core::{EvalConfig, Evaluator};
use tracing::info;

use super::load_reference;
use crate::format::{SubmissionResult, format_result};

/// Evaluate every submission against one shared reference, in parallel.
pub fn cmd_evaluate(config: &EvalConfig, submissions: &[PathBuf], json: bool, per_trial: bool) -> Result<()> {
  let reference = load_reference(config)?;
  let evaluator = Evaluator::new(&reference);

  info!("Evaluating {} submission(s)", submissions.len());
  let results: Vec<SubmissionResult> = submissions
    .par_iter()
    .map(|path| SubmissionResult::new(path, &evaluator.evaluate_detailed(path), per_trial))
    .collect();

  if json {
    println!("{}", serde_json::to_string_pretty(&results)?);
    return Ok(());
  }

  for result in &results {
    print!("{}", format_result(result));
  }

  Ok(())
}
