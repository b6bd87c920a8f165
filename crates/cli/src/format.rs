//! Text and JSON rendering of evaluation results.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use segscore_core::{Evaluation, Outcome, TrialScore};
use serde::Serialize;

/// One evaluated submission, as reported by `segscore evaluate`.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionResult {
  pub path: PathBuf,
  #[serde(flatten)]
  pub evaluation: Evaluation,
  /// Per-trial scores, only for valid submissions with `--per-trial`
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub trials: Vec<TrialScore>,
}

impl SubmissionResult {
  pub fn new(path: &Path, outcome: &Outcome, per_trial: bool) -> Self {
    let trials = match outcome {
      Outcome::Valid { score } if per_trial => score.trials.clone(),
      _ => Vec::new(),
    };
    Self {
      path: path.to_path_buf(),
      evaluation: outcome.evaluation(),
      trials,
    }
  }
}

/// Render a result as text: one summary line plus optional per-trial lines.
pub fn format_result(result: &SubmissionResult) -> String {
  let mut output = String::new();
  let _ = writeln!(
    output,
    "{}: {:.6} ({})",
    result.path.display(),
    result.evaluation.score,
    result.evaluation.message
  );
  for trial in &result.trials {
    let _ = writeln!(
      output,
      "  {:<24} {:.6} ({} / {} frames)",
      trial.trial_id, trial.score.error_rate, trial.score.error_frames, trial.score.reference_frames
    );
  }
  output
}
