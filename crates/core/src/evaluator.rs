//! Submission evaluation: load, validate every trial, then score.
//!
//! Every submission resolves to exactly one [`Outcome`]. Nothing here panics or
//! propagates an error to the caller; failures become `Invalid` or `Error`
//! outcomes carrying the diagnostic message.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::frames::FrameSequence;
use crate::reference::Reference;
use crate::scoring::{AggregateScore, ScoreError, score_all};
use crate::table::{IntervalRecord, read_table};
use crate::trials::{LoadedTrials, load_trials};
use crate::validation::{ValidatedTrial, ValidationError, Validator};

pub const VALID_MESSAGE: &str = "Valid file";
pub const SCORING_FAILED_MESSAGE: &str = "Could not calculate error.";

/// Why a submission was rejected before scoring.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionError {
  #[error("Trials not matching")]
  TrialsNotMatching {
    /// Reference trials absent from the submission
    missing: Vec<String>,
    /// Submitted trials unknown to the reference
    unexpected: Vec<String>,
  },

  #[error(transparent)]
  Invalid(#[from] ValidationError),
}

/// Result of evaluating one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
  Valid { score: AggregateScore },
  Invalid { message: String },
  Error { message: String },
}

impl Outcome {
  pub fn is_valid(&self) -> bool {
    matches!(self, Self::Valid { .. })
  }

  /// Aggregate error rate, NaN unless valid.
  pub fn score(&self) -> f64 {
    match self {
      Self::Valid { score } => score.error_rate,
      Self::Invalid { .. } | Self::Error { .. } => f64::NAN,
    }
  }

  pub fn message(&self) -> &str {
    match self {
      Self::Valid { .. } => VALID_MESSAGE,
      Self::Invalid { message } | Self::Error { message } => message,
    }
  }

  /// Flatten into the `(score, message, is_final)` shape.
  pub fn evaluation(&self) -> Evaluation {
    Evaluation {
      score: self.score(),
      message: self.message().to_string(),
      is_final: true,
    }
  }
}

/// `(score, message, is_final)`: score is NaN for rejected submissions.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
  pub score: f64,
  pub message: String,
  /// Always true: there are no partial or retryable results
  pub is_final: bool,
}

/// Evaluates submissions against a borrowed, immutable reference.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'r> {
  reference: &'r Reference,
  validator: Validator,
}

impl<'r> Evaluator<'r> {
  pub fn new(reference: &'r Reference) -> Self {
    Self {
      reference,
      validator: Validator::from_config(reference.config()),
    }
  }

  pub fn reference(&self) -> &'r Reference {
    self.reference
  }

  /// Evaluate a submission file into the `(score, message, is_final)` shape.
  pub fn evaluate_submission(&self, path: &Path) -> Evaluation {
    self.evaluate_detailed(path).evaluation()
  }

  /// Evaluate a submission file, keeping the per-trial breakdown.
  pub fn evaluate_detailed(&self, path: &Path) -> Outcome {
    debug!("Evaluating submission {}", path.display());
    match read_table(path) {
      Ok(records) => self.evaluate_records(records),
      Err(e) => {
        warn!("Failed to read submission {}: {}", path.display(), e);
        Outcome::Error { message: e.to_string() }
      }
    }
  }

  /// Evaluate already-parsed submission rows.
  pub fn evaluate_records(&self, records: impl IntoIterator<Item = IntervalRecord>) -> Outcome {
    let loaded = load_trials(records);
    let trials = match self.validate_submission(&loaded) {
      Ok(trials) => trials,
      Err(e) => {
        info!("Submission rejected: {}", e);
        return Outcome::Invalid { message: e.to_string() };
      }
    };

    match self.score(&trials) {
      Ok(score) => {
        info!(
          "Submission scored: error rate {:.6} ({} / {} frames)",
          score.error_rate, score.error_frames, score.reference_frames
        );
        Outcome::Valid { score }
      }
      Err(e) => {
        warn!("Scoring failed: {}", e);
        Outcome::Error {
          message: SCORING_FAILED_MESSAGE.to_string(),
        }
      }
    }
  }

  /// Check trial ids against the reference, then validate each trial in id order.
  pub fn validate_submission(&self, loaded: &LoadedTrials) -> Result<Vec<ValidatedTrial>, SubmissionError> {
    if !loaded.trial_ids().eq(self.reference.trial_ids()) {
      let submitted: BTreeSet<&str> = loaded.trial_ids().collect();
      let expected: BTreeSet<&str> = self.reference.trial_ids().collect();
      return Err(SubmissionError::TrialsNotMatching {
        missing: expected.difference(&submitted).map(|s| s.to_string()).collect(),
        unexpected: submitted.difference(&expected).map(|s| s.to_string()).collect(),
      });
    }

    let mut validated = Vec::with_capacity(loaded.len());
    for (trial_id, sequence) in &loaded.trials {
      let known_labels = self.reference.known_labels(trial_id);
      validated.push(self.validator.validate(trial_id, sequence, known_labels)?);
    }
    Ok(validated)
  }

  /// Quantize validated hypothesis trials and score them against the reference frames.
  pub fn score(&self, trials: &[ValidatedTrial]) -> Result<AggregateScore, ScoreError> {
    let hypotheses: Vec<(&str, FrameSequence)> = trials.iter().map(|t| (t.trial_id(), t.frames())).collect();

    let mut pairs = Vec::with_capacity(hypotheses.len());
    for (trial_id, frames) in &hypotheses {
      let reference = self
        .reference
        .frames(trial_id)
        .ok_or_else(|| ScoreError::MissingReference(trial_id.to_string()))?;
      pairs.push((*trial_id, reference, frames.as_slice()));
    }

    score_all(pairs)
  }
}
