//! Frame-wise error rate between reference and hypothesis frames.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vocabulary::LabelId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
  #[error("Reference has no frames")]
  EmptyReference,

  #[error("No reference frames for trial {0}")]
  MissingReference(String),
}

/// Errors over one reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameScore {
  /// `error_frames / reference_frames`
  pub error_rate: f64,
  /// Mismatched frames plus frames either side has beyond the other's end
  pub error_frames: usize,
  pub reference_frames: usize,
}

/// Score of a single trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialScore {
  pub trial_id: String,
  #[serde(flatten)]
  pub score: FrameScore,
}

/// Length-weighted score over all trials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateScore {
  /// `error_frames / reference_frames`, summed over trials
  pub error_rate: f64,
  pub error_frames: usize,
  pub reference_frames: usize,
  /// Per-trial breakdown, in scoring order
  pub trials: Vec<TrialScore>,
}

/// Compare two frame sequences.
///
/// Frames past the end of the shorter sequence all count as errors,
/// whichever side overhangs. An empty reference cannot be scored.
pub fn score_framewise(reference: &[LabelId], hypothesis: &[LabelId]) -> Result<FrameScore, ScoreError> {
  let reference_frames = reference.len();
  if reference_frames == 0 {
    return Err(ScoreError::EmptyReference);
  }

  let hyp_overhang = hypothesis.len().saturating_sub(reference_frames);
  let ref_overhang = reference_frames.saturating_sub(hypothesis.len());
  let common = reference_frames.min(hypothesis.len());

  let mismatches = reference[..common]
    .iter()
    .zip(&hypothesis[..common])
    .filter(|(r, h)| r != h)
    .count();

  let error_frames = mismatches + hyp_overhang + ref_overhang;
  Ok(FrameScore {
    error_rate: error_frames as f64 / reference_frames as f64,
    error_frames,
    reference_frames,
  })
}

/// Score every `(trial_id, reference, hypothesis)` triple and pool the frame counts.
pub fn score_all<'a>(
  pairs: impl IntoIterator<Item = (&'a str, &'a [LabelId], &'a [LabelId])>,
) -> Result<AggregateScore, ScoreError> {
  let mut trials = Vec::new();
  let mut error_frames = 0;
  let mut reference_frames = 0;

  for (trial_id, reference, hypothesis) in pairs {
    let score = score_framewise(reference, hypothesis)?;
    error_frames += score.error_frames;
    reference_frames += score.reference_frames;
    trials.push(TrialScore {
      trial_id: trial_id.to_string(),
      score,
    });
  }

  if reference_frames == 0 {
    return Err(ScoreError::EmptyReference);
  }

  Ok(AggregateScore {
    error_rate: error_frames as f64 / reference_frames as f64,
    error_frames,
    reference_frames,
    trials,
  })
}
