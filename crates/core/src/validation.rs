//! Structural and semantic checks over one trial's interval sequence.
//!
//! Checks run in a fixed order and stop at the first violation:
//!
//! 1. no missing cells
//! 2. numeric bounds, textual labels
//! 3. first interval starts at exactly 0
//! 4. last interval ends within the duration cap
//! 5. every interval has `end > start`
//! 6. adjacent intervals meet at millisecond precision
//! 7. every label is known to the trial's namespace
//!
//! A sequence that passes comes back as a [`ValidatedTrial`] with typed bounds
//! and interned labels, so nothing downstream re-parses cells.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::config::EvalConfig;
use crate::frames::{FrameSequence, quantize};
use crate::trials::RawInterval;
use crate::vocabulary::{KnownLabels, LabelId};

/// A typed, labeled segment `[start, end)` in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
  pub start: f64,
  pub end: f64,
  pub label: LabelId,
}

/// A trial that passed every check.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTrial {
  trial_id: String,
  intervals: Vec<Interval>,
}

impl ValidatedTrial {
  pub fn trial_id(&self) -> &str {
    &self.trial_id
  }

  pub fn intervals(&self) -> &[Interval] {
    &self.intervals
  }

  /// End of the last interval, in seconds.
  pub fn end(&self) -> f64 {
    self.intervals.last().map_or(0.0, |interval| interval.end)
  }

  /// Expand into 1 ms frames.
  pub fn frames(&self) -> FrameSequence {
    quantize(&self.intervals)
  }
}

/// Why a trial was rejected. `Display` is the user-facing diagnostic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
  #[error("Some values are missing or are NaN in trial {trial}")]
  MissingValues { trial: String },

  #[error("Incorrect data types")]
  IncorrectTypes { trial: String },

  #[error("Trial {trial}: Must start at 0")]
  NonZeroStart { trial: String },

  #[error("Trial {trial}: End too far beyond the end of the data")]
  EndOutOfRange { trial: String, end: f64 },

  #[error("Start of line must be smaller than end (line {line} of trial {trial})")]
  InvertedInterval { trial: String, line: usize },

  #[error("End of one line must be equal to start of next line (lines {line} and {next} in trial {trial})")]
  Discontinuity { trial: String, line: usize, next: usize },

  #[error("Trial {trial} contains unknown labels")]
  UnknownLabels { trial: String, labels: Vec<String> },
}

impl ValidationError {
  /// Trial the violation was found in.
  pub fn trial(&self) -> &str {
    match self {
      Self::MissingValues { trial }
      | Self::IncorrectTypes { trial }
      | Self::NonZeroStart { trial }
      | Self::EndOutOfRange { trial, .. }
      | Self::InvertedInterval { trial, .. }
      | Self::Discontinuity { trial, .. }
      | Self::UnknownLabels { trial, .. } => trial,
    }
  }
}

/// Runs the ordered checks with a configurable duration cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Validator {
  max_end: f64,
}

impl Default for Validator {
  fn default() -> Self {
    Self::new(EvalConfig::DEFAULT_MAX_END)
  }
}

impl Validator {
  pub fn new(max_end: f64) -> Self {
    Self { max_end }
  }

  pub fn from_config(config: &EvalConfig) -> Self {
    Self::new(config.max_end)
  }

  pub fn max_end(&self) -> f64 {
    self.max_end
  }

  /// Validate one trial against the labels its namespace allows.
  pub fn validate(
    &self,
    trial_id: &str,
    sequence: &[RawInterval],
    known_labels: &KnownLabels,
  ) -> Result<ValidatedTrial, ValidationError> {
    let trial = || trial_id.to_string();

    let mut cells = Vec::with_capacity(sequence.len());
    for row in sequence {
      match (&row.start, &row.end, &row.label) {
        (Some(start), Some(end), Some(label)) => cells.push((start, end, label)),
        _ => return Err(ValidationError::MissingValues { trial: trial() }),
      }
    }

    let mut rows = Vec::with_capacity(cells.len());
    for (start, end, label) in cells {
      match (start.parse::<f64>(), end.parse::<f64>()) {
        (Ok(start), Ok(end)) if !is_numeric(label) => rows.push((start, end, label.as_str())),
        _ => return Err(ValidationError::IncorrectTypes { trial: trial() }),
      }
    }

    match rows.first() {
      Some(&(start, _, _)) if start == 0.0 => {}
      _ => return Err(ValidationError::NonZeroStart { trial: trial() }),
    }

    if let Some(&(_, end, _)) = rows.last()
      && end > self.max_end
    {
      return Err(ValidationError::EndOutOfRange { trial: trial(), end });
    }

    if let Some(i) = rows.iter().position(|&(start, end, _)| end <= start) {
      return Err(ValidationError::InvertedInterval {
        trial: trial(),
        line: i + 1,
      });
    }

    if let Some(i) = rows
      .windows(2)
      .position(|pair| round_millis(pair[0].1) != round_millis(pair[1].0))
    {
      return Err(ValidationError::Discontinuity {
        trial: trial(),
        line: i + 1,
        next: i + 2,
      });
    }

    let mut intervals = Vec::with_capacity(rows.len());
    let mut unknown = BTreeSet::new();
    for (start, end, label) in rows {
      match known_labels.resolve(label) {
        Some(label) => intervals.push(Interval { start, end, label }),
        None => {
          unknown.insert(label.to_string());
        }
      }
    }
    if !unknown.is_empty() {
      return Err(ValidationError::UnknownLabels {
        trial: trial(),
        labels: unknown.into_iter().collect(),
      });
    }

    Ok(ValidatedTrial {
      trial_id: trial(),
      intervals,
    })
  }

  /// Flag-and-message form of [`Validator::validate`]: `(true, "OK")` on success.
  pub fn check_format(&self, trial_id: &str, sequence: &[RawInterval], known_labels: &KnownLabels) -> (bool, String) {
    match self.validate(trial_id, sequence, known_labels) {
      Ok(_) => (true, "OK".to_string()),
      Err(e) => (false, e.to_string()),
    }
  }
}

/// Validate with the default 300 s duration cap.
pub fn validate(
  trial_id: &str,
  sequence: &[RawInterval],
  known_labels: &KnownLabels,
) -> Result<ValidatedTrial, ValidationError> {
  Validator::default().validate(trial_id, sequence, known_labels)
}

/// [`Validator::check_format`] with the default duration cap.
pub fn check_format(trial_id: &str, sequence: &[RawInterval], known_labels: &KnownLabels) -> (bool, String) {
  Validator::default().check_format(trial_id, sequence, known_labels)
}

/// Round to 3 decimals: scale, round half to even, unscale.
pub(crate) fn round_millis(seconds: f64) -> f64 {
  (seconds * 1000.0).round_ties_even() / 1000.0
}

/// Labels are typed per trial: a numeric label fails the type check for its
/// trial even when other trials carry text labels.
fn is_numeric(text: &str) -> bool {
  text.parse::<f64>().is_ok()
}
