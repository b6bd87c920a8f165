//! Immutable ground truth shared by every evaluation.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::{EvalConfig, Namespace};
use crate::frames::FrameSequence;
use crate::table::{IntervalRecord, read_table};
use crate::trials::load_trials;
use crate::validation::{ValidatedTrial, Validator};
use crate::vocabulary::{KnownLabels, LabelId, Vocabulary};
use crate::{EvalError, Result};

#[derive(Debug)]
struct ReferenceTrial {
  trial: ValidatedTrial,
  frames: FrameSequence,
}

/// Reference trials, their label vocabulary and precomputed frames.
///
/// Built once and never mutated; share it by reference between evaluations.
#[derive(Debug)]
pub struct Reference {
  config: EvalConfig,
  vocabulary: Vocabulary,
  left: KnownLabels,
  right: KnownLabels,
  trials: BTreeMap<String, ReferenceTrial>,
}

impl Reference {
  /// Load the reference table named by `config.reference_path`.
  pub fn load(config: &EvalConfig) -> Result<Self> {
    Self::load_from(&config.reference_path, config)
  }

  /// Load a reference table from an explicit path.
  pub fn load_from(path: &Path, config: &EvalConfig) -> Result<Self> {
    info!("Loading reference from {}", path.display());
    let records = read_table(path)?;
    Self::from_records(records, config)
  }

  /// Build the reference from parsed rows.
  ///
  /// Reference trials go through the same checks as submissions, against the
  /// full vocabulary, so every trial is guaranteed at least one frame.
  pub fn from_records(records: impl IntoIterator<Item = IntervalRecord>, config: &EvalConfig) -> Result<Self> {
    let loaded = load_trials(records);
    if loaded.is_empty() {
      return Err(EvalError::Reference("reference contains no trials".into()));
    }

    let vocabulary: Vocabulary = loaded.labels.iter().collect();
    let all = vocabulary.all();
    let left = vocabulary.with_prefix(&config.left_prefix);
    let right = vocabulary.with_prefix(&config.right_prefix);

    let validator = Validator::from_config(config);
    let mut trials = BTreeMap::new();
    for (trial_id, sequence) in &loaded.trials {
      let trial = validator
        .validate(trial_id, sequence, &all)
        .map_err(|e| EvalError::Reference(format!("trial {trial_id}: {e}")))?;
      let frames = trial.frames();
      debug!("Reference trial {}: {} intervals, {} frames", trial_id, sequence.len(), frames.len());
      trials.insert(trial_id.clone(), ReferenceTrial { trial, frames });
    }

    if left.is_empty() || right.is_empty() {
      warn!(
        "Reference namespace partition is empty (left: {}, right: {})",
        left.len(),
        right.len()
      );
    }

    let reference = Self {
      config: config.clone(),
      vocabulary,
      left,
      right,
      trials,
    };
    info!(
      "Reference ready: {} trials, {} labels, {} frames",
      reference.len(),
      reference.vocabulary.len(),
      reference.total_frames()
    );
    Ok(reference)
  }

  pub fn config(&self) -> &EvalConfig {
    &self.config
  }

  pub fn vocabulary(&self) -> &Vocabulary {
    &self.vocabulary
  }

  /// Trial ids in sorted order.
  pub fn trial_ids(&self) -> impl Iterator<Item = &str> {
    self.trials.keys().map(String::as_str)
  }

  pub fn contains(&self, trial_id: &str) -> bool {
    self.trials.contains_key(trial_id)
  }

  pub fn len(&self) -> usize {
    self.trials.len()
  }

  pub fn is_empty(&self) -> bool {
    self.trials.is_empty()
  }

  /// Labels partition for a namespace.
  pub fn partition(&self, namespace: Namespace) -> &KnownLabels {
    match namespace {
      Namespace::Left => &self.left,
      Namespace::Right => &self.right,
    }
  }

  /// Labels a submitted trial may use, chosen by its id suffix.
  pub fn known_labels(&self, trial_id: &str) -> &KnownLabels {
    self.partition(self.config.namespace_of(trial_id))
  }

  pub fn trial(&self, trial_id: &str) -> Option<&ValidatedTrial> {
    self.trials.get(trial_id).map(|t| &t.trial)
  }

  pub fn frames(&self, trial_id: &str) -> Option<&[LabelId]> {
    self.trials.get(trial_id).map(|t| t.frames.as_slice())
  }

  /// Frames across all reference trials.
  pub fn total_frames(&self) -> usize {
    self.trials.values().map(|t| t.frames.len()).sum()
  }
}
