//! Grouping of table rows into per-trial interval sequences.

use std::collections::{BTreeMap, BTreeSet};

use crate::table::IntervalRecord;

/// An unvalidated `(start, end, label)` row of one trial.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawInterval {
  pub start: Option<String>,
  pub end: Option<String>,
  pub label: Option<String>,
}

impl From<(f64, f64, &str)> for RawInterval {
  fn from((start, end, label): (f64, f64, &str)) -> Self {
    Self {
      start: Some(start.to_string()),
      end: Some(end.to_string()),
      label: Some(label.to_string()),
    }
  }
}

/// Rows of one trial, in file order.
pub type TrialSequence = Vec<RawInterval>;

/// A table split into trials.
#[derive(Debug, Clone, Default)]
pub struct LoadedTrials {
  /// Every distinct non-missing label, across all trials
  pub labels: BTreeSet<String>,
  /// Trial sequences keyed (and iterated) by trial id
  pub trials: BTreeMap<String, TrialSequence>,
}

impl LoadedTrials {
  /// Distinct trial ids in sorted order.
  pub fn trial_ids(&self) -> impl Iterator<Item = &str> {
    self.trials.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.trials.len()
  }

  pub fn is_empty(&self) -> bool {
    self.trials.is_empty()
  }
}

/// Split records into trials, keeping row order within each trial.
pub fn load_trials(records: impl IntoIterator<Item = IntervalRecord>) -> LoadedTrials {
  let mut loaded = LoadedTrials::default();
  for IntervalRecord {
    trial_id,
    start,
    end,
    label,
  } in records
  {
    if let Some(label) = &label
      && !loaded.labels.contains(label)
    {
      loaded.labels.insert(label.clone());
    }
    loaded
      .trials
      .entry(trial_id)
      .or_default()
      .push(RawInterval { start, end, label });
  }
  loaded
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::table::parse_table;

  #[test]
  fn test_groups_by_trial_in_row_order() {
    let records = parse_table("b_ra,0,1,ra_x\na_la,0,2,la_x\nb_ra,1,3,ra_y\na_la,2,4,la_y\n");
    let loaded = load_trials(records);

    assert_eq!(loaded.trial_ids().collect::<Vec<_>>(), vec!["a_la", "b_ra"]);
    let b = &loaded.trials["b_ra"];
    assert_eq!(b.len(), 2);
    assert_eq!(b[0].label.as_deref(), Some("ra_x"));
    assert_eq!(b[1].start.as_deref(), Some("1"));
  }

  #[test]
  fn test_collects_distinct_labels() {
    let records = parse_table("t_la,0,1,la_x\nt_la,1,2,la_x\nt_ra,0,1,ra_y\nt_ra,1,2,\n");
    let loaded = load_trials(records);

    assert_eq!(loaded.labels.len(), 2);
    assert!(loaded.labels.contains("la_x"));
    assert!(loaded.labels.contains("ra_y"));
    assert_eq!(loaded.trials["t_ra"].len(), 2);
  }

  #[test]
  fn test_empty_table() {
    let loaded = load_trials(Vec::new());
    assert!(loaded.is_empty());
    assert!(loaded.labels.is_empty());
  }

  #[test]
  fn test_raw_interval_from_values() {
    let interval = RawInterval::from((0.0, 1.5, "la_x"));
    assert_eq!(interval.start.as_deref(), Some("0"));
    assert_eq!(interval.end.as_deref(), Some("1.5"));
  }
}
