//! Label interning and namespace partitions.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Interned label handle, only meaningful together with the [`Vocabulary`] that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LabelId(u32);

impl LabelId {
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

/// Every label seen in the reference, each interned once.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
  names: Vec<String>,
  ids: HashMap<String, LabelId>,
}

impl Vocabulary {
  pub fn new() -> Self {
    Self::default()
  }

  /// Intern a label, returning the existing id if it is already known.
  pub fn intern(&mut self, label: &str) -> LabelId {
    if let Some(&id) = self.ids.get(label) {
      return id;
    }
    let id = LabelId(self.names.len() as u32);
    self.names.push(label.to_string());
    self.ids.insert(label.to_string(), id);
    id
  }

  pub fn get(&self, label: &str) -> Option<LabelId> {
    self.ids.get(label).copied()
  }

  pub fn name(&self, id: LabelId) -> Option<&str> {
    self.names.get(id.index()).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.names.len()
  }

  pub fn is_empty(&self) -> bool {
    self.names.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (LabelId, &str)> {
    self.names.iter().enumerate().map(|(i, name)| (LabelId(i as u32), name.as_str()))
  }

  /// The whole vocabulary as a known-label set.
  pub fn all(&self) -> KnownLabels {
    KnownLabels {
      ids: self.ids.clone(),
    }
  }

  /// The partition of labels starting with `prefix`.
  pub fn with_prefix(&self, prefix: &str) -> KnownLabels {
    KnownLabels {
      ids: self
        .ids
        .iter()
        .filter(|(name, _)| name.starts_with(prefix))
        .map(|(name, &id)| (name.clone(), id))
        .collect(),
    }
  }
}

impl<S: AsRef<str>> FromIterator<S> for Vocabulary {
  fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
    let mut vocabulary = Vocabulary::new();
    for label in iter {
      vocabulary.intern(label.as_ref());
    }
    vocabulary
  }
}

/// Labels a trial is allowed to use, resolved to vocabulary ids.
#[derive(Debug, Clone, Default)]
pub struct KnownLabels {
  ids: HashMap<String, LabelId>,
}

impl KnownLabels {
  pub fn resolve(&self, label: &str) -> Option<LabelId> {
    self.ids.get(label).copied()
  }

  pub fn contains(&self, label: &str) -> bool {
    self.ids.contains_key(label)
  }

  pub fn len(&self) -> usize {
    self.ids.len()
  }

  pub fn is_empty(&self) -> bool {
    self.ids.is_empty()
  }

  /// Label names in sorted order.
  pub fn names(&self) -> BTreeSet<&str> {
    self.ids.keys().map(String::as_str).collect()
  }
}
