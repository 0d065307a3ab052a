//! Variable encoder: a process-local bijection between user labels and
//! dense integer indices (spec §4.A).

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Dense index assigned to a variable label, in first-seen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VariableId(pub usize);

impl VariableId {
    /// Access the underlying index.
    #[must_use]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<usize> for VariableId {
    fn from(id: usize) -> Self {
        VariableId(id)
    }
}

/// Bijection between user-supplied labels and dense indices `0..N`.
///
/// Indices are assigned in insertion order and are never reused or
/// reassigned; the encoder is the sole authority on indices within one
/// `compile` invocation (spec §3, "Encoder").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariableEncoder {
    label_to_index: FxHashMap<String, VariableId>,
    labels: Vec<String>,
}

impl VariableEncoder {
    /// Create a new, empty encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct labels registered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True if no labels have been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Return the index for `label`, assigning a fresh one if this is the
    /// first time it has been seen.
    pub fn index_of(&mut self, label: &str) -> VariableId {
        if let Some(id) = self.label_to_index.get(label) {
            return *id;
        }
        let id = VariableId(self.labels.len());
        self.labels.push(label.to_string());
        self.label_to_index.insert(label.to_string(), id);
        id
    }

    /// Look up the index for `label` without inserting it.
    #[must_use]
    pub fn lookup(&self, label: &str) -> Option<VariableId> {
        self.label_to_index.get(label).copied()
    }

    /// Resolve an index back to its label.
    ///
    /// Decoding an index this encoder never issued is a programmer error
    /// (spec §7.3): it panics rather than returning a `Result`.
    #[must_use]
    pub fn label_of(&self, index: VariableId) -> &str {
        self.labels
            .get(index.as_usize())
            .unwrap_or_else(|| panic!("VariableEncoder: index {index} was never issued"))
            .as_str()
    }

    /// All labels in index order (spec P1: indices are contiguous `[0, N)`).
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_of_is_stable_and_insertion_ordered() {
        let mut enc = VariableEncoder::new();
        let a = enc.index_of("a");
        let b = enc.index_of("b");
        let a_again = enc.index_of("a");
        assert_eq!(a, a_again);
        assert_eq!(a.as_usize(), 0);
        assert_eq!(b.as_usize(), 1);
        assert_eq!(enc.len(), 2);
    }

    #[test]
    fn round_trip_p1() {
        let mut enc = VariableEncoder::new();
        for label in ["x", "y", "z"] {
            enc.index_of(label);
        }
        for (i, label) in enc.labels().iter().enumerate() {
            let id = enc.lookup(label).unwrap();
            assert_eq!(id.as_usize(), i);
            assert_eq!(enc.label_of(id), label.as_str());
        }
    }

    #[test]
    #[should_panic(expected = "was never issued")]
    fn label_of_out_of_range_panics() {
        let enc = VariableEncoder::new();
        enc.label_of(VariableId(0));
    }
}
