//! Label-keyed side tables the expander mutates while walking the DAG
//! (spec §4.E, §9 "Mutable side tables during expansion").

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use qubo_ir::{Predicate, VariablePolynomial};

/// A labelled sub-Hamiltonian: the polynomial recorded for a `subh(...)`
/// node, keyed by first occurrence of its label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubHRecord {
    /// The user-supplied label.
    pub label: String,
    /// The sub-expression's (pre-reduction) polynomial.
    pub polynomial: VariablePolynomial,
}

/// A labelled constraint: a sub-Hamiltonian plus its satisfaction
/// predicate.
///
/// The predicate itself is not serialized — a [`Predicate::Custom`] closure
/// has no data representation — so a round trip through `serde` always
/// comes back with [`Predicate::EqualsZero`]. Diagnostic persistence of
/// `label`/`polynomial` is the point; the predicate is reattached by the
/// caller if it mattered.
#[derive(Clone, Serialize, Deserialize)]
pub struct ConstraintRecord {
    /// The user-supplied label.
    pub label: String,
    /// The constrained sub-expression's (pre-reduction) polynomial.
    pub polynomial: VariablePolynomial,
    /// The predicate applied to the evaluated polynomial value.
    #[serde(skip, default)]
    pub predicate: Predicate,
}

impl std::fmt::Debug for ConstraintRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintRecord")
            .field("label", &self.label)
            .field("polynomial", &self.polynomial)
            .finish_non_exhaustive()
    }
}

/// The sub-Hamiltonian and constraint tables owned by one top-level
/// expansion call, plus the set of with-penalty labels already applied
/// (spec §4.E, first-write-wins for all three).
#[derive(Debug, Default)]
pub struct ExpansionTables {
    subh: FxHashMap<String, SubHRecord>,
    constraints: FxHashMap<String, ConstraintRecord>,
    applied_penalties: FxHashSet<String>,
}

impl ExpansionTables {
    /// A fresh, empty set of tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sub-Hamiltonian if this is the first time its label is
    /// seen.
    pub fn record_subh(&mut self, label: &str, polynomial: &VariablePolynomial) {
        self.subh.entry(label.to_string()).or_insert_with(|| SubHRecord {
            label: label.to_string(),
            polynomial: polynomial.clone(),
        });
    }

    /// Record a constraint if this is the first time its label is seen.
    pub fn record_constraint(
        &mut self,
        label: &str,
        polynomial: &VariablePolynomial,
        predicate: &Predicate,
    ) {
        self.constraints
            .entry(label.to_string())
            .or_insert_with(|| ConstraintRecord {
                label: label.to_string(),
                polynomial: polynomial.clone(),
                predicate: predicate.clone(),
            });
    }

    /// True the first time a with-penalty label is seen; false on every
    /// repeat (spec §4.E, §9 "With-penalty deduplication").
    pub fn claim_penalty(&mut self, label: &str) -> bool {
        self.applied_penalties.insert(label.to_string())
    }

    /// Consume the tables, returning the recorded records in insertion
    /// order (stable for a given expression tree, though not significant
    /// to correctness — labels are the lookup key).
    pub fn into_records(self) -> (Vec<SubHRecord>, Vec<ConstraintRecord>) {
        let mut subh: Vec<_> = self.subh.into_values().collect();
        subh.sort_by(|a, b| a.label.cmp(&b.label));
        let mut constraints: Vec<_> = self.constraints.into_values().collect();
        constraints.sort_by(|a, b| a.label.cmp(&b.label));
        (subh, constraints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_subh_is_first_write_wins() {
        let mut tables = ExpansionTables::new();
        tables.record_subh("g", &VariablePolynomial::constant(1.0));
        tables.record_subh("g", &VariablePolynomial::constant(2.0));
        let (subh, _) = tables.into_records();
        assert_eq!(subh.len(), 1);
        assert_eq!(subh[0].polynomial, VariablePolynomial::constant(1.0));
    }

    #[test]
    fn claim_penalty_only_true_once() {
        let mut tables = ExpansionTables::new();
        assert!(tables.claim_penalty("p"));
        assert!(!tables.claim_penalty("p"));
        assert!(tables.claim_penalty("q"));
    }
}
