//! The decoder: interprets a solver sample against a compiled model,
//! recovering energy, sub-Hamiltonian values, and constraint satisfaction
//! (spec §4.H).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use qubo_ir::Binding;

use crate::error::CompileResult;
use crate::model::{evaluate_polynomial, CompiledModel};
use crate::sample::{normalize_sample, Sample, Vartype};

/// The result of decoding one sample against a [`CompiledModel`] (spec §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodedSample {
    /// The sample, normalised to binary `{0.0, 1.0}` values.
    pub sample: HashMap<String, f64>,
    /// The total energy of the (post-reduction) quadratic polynomial.
    pub energy: f64,
    subh: HashMap<String, f64>,
    constraints: HashMap<String, (f64, bool)>,
}

impl DecodedSample {
    pub(crate) fn build(
        model: &CompiledModel,
        sample: &Sample,
        vartype: Vartype,
        binding: &Binding,
    ) -> CompileResult<Self> {
        let binary = normalize_sample(sample, vartype, model.encoder().labels())?;
        let energy = evaluate_polynomial(&model.quadratic, model.encoder(), &binary, binding)?;

        let mut subh = HashMap::with_capacity(model.subh_records().len());
        for record in model.subh_records() {
            let value = evaluate_polynomial(&record.polynomial, model.encoder(), &binary, binding)?;
            subh.insert(record.label.clone(), value);
        }

        let mut constraints = HashMap::with_capacity(model.constraint_records().len());
        for record in model.constraint_records() {
            let value = evaluate_polynomial(&record.polynomial, model.encoder(), &binary, binding)?;
            let satisfied = record.predicate.check(value);
            constraints.insert(record.label.clone(), (value, satisfied));
        }

        Ok(Self {
            sample: binary,
            energy,
            subh,
            constraints,
        })
    }

    /// The evaluated value of the sub-Hamiltonian labelled `label`, if any
    /// was recorded under it.
    #[must_use]
    pub fn subh(&self, label: &str) -> Option<f64> {
        self.subh.get(label).copied()
    }

    /// All recorded sub-Hamiltonian values, by label.
    #[must_use]
    pub fn subh_values(&self) -> &HashMap<String, f64> {
        &self.subh
    }

    /// The evaluated value of the constraint labelled `label`, before its
    /// predicate is applied.
    #[must_use]
    pub fn constraint_value(&self, label: &str) -> Option<f64> {
        self.constraints.get(label).map(|(value, _)| *value)
    }

    /// Per-constraint satisfaction (spec §6, `decoded.constraints(only_broken?)`).
    /// When `only_broken` is true, only unsatisfied constraints are
    /// returned.
    #[must_use]
    pub fn constraints(&self, only_broken: bool) -> HashMap<String, bool> {
        self.constraints
            .iter()
            .filter(|(_, (_, satisfied))| !only_broken || !satisfied)
            .map(|(label, (_, satisfied))| (label.clone(), *satisfied))
            .collect()
    }

    /// Look up a multi-indexed array entry by string-building
    /// `"name[i][j]..."` and reading it from the normalised sample (spec
    /// §4.H step 5).
    #[must_use]
    pub fn array(&self, name: &str, indices: &[usize]) -> Option<f64> {
        let mut key = String::from(name);
        for index in indices {
            key.push('[');
            key.push_str(&index.to_string());
            key.push(']');
        }
        self.sample.get(&key).copied()
    }
}
