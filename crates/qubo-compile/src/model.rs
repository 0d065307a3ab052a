//! The compiled model: a quadratic polynomial plus its side tables and
//! encoder, exposing evaluation to QUBO/Ising form (spec §4.G).

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use qubo_ir::{Binding, VariableEncoder, VariableId, VariablePolynomial};

use crate::decoder::DecodedSample;
use crate::error::CompileResult;
use crate::sample::{normalize_sample, Sample, Vartype};
use crate::tables::{ConstraintRecord, SubHRecord};

/// The key a QUBO/Ising entry is reported under: either the variable's
/// label or its dense encoder index, per the `use_indices` flag on
/// [`CompiledModel::to_qubo`]/[`CompiledModel::to_ising`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VarKey {
    /// The user-supplied label.
    Label(String),
    /// The encoder's dense index.
    Index(usize),
}

impl fmt::Display for VarKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarKey::Label(label) => write!(f, "{label}"),
            VarKey::Index(index) => write!(f, "{index}"),
        }
    }
}

/// A QUBO: one entry per unordered pair of variable keys plus a constant
/// offset (spec §4.G, §6).
#[derive(Debug, Clone, Default)]
pub struct Qubo {
    /// Diagonal and off-diagonal entries, keyed `(i, j)` with `i` before
    /// `j` in the model's variable order.
    pub entries: HashMap<(VarKey, VarKey), f64>,
    /// The constant term.
    pub offset: f64,
}

/// An Ising model: linear biases `h`, quadratic couplings `J`, and a
/// constant offset (spec §4.G, §6).
#[derive(Debug, Clone, Default)]
pub struct Ising {
    /// Linear biases, keyed by variable key.
    pub linear: HashMap<VarKey, f64>,
    /// Quadratic couplings, keyed `(i, j)` with `i` before `j`.
    pub quadratic: HashMap<(VarKey, VarKey), f64>,
    /// The constant term.
    pub offset: f64,
}

/// The immutable result of `compile`: a quadratic polynomial, its
/// sub-Hamiltonian and constraint side tables, and the encoder that
/// issued every variable referenced within it (spec §3, "Compiled model").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompiledModel {
    pub(crate) quadratic: VariablePolynomial,
    pub(crate) subh: Vec<SubHRecord>,
    pub(crate) constraints: Vec<ConstraintRecord>,
    pub(crate) encoder: VariableEncoder,
}

impl CompiledModel {
    fn key_for(&self, index: VariableId, use_indices: bool) -> VarKey {
        if use_indices {
            VarKey::Index(index.as_usize())
        } else {
            VarKey::Label(self.encoder.label_of(index).to_string())
        }
    }

    /// Evaluate the compiled (quadratic) polynomial under `binding` into a
    /// QUBO. Every term of degree 0 rolls into `offset`; degree 1 becomes a
    /// diagonal entry `(i, i)`; degree 2 becomes an off-diagonal entry
    /// `(i, j)` with `i` before `j` in variable order (spec §4.G).
    pub fn to_qubo(&self, binding: &Binding, use_indices: bool) -> CompileResult<Qubo> {
        let mut qubo = Qubo::default();
        for (product, coeff) in self.quadratic.terms() {
            let value = coeff.evaluate(binding)?;
            match product.indices() {
                [] => qubo.offset += value,
                [i] => {
                    let key = self.key_for(*i, use_indices);
                    *qubo.entries.entry((key.clone(), key)).or_insert(0.0) += value;
                }
                [i, j] => {
                    let ki = self.key_for(*i, use_indices);
                    let kj = self.key_for(*j, use_indices);
                    *qubo.entries.entry((ki, kj)).or_insert(0.0) += value;
                }
                _ => debug_assert!(false, "compiled model must be quadratic (spec P5)"),
            }
        }
        Ok(qubo)
    }

    /// Obtain the equivalent Ising model from the QUBO via the standard
    /// `x = (s + 1) / 2` substitution (spec §4.G):
    /// `Q_ii x_i = Q_ii/2 s_i + Q_ii/2` and
    /// `Q_ij x_i x_j = Q_ij/4 (s_i s_j + s_i + s_j + 1)`.
    pub fn to_ising(&self, binding: &Binding, use_indices: bool) -> CompileResult<Ising> {
        let qubo = self.to_qubo(binding, use_indices)?;
        let mut ising = Ising {
            offset: qubo.offset,
            ..Ising::default()
        };
        for ((ki, kj), value) in qubo.entries {
            if ki == kj {
                *ising.linear.entry(ki).or_insert(0.0) += value / 2.0;
                ising.offset += value / 2.0;
            } else {
                *ising.quadratic.entry((ki.clone(), kj.clone())).or_insert(0.0) += value / 4.0;
                *ising.linear.entry(ki).or_insert(0.0) += value / 4.0;
                *ising.linear.entry(kj).or_insert(0.0) += value / 4.0;
                ising.offset += value / 4.0;
            }
        }
        Ok(ising)
    }

    /// Evaluate the total energy of a sample (spec §6, §8 P8).
    pub fn energy(&self, sample: &Sample, vartype: Vartype, binding: &Binding) -> CompileResult<f64> {
        let binary = normalize_sample(sample, vartype, self.encoder.labels())?;
        evaluate_polynomial(&self.quadratic, &self.encoder, &binary, binding)
    }

    /// Decode a single sample against this model (spec §4.H).
    pub fn decode_sample(
        &self,
        sample: &Sample,
        vartype: Vartype,
        binding: &Binding,
    ) -> CompileResult<DecodedSample> {
        DecodedSample::build(self, sample, vartype, binding)
    }

    /// Decode a batch of samples (spec §6, `decode_samples`).
    pub fn decode_samples(
        &self,
        samples: &[Sample],
        vartype: Vartype,
        binding: &Binding,
    ) -> CompileResult<Vec<DecodedSample>> {
        samples
            .iter()
            .map(|sample| self.decode_sample(sample, vartype, binding))
            .collect()
    }

    /// Labels in encoder (index) order (spec §6, `variable_order`).
    #[must_use]
    pub fn variable_order(&self) -> &[String] {
        self.encoder.labels()
    }

    /// The model's sub-Hamiltonian records, label-keyed.
    #[must_use]
    pub fn subh_records(&self) -> &[SubHRecord] {
        &self.subh
    }

    /// The model's constraint records, label-keyed.
    #[must_use]
    pub fn constraint_records(&self) -> &[ConstraintRecord] {
        &self.constraints
    }

    /// Access the variable encoder directly (label <-> index lookups).
    #[must_use]
    pub fn encoder(&self) -> &VariableEncoder {
        &self.encoder
    }
}

impl fmt::Display for CompiledModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CompiledModel {{ variables: {}, quadratic terms: {}, subh: {}, constraints: {} }}",
            self.encoder.len(),
            self.quadratic.len(),
            self.subh.len(),
            self.constraints.len(),
        )
    }
}

/// Evaluate a (pre- or post-reduction) variable polynomial given a binary
/// sample keyed by label and a placeholder binding. Shared by `energy` and
/// the decoder (for sub-Hamiltonian/constraint values).
pub(crate) fn evaluate_polynomial(
    poly: &VariablePolynomial,
    encoder: &VariableEncoder,
    binary_sample: &HashMap<String, f64>,
    binding: &Binding,
) -> CompileResult<f64> {
    let mut total = 0.0;
    for (product, coeff) in poly.terms() {
        let mut term = coeff.evaluate(binding)?;
        for index in product.indices() {
            let label = encoder.label_of(*index);
            term *= binary_sample.get(label).copied().unwrap_or(0.0);
        }
        total += term;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::compile;
    use qubo_ir::Expr;

    #[test]
    fn to_qubo_round_trip_p8() {
        let a = Expr::binary("a");
        let b = Expr::binary("b");
        let c = Expr::binary("c");
        let h = a * b + c.clone() * Expr::constant(3.0);
        let model = compile(&h, strength_five()).unwrap();
        let binding = Binding::new();
        let qubo = model.to_qubo(&binding, false).unwrap();

        for bits in 0u8..8 {
            let mut sample = Sample::new();
            sample.insert("a".to_string(), (bits & 1) as f64);
            sample.insert("b".to_string(), ((bits >> 1) & 1) as f64);
            sample.insert("c".to_string(), ((bits >> 2) & 1) as f64);
            let energy = model.energy(&sample, Vartype::Binary, &binding).unwrap();

            let mut expected = qubo.offset;
            for ((ki, kj), value) in &qubo.entries {
                let vi = bit_value(&sample, ki);
                let vj = bit_value(&sample, kj);
                expected += value * vi * vj;
            }
            assert!((energy - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn display_summarizes_model() {
        let h = Expr::binary("a") * Expr::binary("b");
        let model = compile(&h, strength_five()).unwrap();
        let rendered = model.to_string();
        assert!(rendered.contains("variables: 2"));
    }

    #[test]
    fn serde_round_trip_preserves_energy() {
        let h = Expr::binary("a") * Expr::binary("b") + Expr::binary("c") * Expr::constant(3.0);
        let model = compile(&h, strength_five()).unwrap();
        let binding = Binding::new();

        let json = serde_json::to_string(&model).unwrap();
        let restored: CompiledModel = serde_json::from_str(&json).unwrap();

        let mut sample = Sample::new();
        sample.insert("a".to_string(), 1.0);
        sample.insert("b".to_string(), 1.0);
        sample.insert("c".to_string(), 0.0);

        let before = model.energy(&sample, Vartype::Binary, &binding).unwrap();
        let after = restored.energy(&sample, Vartype::Binary, &binding).unwrap();
        assert_eq!(before, after);
    }

    fn bit_value(sample: &Sample, key: &VarKey) -> f64 {
        match key {
            VarKey::Label(label) => sample[label],
            VarKey::Index(_) => unreachable!("test uses label keys"),
        }
    }

    fn strength_five() -> qubo_ir::Coeff {
        qubo_ir::Coeff::scalar(5.0)
    }
}
