//! Top-level compile entry point: expand, then quadratise, then package up
//! a [`CompiledModel`] (spec §2, "Control flow").

use tracing::{info, instrument};

use qubo_ir::{Coeff, Expr, VariableEncoder};

use crate::error::CompileResult;
use crate::expander::expand;
use crate::model::CompiledModel;
use crate::reducer::reduce;

/// Compile `root` into a quadratic model under quadratisation `strength`
/// (a plain scalar or a placeholder-symbolic [`Coeff`]).
///
/// `compile` never fails on well-formed expressions; the only failure mode
/// is a non-positive *constant* strength (spec §7, "compile never fails on
/// user-level inputs").
///
/// `strength` accepts anything convertible into a [`Coeff`] — a bare `f64`
/// for the common concrete-strength case, or a full placeholder-symbolic
/// coefficient (spec §9, "Strength as a placeholder").
#[instrument(skip(root, strength))]
pub fn compile(root: &Expr, strength: impl Into<Coeff>) -> CompileResult<CompiledModel> {
    let strength = strength.into();
    let mut encoder = VariableEncoder::new();

    info!("expanding Hamiltonian");
    let (polynomial, tables) = expand(root, &mut encoder);

    info!(pre_reduction_terms = polynomial.len(), "reducing to quadratic form");
    let quadratic = reduce(&polynomial, &strength, &mut encoder)?;

    let (subh, constraints) = tables.into_records();
    info!(
        variables = encoder.len(),
        quadratic_terms = quadratic.len(),
        subh = subh.len(),
        constraints = constraints.len(),
        "compile complete"
    );

    Ok(CompiledModel {
        quadratic,
        subh,
        constraints,
        encoder,
    })
}
