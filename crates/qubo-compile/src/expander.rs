//! The expander: a recursive DAG walk producing a variable polynomial plus
//! accumulated penalty, and populating the sub-Hamiltonian/constraint side
//! tables (spec §4.E).

use tracing::{debug, instrument};

use qubo_ir::{Expr, ExprNode, VariableEncoder, VariablePolynomial};

use crate::tables::ExpansionTables;

/// Expand one sub-expression, returning its `(main, penalty)` polynomial
/// pair. Mutates `encoder` (fresh indices for variable labels) and `tables`
/// (sub-Hamiltonian / constraint / with-penalty bookkeeping).
fn expand_node(
    expr: &Expr,
    encoder: &mut VariableEncoder,
    tables: &mut ExpansionTables,
) -> (VariablePolynomial, VariablePolynomial) {
    match expr.node() {
        ExprNode::Binary(label) => {
            let index = encoder.index_of(label);
            (VariablePolynomial::binary(index), VariablePolynomial::zero())
        }
        ExprNode::Spin(label) => {
            let index = encoder.index_of(label);
            (VariablePolynomial::spin(index), VariablePolynomial::zero())
        }
        ExprNode::Placeholder(name) => {
            (VariablePolynomial::placeholder(name), VariablePolynomial::zero())
        }
        ExprNode::Numeric(value) => (VariablePolynomial::constant(*value), VariablePolynomial::zero()),
        ExprNode::Add(a, b) => {
            let (ma, pa) = expand_node(a, encoder, tables);
            let (mb, pb) = expand_node(b, encoder, tables);
            (ma.add(&mb), pa.add(&pb))
        }
        ExprNode::Mul(a, b) => {
            let (ma, pa) = expand_node(a, encoder, tables);
            let (mb, pb) = expand_node(b, encoder, tables);
            // Penalties accumulate additively even under multiplication —
            // they never multiply into the result (spec §4.E).
            (ma.mul(&mb), pa.add(&pb))
        }
        ExprNode::SubH(inner, label) => {
            let (main, penalty) = expand_node(inner, encoder, tables);
            tables.record_subh(label, &main);
            (main, penalty)
        }
        ExprNode::Constraint(inner, label, predicate) => {
            let (main, penalty) = expand_node(inner, encoder, tables);
            tables.record_constraint(label, &main, predicate);
            (main, penalty)
        }
        ExprNode::WithPenalty(inner, penalty_expr, label) => {
            let (main, inner_penalty) = expand_node(inner, encoder, tables);
            let (penalty_main, penalty_penalty) = expand_node(penalty_expr, encoder, tables);
            let penalty = if tables.claim_penalty(label) {
                inner_penalty.add(&penalty_main).add(&penalty_penalty)
            } else {
                inner_penalty
            };
            (main, penalty)
        }
        ExprNode::UserDefined(inner) => expand_node(inner, encoder, tables),
    }
}

/// Expand a root expression into the polynomial to compile (`main +
/// penalty`) plus the populated side tables (spec §4.E, final paragraph).
#[instrument(skip(root, encoder))]
pub fn expand(
    root: &Expr,
    encoder: &mut VariableEncoder,
) -> (VariablePolynomial, ExpansionTables) {
    let mut tables = ExpansionTables::new();
    let (main, penalty) = expand_node(root, encoder, &mut tables);
    let combined = main.add(&penalty);
    debug!(
        terms = combined.len(),
        variables = encoder.len(),
        "expanded Hamiltonian"
    );
    (combined, tables)
}
