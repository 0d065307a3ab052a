//! Order reduction: lowers an arbitrary-degree polynomial to a quadratic
//! one by repeatedly introducing auxiliary variables with Rosenberg
//! AND-penalties (spec §4.F).

use rustc_hash::FxHashMap;
use tracing::{debug, instrument, warn};

use qubo_ir::{Coeff, Product, VariableEncoder, VariableId, VariablePolynomial};

use crate::error::{CompileError, CompileResult};

/// Count, across every product of degree > 2, how often each unordered
/// pair of distinct indices co-occurs (spec §4.F step 1), and return the
/// most frequent pair. Ties break lexicographically on `(i, j)` (spec §9,
/// "Order-reducer tie-breaker" — this crate's frozen choice).
fn most_frequent_pair(poly: &VariablePolynomial) -> Option<(VariableId, VariableId)> {
    let mut counts: FxHashMap<(VariableId, VariableId), usize> = FxHashMap::default();
    for (product, _) in poly.terms() {
        if product.degree() <= 2 {
            continue;
        }
        for pair in product.pairs() {
            *counts.entry(pair).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .max_by_key(|(pair, count)| (*count, std::cmp::Reverse(*pair)))
        .map(|(pair, _)| pair)
}

/// Substitute every occurrence of `(i, j)` within each product by `aux`,
/// collapsing the two slots into one wherever they co-occur (spec §4.F
/// step 4).
fn substitute(poly: &VariablePolynomial, i: VariableId, j: VariableId, aux: VariableId) -> VariablePolynomial {
    let mut out = VariablePolynomial::zero();
    for (product, coeff) in poly.terms() {
        out.upsert(product.substitute_pair(i, j, aux), coeff.clone());
    }
    out
}

/// The Rosenberg AND-penalty enforcing `z = x*y`, scaled by `strength`
/// (spec §4.F step 5): `S*(3z - 2xz - 2yz + xy)`.
fn and_penalty(i: VariableId, j: VariableId, aux: VariableId, strength: &Coeff) -> VariablePolynomial {
    let x = VariablePolynomial::binary(i);
    let y = VariablePolynomial::binary(j);
    let z = VariablePolynomial::binary(aux);

    let three_z = z.scale_coeff(&strength.scale(3.0));
    let two_xz = x.mul(&z).scale_coeff(&strength.scale(-2.0));
    let two_yz = y.mul(&z).scale_coeff(&strength.scale(-2.0));
    let xy = x.mul(&y).scale_coeff(strength);

    three_z.add(&two_xz).add(&two_yz).add(&xy)
}

/// Lower `poly` to degree <= 2, issuing auxiliary variables through
/// `encoder` as needed. `strength` is the quadratisation strength; it may
/// be symbolic (spec §9, "Strength as a placeholder").
#[instrument(skip(poly, encoder, strength))]
pub fn reduce(
    poly: &VariablePolynomial,
    strength: &Coeff,
    encoder: &mut VariableEncoder,
) -> CompileResult<VariablePolynomial> {
    match strength.as_constant() {
        Some(value) if value <= 0.0 => {
            return Err(CompileError::NonPositiveStrength { value });
        }
        Some(_) => {}
        None => warn!("quadratisation strength is symbolic; cannot validate positivity up front"),
    }

    let mut current = poly.clone();
    let mut rounds = 0usize;
    while let Some((i, j)) = most_frequent_pair(&current) {
        let label = format!("{}*{}", encoder.label_of(i), encoder.label_of(j));
        let aux = encoder.index_of(&label);
        current = substitute(&current, i, j, aux);
        current = current.add(&and_penalty(i, j, aux, strength));
        rounds += 1;
    }
    debug!(rounds, final_degree = current.degree(), "order reduction complete");
    Ok(current)
}
