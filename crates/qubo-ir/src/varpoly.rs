//! Variable polynomial: a mapping from product-of-variable-indices to a
//! placeholder coefficient (spec §4.D).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::coeff::Coeff;
use crate::encoder::VariableId;
use crate::product::Product;

/// A multivariate polynomial over integer-indexed variables with
/// placeholder-symbolic coefficients.
///
/// Canonical form: no two entries share an equal [`Product`] (spec
/// invariant 2); terms whose coefficient collapses to zero are pruned
/// after every arithmetic operation (spec §9, Open Question).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariablePolynomial(FxHashMap<Product, Coeff>);

// Same rationale as `Coeff`: `Product` cannot key a `serde_json` map, so the
// wire format is a `Vec<(Product, Coeff)>` of terms.
impl Serialize for VariablePolynomial {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let terms: Vec<(&Product, &Coeff)> = self.0.iter().collect();
        terms.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for VariablePolynomial {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let terms = Vec::<(Product, Coeff)>::deserialize(deserializer)?;
        let mut poly = VariablePolynomial::zero();
        for (product, coeff) in terms {
            poly.upsert(product, coeff);
        }
        Ok(poly)
    }
}

impl VariablePolynomial {
    /// The zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self(FxHashMap::default())
    }

    /// A constant polynomial, pruned away if `value == 0`.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        let mut p = Self::zero();
        p.upsert(Product::one(), Coeff::scalar(value));
        p
    }

    /// The expansion of a binary variable: `{ {index}: 1 }` (spec §4.E).
    #[must_use]
    pub fn binary(index: VariableId) -> Self {
        let mut p = Self::zero();
        p.upsert(Product::single(index), Coeff::scalar(1.0));
        p
    }

    /// The expansion of a spin variable: `2*x - 1` (spec §4.E). Note this
    /// is expressed directly in variable-polynomial terms (the spin
    /// variable's *binary* surrogate index), matching the spec's literal
    /// `{ {index}: 2, {}: -1 }`.
    #[must_use]
    pub fn spin(index: VariableId) -> Self {
        let mut p = Self::zero();
        p.upsert(Product::single(index), Coeff::scalar(2.0));
        p.upsert(Product::one(), Coeff::scalar(-1.0));
        p
    }

    /// The expansion of a bare placeholder: `{ {}: 1*name }`.
    #[must_use]
    pub fn placeholder(name: &str) -> Self {
        let mut p = Self::zero();
        p.upsert(Product::one(), Coeff::symbol(name));
        p
    }

    /// True if every coefficient is (effectively) zero, i.e. there are no
    /// terms left.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct (non-zero) terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Highest degree among all terms (0 for a purely constant polynomial,
    /// including the zero polynomial).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.0.keys().map(Product::degree).max().unwrap_or(0)
    }

    /// Iterate over `(product, coefficient)` terms.
    pub fn terms(&self) -> impl Iterator<Item = (&Product, &Coeff)> {
        self.0.iter()
    }

    /// Upsert a term, merging coefficients on collision and pruning zero
    /// results, preserving canonical form (spec invariant 2).
    pub fn upsert(&mut self, product: Product, coeff: Coeff) {
        if coeff.is_zero() {
            return;
        }
        let merged = match self.0.remove(&product) {
            Some(existing) => existing.add(&coeff),
            None => coeff,
        };
        if !merged.is_zero() {
            self.0.insert(product, merged);
        }
    }

    /// Add two variable polynomials (upsert every term of the smaller into
    /// a clone of the larger, per spec §4.D).
    #[must_use]
    pub fn add(&self, other: &VariablePolynomial) -> VariablePolynomial {
        let (mut bigger, smaller) = if self.0.len() >= other.0.len() {
            (self.clone(), other)
        } else {
            (other.clone(), self)
        };
        for (product, coeff) in &smaller.0 {
            bigger.upsert(product.clone(), coeff.clone());
        }
        bigger
    }

    /// Multiply two variable polynomials: double loop over term pairs,
    /// combining products by sorted set-union and coefficients by
    /// multiplication (spec §4.D).
    #[must_use]
    pub fn mul(&self, other: &VariablePolynomial) -> VariablePolynomial {
        let mut out = VariablePolynomial::zero();
        for (pa, ca) in &self.0 {
            for (pb, cb) in &other.0 {
                out.upsert(pa.union(pb), ca.mul(cb));
            }
        }
        out
    }

    /// Scale every coefficient by a plain scalar.
    #[must_use]
    pub fn scale(&self, factor: f64) -> VariablePolynomial {
        let mut out = VariablePolynomial::zero();
        for (product, coeff) in &self.0 {
            out.upsert(product.clone(), coeff.scale(factor));
        }
        out
    }

    /// Scale every coefficient by a placeholder-symbolic factor.
    #[must_use]
    pub fn scale_coeff(&self, factor: &Coeff) -> VariablePolynomial {
        let mut out = VariablePolynomial::zero();
        for (product, coeff) in &self.0 {
            out.upsert(product.clone(), coeff.mul(factor));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vid(i: usize) -> VariableId {
        VariableId::from(i)
    }

    #[test]
    fn binary_expands_to_singleton() {
        let p = VariablePolynomial::binary(vid(0));
        assert_eq!(p.len(), 1);
        assert_eq!(p.degree(), 1);
    }

    #[test]
    fn idempotent_binary_variable_p3() {
        // x * x should still have a single degree-1 term, not degree 2.
        let x = VariablePolynomial::binary(vid(0));
        let x2 = x.mul(&x);
        assert_eq!(x2.degree(), 1);
        assert_eq!(x2.len(), 1);
    }

    #[test]
    fn add_merges_collisions() {
        let a = VariablePolynomial::binary(vid(0));
        let b = a.scale(-1.0);
        let sum = a.add(&b);
        assert!(sum.is_zero());
    }

    #[test]
    fn canonicity_p2_no_duplicate_products() {
        let a = VariablePolynomial::binary(vid(0)).add(&VariablePolynomial::binary(vid(1)));
        let b = VariablePolynomial::binary(vid(1)).add(&VariablePolynomial::binary(vid(0)));
        let sum = a.add(&b);
        // Each of the two products should appear exactly once.
        assert_eq!(sum.len(), 2);
    }

    #[test]
    fn mul_distributes_over_distinct_variables() {
        let x = VariablePolynomial::binary(vid(0));
        let y = VariablePolynomial::binary(vid(1));
        let xy = x.mul(&y);
        assert_eq!(xy.degree(), 2);
        assert_eq!(xy.len(), 1);
    }

    #[test]
    fn serde_round_trip_via_vec_of_terms() {
        let poly = VariablePolynomial::binary(vid(0))
            .add(&VariablePolynomial::binary(vid(1)))
            .scale_coeff(&Coeff::symbol("M"));
        let json = serde_json::to_string(&poly).unwrap();
        let restored: VariablePolynomial = serde_json::from_str(&json).unwrap();
        assert_eq!(poly, restored);
    }
}
