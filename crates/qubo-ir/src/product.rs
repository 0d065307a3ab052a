//! Products of variable indices (spec §3, "Product").

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::encoder::VariableId;

/// An ordered, deduplicated sequence of variable indices, representing one
/// monomial of a [`crate::varpoly::VariablePolynomial`]. The empty product
/// is the constant term.
///
/// Both binary and spin expansion preserve `x^2 = x` / `s^2 = 1` by
/// construction (spec §3 invariant 3), so a well-formed product never needs
/// explicit self-reduction; `union` below still de-duplicates defensively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Product(Vec<VariableId>);

impl Product {
    /// The empty product (constant term).
    #[must_use]
    pub fn one() -> Self {
        Self(Vec::new())
    }

    /// A product consisting of a single variable.
    #[must_use]
    pub fn single(id: VariableId) -> Self {
        Self(vec![id])
    }

    /// Degree of this product (number of distinct variables).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.0.len()
    }

    /// True for the empty (constant) product.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    /// The variable indices in ascending order.
    #[must_use]
    pub fn indices(&self) -> &[VariableId] {
        &self.0
    }

    /// Merge two products by sorted set-union, so `x * x == x`.
    #[must_use]
    pub fn union(&self, other: &Product) -> Product {
        let mut merged = self.0.clone();
        for id in &other.0 {
            if !merged.contains(id) {
                merged.push(*id);
            }
        }
        merged.sort_unstable();
        Product(merged)
    }

    /// Rewrite every occurrence of `from` within this product into `to`,
    /// collapsing the two slots into one (used by the order reducer when it
    /// introduces an auxiliary variable for a co-occurring pair).
    #[must_use]
    pub fn substitute_pair(&self, a: VariableId, b: VariableId, aux: VariableId) -> Product {
        if !self.0.contains(&a) || !self.0.contains(&b) {
            return self.clone();
        }
        let mut out: Vec<VariableId> = self
            .0
            .iter()
            .copied()
            .filter(|v| *v != a && *v != b)
            .collect();
        if !out.contains(&aux) {
            out.push(aux);
        }
        out.sort_unstable();
        Product(out)
    }

    /// Unordered pairs of distinct indices co-occurring in this product
    /// (used by the order reducer's pair-frequency count, spec §4.F step 1).
    pub fn pairs(&self) -> impl Iterator<Item = (VariableId, VariableId)> + '_ {
        (0..self.0.len()).flat_map(move |i| {
            ((i + 1)..self.0.len()).map(move |j| (self.0[i], self.0[j]))
        })
    }
}

impl From<Vec<VariableId>> for Product {
    fn from(mut ids: Vec<VariableId>) -> Self {
        ids.sort_unstable();
        ids.dedup();
        Product(ids)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "1");
        }
        let parts: Vec<String> = self.0.iter().map(|v| format!("x{}", v.as_usize())).collect();
        write!(f, "{}", parts.join("*"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vid(i: usize) -> VariableId {
        VariableId::from(i)
    }

    #[test]
    fn union_dedups() {
        let a = Product::single(vid(0));
        let b = Product::single(vid(0));
        let u = a.union(&b);
        assert_eq!(u.degree(), 1);
    }

    #[test]
    fn union_is_sorted() {
        let a = Product::single(vid(2));
        let b = Product::single(vid(0));
        let u = a.union(&b);
        assert_eq!(u.indices(), &[vid(0), vid(2)]);
    }

    #[test]
    fn pairs_enumerates_unordered() {
        let p = Product::from(vec![vid(0), vid(1), vid(2)]);
        let pairs: Vec<_> = p.pairs().collect();
        assert_eq!(pairs, vec![(vid(0), vid(1)), (vid(0), vid(2)), (vid(1), vid(2))]);
    }

    #[test]
    fn substitute_pair_collapses() {
        let p = Product::from(vec![vid(0), vid(1), vid(2)]);
        let sub = p.substitute_pair(vid(0), vid(1), vid(3));
        assert_eq!(sub.indices(), &[vid(2), vid(3)]);
    }
}
