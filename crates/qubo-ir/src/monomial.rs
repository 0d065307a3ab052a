//! Placeholder monomials: a mapping from placeholder name to a positive
//! integer exponent (spec §3, "Placeholder monomial").

use std::fmt;

use serde::{Deserialize, Serialize};

/// A product of placeholders raised to positive integer exponents, e.g.
/// `M^2 * lambda`. The empty monomial represents the scalar `1`.
///
/// Kept as a sorted `Vec<(String, u32)>` (sorted by name, no duplicate
/// names, no zero exponents) so that `PartialEq`/`Eq`/`Hash` are derivable
/// and agree with each other regardless of the order placeholders were
/// multiplied in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Monomial(Vec<(String, u32)>);

impl Monomial {
    /// The empty monomial (scalar factor only).
    #[must_use]
    pub fn one() -> Self {
        Self(Vec::new())
    }

    /// A monomial consisting of a single placeholder raised to the first
    /// power.
    #[must_use]
    pub fn symbol(name: impl Into<String>) -> Self {
        Self(vec![(name.into(), 1)])
    }

    /// Whether this is the empty (scalar) monomial.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(name, exponent)` pairs in canonical (sorted) order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(n, e)| (n.as_str(), *e))
    }

    /// All placeholder names appearing in this monomial.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    /// Multiply two monomials by summing shared exponents.
    #[must_use]
    pub fn mul(&self, other: &Monomial) -> Monomial {
        let mut merged: Vec<(String, u32)> = self.0.clone();
        for (name, exp) in &other.0 {
            if let Some(existing) = merged.iter_mut().find(|(n, _)| n == name) {
                existing.1 += exp;
            } else {
                merged.push((name.clone(), *exp));
            }
        }
        merged.sort_by(|a, b| a.0.cmp(&b.0));
        Monomial(merged)
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "1");
        }
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(n, e)| if *e == 1 { n.clone() } else { format!("{n}^{e}") })
            .collect();
        write!(f, "{}", parts.join("*"))
    }
}
