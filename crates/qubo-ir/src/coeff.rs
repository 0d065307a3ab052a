//! Placeholder coefficient algebra (spec §4.C).
//!
//! A [`Coeff`] is a polynomial over placeholder names with `f64`
//! coefficients: a sum of scalar-times-monomial terms. It supports `add`,
//! `mul`, and `evaluate` under a placeholder binding. The spec permits two
//! representations (a single monomial-plus-scalar, or a full map) "to keep
//! the common plain-number path cheap"; this crate settles on one canonical
//! map representation for both (see `DESIGN.md`, Open Question) — zero
//! terms are pruned after every arithmetic operation so equality and
//! hashing stay well-defined.

use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{IrError, IrResult};
use crate::monomial::Monomial;

/// A mapping from placeholder name to concrete value, used to evaluate a
/// [`Coeff`] into a plain `f64`.
pub type Binding = HashMap<String, f64>;

/// A polynomial over placeholder names with floating-point coefficients
/// (spec's "Placeholder polynomial").
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Coeff(FxHashMap<Monomial, f64>);

// `Monomial` is a struct, not a string, so it cannot key a `serde_json` map
// (object keys must serialize as strings). Wire format is a plain
// `Vec<(Monomial, f64)>` of terms instead; the in-memory representation
// stays a hash map.
impl Serialize for Coeff {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let terms: Vec<(&Monomial, f64)> = self.0.iter().map(|(m, v)| (m, *v)).collect();
        terms.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Coeff {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let terms = Vec::<(Monomial, f64)>::deserialize(deserializer)?;
        let mut coeff = Coeff::zero();
        for (monomial, value) in terms {
            coeff.upsert(monomial, value);
        }
        Ok(coeff)
    }
}

impl Coeff {
    /// The zero coefficient.
    #[must_use]
    pub fn zero() -> Self {
        Self(FxHashMap::default())
    }

    /// A plain scalar coefficient.
    #[must_use]
    pub fn scalar(value: f64) -> Self {
        let mut c = Self::zero();
        if value != 0.0 {
            c.0.insert(Monomial::one(), value);
        }
        c
    }

    /// A single unbound placeholder with coefficient 1.
    #[must_use]
    pub fn symbol(name: impl Into<String>) -> Self {
        let mut c = Self::zero();
        c.0.insert(Monomial::symbol(name), 1.0);
        c
    }

    /// True if this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    /// True if this coefficient is a plain number (no placeholders at all).
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.0.keys().all(Monomial::is_one)
    }

    /// If this coefficient is a plain number, return it.
    #[must_use]
    pub fn as_constant(&self) -> Option<f64> {
        if self.is_constant() {
            Some(self.0.get(&Monomial::one()).copied().unwrap_or(0.0))
        } else {
            None
        }
    }

    /// All placeholder names referenced anywhere in this coefficient.
    pub fn placeholder_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().flat_map(Monomial::names)
    }

    /// Iterate over `(monomial, scalar)` terms. Terms with a zero scalar are
    /// never present (pruned eagerly).
    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, f64)> {
        self.0.iter().map(|(m, v)| (m, *v))
    }

    fn upsert(&mut self, monomial: Monomial, value: f64) {
        if value == 0.0 {
            return;
        }
        *self.0.entry(monomial).or_insert(0.0) += value;
    }

    fn prune(&mut self) {
        self.0.retain(|_, v| *v != 0.0);
    }

    /// Add two coefficients (spec P7: linear in evaluation).
    #[must_use]
    pub fn add(&self, other: &Coeff) -> Coeff {
        let (mut bigger, smaller) = if self.0.len() >= other.0.len() {
            (self.clone(), other)
        } else {
            (other.clone(), self)
        };
        for (m, v) in &smaller.0 {
            bigger.upsert(m.clone(), *v);
        }
        bigger.prune();
        bigger
    }

    /// Multiply two coefficients (convolution over monomials).
    #[must_use]
    pub fn mul(&self, other: &Coeff) -> Coeff {
        let mut out = Coeff::zero();
        for (ma, va) in &self.0 {
            for (mb, vb) in &other.0 {
                out.upsert(ma.mul(mb), va * vb);
            }
        }
        out.prune();
        out
    }

    /// Scale by a plain scalar.
    #[must_use]
    pub fn scale(&self, factor: f64) -> Coeff {
        self.mul(&Coeff::scalar(factor))
    }

    /// Evaluate under a placeholder binding, failing if any referenced
    /// placeholder is absent (spec §4.C, §7.2).
    pub fn evaluate(&self, binding: &Binding) -> IrResult<f64> {
        let mut total = 0.0;
        for (monomial, scalar) in &self.0 {
            let mut term = *scalar;
            for (name, exp) in monomial.entries() {
                let value = binding
                    .get(name)
                    .copied()
                    .ok_or_else(|| IrError::MissingPlaceholder {
                        name: name.to_string(),
                    })?;
                term *= value.powi(exp as i32);
            }
            total += term;
        }
        Ok(total)
    }
}

impl From<f64> for Coeff {
    fn from(value: f64) -> Self {
        Coeff::scalar(value)
    }
}

impl From<i32> for Coeff {
    fn from(value: i32) -> Self {
        Coeff::scalar(f64::from(value))
    }
}

impl Add for Coeff {
    type Output = Coeff;
    fn add(self, rhs: Self) -> Coeff {
        Coeff::add(&self, &rhs)
    }
}

impl Sub for Coeff {
    type Output = Coeff;
    fn sub(self, rhs: Self) -> Coeff {
        Coeff::add(&self, &rhs.neg())
    }
}

impl Mul for Coeff {
    type Output = Coeff;
    fn mul(self, rhs: Self) -> Coeff {
        Coeff::mul(&self, &rhs)
    }
}

impl Neg for Coeff {
    type Output = Coeff;
    fn neg(self) -> Coeff {
        self.scale(-1.0)
    }
}

impl fmt::Display for Coeff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "0");
        }
        let mut terms: Vec<(String, f64)> = self
            .0
            .iter()
            .map(|(m, v)| (m.to_string(), *v))
            .collect();
        terms.sort();
        let rendered: Vec<String> = terms
            .into_iter()
            .map(|(m, v)| if m == "1" { format!("{v}") } else { format!("{v}*{m}") })
            .collect();
        write!(f, "{}", rendered.join(" + "))
    }
}
