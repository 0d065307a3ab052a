//! The expression DAG (spec §4.B): an immutable, shared tree of operators
//! over binary/spin variables, placeholders, and numeric literals.

use std::fmt;
use std::rc::Rc;

use crate::error::{IrError, IrResult};

/// A constraint's satisfaction predicate: a function from the evaluated
/// sub-Hamiltonian value to a boolean. The default is "equals zero" (spec
/// §3, "Constraint record"); [`Predicate::Custom`] lets callers supply
/// anything else (e.g. "within epsilon of zero").
#[derive(Clone)]
pub enum Predicate {
    /// `value == 0.0`.
    EqualsZero,
    /// A user-supplied predicate.
    Custom(Rc<dyn Fn(f64) -> bool>),
}

impl Predicate {
    /// Evaluate the predicate against a sub-Hamiltonian's value.
    #[must_use]
    pub fn check(&self, value: f64) -> bool {
        match self {
            Predicate::EqualsZero => value == 0.0,
            Predicate::Custom(f) => f(value),
        }
    }
}

impl Default for Predicate {
    fn default() -> Self {
        Predicate::EqualsZero
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::EqualsZero => write!(f, "Predicate::EqualsZero"),
            Predicate::Custom(_) => write!(f, "Predicate::Custom(..)"),
        }
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Predicate::EqualsZero, Predicate::EqualsZero) => true,
            (Predicate::Custom(a), Predicate::Custom(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// The node payload of an [`Expr`]. Nodes are built bottom-up and never
/// mutated after construction; sharing a subtree across Hamiltonians is
/// just cloning the `Rc`.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprNode {
    /// A binary variable (`x in {0, 1}`).
    Binary(String),
    /// A spin variable (`s in {-1, +1}`).
    Spin(String),
    /// A symbolic placeholder, bound at evaluation time.
    Placeholder(String),
    /// A finite numeric literal.
    Numeric(f64),
    /// Sum of two sub-expressions.
    Add(Expr, Expr),
    /// Product of two sub-expressions.
    Mul(Expr, Expr),
    /// A labelled sub-Hamiltonian marker.
    SubH(Expr, String),
    /// A labelled constraint marker with a satisfaction predicate.
    Constraint(Expr, String, Predicate),
    /// Main expression plus an additively-accumulated penalty, labelled for
    /// first-write-wins deduplication.
    WithPenalty(Expr, Expr, String),
    /// Transparent pass-through wrapper for user-defined composite
    /// expressions.
    UserDefined(Expr),
}

/// A handle to an immutable, shared expression node (spec §4.B).
///
/// `Expr` is cheap to clone (an `Rc` bump) so the same sub-expression can be
/// reused across multiple Hamiltonians without copying the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr(Rc<ExprNode>);

impl Expr {
    /// Wrap a node in a fresh handle.
    fn new(node: ExprNode) -> Self {
        Expr(Rc::new(node))
    }

    /// Access the underlying node.
    #[must_use]
    pub fn node(&self) -> &ExprNode {
        &self.0
    }

    /// A binary variable.
    #[must_use]
    pub fn binary(label: impl Into<String>) -> Self {
        Self::new(ExprNode::Binary(label.into()))
    }

    /// A spin variable.
    #[must_use]
    pub fn spin(label: impl Into<String>) -> Self {
        Self::new(ExprNode::Spin(label.into()))
    }

    /// A symbolic placeholder.
    #[must_use]
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self::new(ExprNode::Placeholder(name.into()))
    }

    /// A numeric literal, folded away if it composes with another literal
    /// through `+`/`*` (constant folding is an optimization, not required
    /// for correctness — spec §4.B).
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new(ExprNode::Numeric(value))
    }

    /// Wrap `self` as a labelled sub-Hamiltonian. First-use label wins when
    /// the expander records it (spec §3 invariant 5).
    #[must_use]
    pub fn subh(&self, label: impl Into<String>) -> Self {
        Self::new(ExprNode::SubH(self.clone(), label.into()))
    }

    /// Wrap `self` as a labelled constraint with the default `== 0`
    /// predicate.
    #[must_use]
    pub fn constraint(&self, label: impl Into<String>) -> Self {
        Self::new(ExprNode::Constraint(
            self.clone(),
            label.into(),
            Predicate::EqualsZero,
        ))
    }

    /// Wrap `self` as a labelled constraint with a custom predicate.
    #[must_use]
    pub fn constraint_with(
        &self,
        label: impl Into<String>,
        predicate: impl Fn(f64) -> bool + 'static,
    ) -> Self {
        Self::new(ExprNode::Constraint(
            self.clone(),
            label.into(),
            Predicate::Custom(Rc::new(predicate)),
        ))
    }

    /// Add `penalty` into the top-level Hamiltonian at expansion time,
    /// labelled so repeated references only count once (spec §4.E,
    /// with-penalty deduplication).
    #[must_use]
    pub fn with_penalty(&self, penalty: Expr, label: impl Into<String>) -> Self {
        Self::new(ExprNode::WithPenalty(self.clone(), penalty, label.into()))
    }

    /// Mark `self` as a pass-through user-defined composite (spec §4.B).
    #[must_use]
    pub fn user_defined(&self) -> Self {
        Self::new(ExprNode::UserDefined(self.clone()))
    }

    /// Integer power, `k >= 1`.
    pub fn pow(&self, k: i64) -> IrResult<Expr> {
        if k < 1 {
            return Err(IrError::InvalidExponent { k });
        }
        let mut acc = self.clone();
        for _ in 1..k {
            acc = acc * self.clone();
        }
        Ok(acc)
    }

    /// Divide by a non-zero scalar.
    pub fn div(&self, scalar: f64) -> IrResult<Expr> {
        if scalar == 0.0 {
            return Err(IrError::DivideByZero);
        }
        Ok(self.clone() * Expr::constant(1.0 / scalar))
    }
}

impl std::ops::Add for Expr {
    type Output = Expr;
    fn add(self, rhs: Expr) -> Expr {
        // Constant folding and 0-identity are permitted optimizations, not
        // required for correctness (spec §4.B).
        match (self.node(), rhs.node()) {
            (ExprNode::Numeric(a), ExprNode::Numeric(b)) => Expr::constant(a + b),
            (ExprNode::Numeric(z), _) if *z == 0.0 => rhs,
            (_, ExprNode::Numeric(z)) if *z == 0.0 => self,
            _ => Expr::new(ExprNode::Add(self, rhs)),
        }
    }
}

impl std::ops::Sub for Expr {
    type Output = Expr;
    fn sub(self, rhs: Expr) -> Expr {
        self + (-rhs)
    }
}

impl std::ops::Mul for Expr {
    type Output = Expr;
    fn mul(self, rhs: Expr) -> Expr {
        match (self.node(), rhs.node()) {
            (ExprNode::Numeric(a), ExprNode::Numeric(b)) => Expr::constant(a * b),
            (ExprNode::Numeric(z), _) | (_, ExprNode::Numeric(z)) if *z == 0.0 => {
                Expr::constant(0.0)
            }
            (ExprNode::Numeric(one), _) if *one == 1.0 => rhs,
            (_, ExprNode::Numeric(one)) if *one == 1.0 => self,
            _ => Expr::new(ExprNode::Mul(self, rhs)),
        }
    }
}

impl std::ops::Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        match self.node() {
            ExprNode::Numeric(v) => Expr::constant(-v),
            _ => self * Expr::constant(-1.0),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            ExprNode::Binary(label) => write!(f, "{label}"),
            ExprNode::Spin(label) => write!(f, "{label}"),
            ExprNode::Placeholder(name) => write!(f, "{name}"),
            ExprNode::Numeric(value) => write!(f, "{value}"),
            ExprNode::Add(a, b) => write!(f, "({a} + {b})"),
            ExprNode::Mul(a, b) => write!(f, "({a} * {b})"),
            ExprNode::SubH(inner, label) => write!(f, "SubH({inner}, \"{label}\")"),
            ExprNode::Constraint(inner, label, _) => write!(f, "Constraint({inner}, \"{label}\")"),
            ExprNode::WithPenalty(inner, penalty, label) => {
                write!(f, "WithPenalty({inner}, {penalty}, \"{label}\")")
            }
            ExprNode::UserDefined(inner) => write!(f, "{inner}"),
        }
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::constant(value)
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Expr::constant(f64::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_folding_on_add() {
        let sum = Expr::constant(2.0) + Expr::constant(3.0);
        assert_eq!(sum.node(), &ExprNode::Numeric(5.0));
    }

    #[test]
    fn constant_folding_on_mul() {
        let prod = Expr::constant(2.0) * Expr::constant(3.0);
        assert_eq!(prod.node(), &ExprNode::Numeric(6.0));
    }

    #[test]
    fn pow_rejects_nonpositive() {
        let x = Expr::binary("x");
        assert!(matches!(x.pow(0), Err(IrError::InvalidExponent { k: 0 })));
        assert!(matches!(x.pow(-1), Err(IrError::InvalidExponent { k: -1 })));
    }

    #[test]
    fn div_rejects_zero() {
        let x = Expr::binary("x");
        assert!(matches!(x.div(0.0), Err(IrError::DivideByZero)));
    }

    #[test]
    fn structural_equality() {
        let a = Expr::binary("x") + Expr::binary("y");
        let b = Expr::binary("x") + Expr::binary("y");
        assert_eq!(a, b);
    }

    #[test]
    fn display_renders_structure() {
        let h = Expr::binary("a") + Expr::binary("b") * Expr::placeholder("M");
        assert_eq!(h.to_string(), "(a + (b * M))");
    }

    #[test]
    fn sharing_is_cheap_clone() {
        let shared = Expr::binary("x") * Expr::binary("y");
        let lhs = shared.clone() + Expr::constant(1.0);
        let rhs = shared.clone() + Expr::constant(2.0);
        assert_ne!(lhs, rhs);
    }
}
