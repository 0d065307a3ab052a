//! qubo-ir: expression DAG, placeholder coefficient algebra and variable
//! polynomial for compiling symbolic Hamiltonians into QUBO/Ising models.
//!
//! # Overview
//!
//! This crate provides the data model half of the compilation pipeline; the
//! expansion, order reduction, and sampling side live in `qubo-compile`.
//!
//! # Core Components
//!
//! - **Variables**: [`VariableId`], [`VariableEncoder`] for the label-to-index
//!   bijection
//! - **Expressions**: [`Expr`] for the symbolic Hamiltonian DAG, built with
//!   `Expr::binary`/`Expr::spin`/`Expr::placeholder` and operator overloads
//! - **Placeholder algebra**: [`Monomial`], [`Coeff`], [`Binding`] for
//!   symbolic coefficients bound to concrete values at evaluation time
//! - **Expanded form**: [`Product`], [`VariablePolynomial`] for the
//!   variable-indexed polynomial produced by expansion
//!
//! # Example
//!
//! ```rust
//! use qubo_ir::Expr;
//!
//! let x = Expr::binary("x");
//! let y = Expr::binary("y");
//! let a = Expr::placeholder("a");
//! let h = (x.clone() - y.clone()).pow(2).unwrap() * a;
//! ```

pub mod coeff;
pub mod encoder;
pub mod error;
pub mod expr;
pub mod monomial;
pub mod product;
pub mod varpoly;

pub use coeff::{Binding, Coeff};
pub use encoder::{VariableEncoder, VariableId};
pub use error::{IrError, IrResult};
pub use expr::{Expr, ExprNode, Predicate};
pub use monomial::Monomial;
pub use product::Product;
pub use varpoly::VariablePolynomial;
