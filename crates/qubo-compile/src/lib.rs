//! qubo-compile: the compile pipeline that turns a symbolic Hamiltonian
//! into a quadratic model and interprets solver samples against it.
//!
//! # Overview
//!
//! ```text
//! Expr (qubo_ir)
//!       │
//!       ▼
//! ┌───────────┐
//! │  expander  │ ── mutates sub-Hamiltonian / constraint tables
//! └───────────┘
//!       │ VariablePolynomial (any degree)
//!       ▼
//! ┌───────────┐
//! │  reducer   │ ── issues auxiliary variables, adds AND-penalties
//! └───────────┘
//!       │ VariablePolynomial (degree <= 2)
//!       ▼
//! CompiledModel ── to_qubo / to_ising / energy / decode_sample
//! ```
//!
//! # Example
//!
//! ```rust
//! use qubo_ir::{Binding, Coeff, Expr};
//! use qubo_compile::compile;
//!
//! let x = Expr::binary("x");
//! let y = Expr::binary("y");
//! let h = x.clone() + y.clone() - Expr::constant(2.0) * x * y;
//!
//! let model = compile(&h, Coeff::scalar(5.0)).unwrap();
//! let binding = Binding::new();
//! let qubo = model.to_qubo(&binding, false).unwrap();
//! assert!(qubo.entries.len() <= 3);
//! ```

pub mod compile;
pub mod decoder;
pub mod error;
pub mod expander;
pub mod model;
pub mod reducer;
pub mod sample;
pub mod tables;

pub use compile::compile;
pub use decoder::DecodedSample;
pub use error::{CompileError, CompileResult};
pub use model::{CompiledModel, Ising, Qubo, VarKey};
pub use sample::{Sample, Vartype};
pub use tables::{ConstraintRecord, SubHRecord};
