//! Error types for the compile crate.

use thiserror::Error;

use qubo_ir::IrError;

use crate::sample::Vartype;

/// Errors that can occur while compiling a Hamiltonian or evaluating a
/// compiled model against a sample.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Propagated from the IR crate (missing placeholder, bad exponent,
    /// division by zero).
    #[error(transparent)]
    Ir(#[from] IrError),

    /// The vartype string tag was neither `"BINARY"` nor `"SPIN"`.
    #[error("unrecognized vartype '{tag}', expected BINARY or SPIN")]
    UnrecognizedVartype {
        /// The offending tag.
        tag: String,
    },

    /// A sample was missing an entry for a variable the model references.
    #[error("sample is missing variable '{label}'")]
    SampleMissingVariable {
        /// The variable's label.
        label: String,
    },

    /// A sample's entry count did not match the model's variable count.
    #[error("sample has {got} entries, expected {expected}")]
    SampleSizeMismatch {
        /// Number of variables the model references.
        expected: usize,
        /// Number of entries the sample actually had.
        got: usize,
    },

    /// A sample value was outside the domain implied by its vartype.
    #[error("sample value {value} for '{label}' is invalid for vartype {vartype}")]
    InvalidSampleValue {
        /// The variable's label.
        label: String,
        /// The offending value.
        value: f64,
        /// The vartype the sample was interpreted against.
        vartype: Vartype,
    },

    /// The quadratisation strength was not strictly positive.
    #[error("quadratisation strength must be > 0, got {value}")]
    NonPositiveStrength {
        /// The offending strength value.
        value: f64,
    },
}

/// Result type for compile-crate operations.
pub type CompileResult<T> = Result<T, CompileError>;
