//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur while building or evaluating the IR (expression
/// DAG, placeholder coefficients, variable polynomials).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A coefficient referenced a placeholder absent from the binding.
    ///
    /// This is not locally recoverable; it surfaces to the caller of
    /// whichever evaluation entry point (`to_qubo`, `to_ising`, `energy`,
    /// `decode_sample`) triggered it.
    #[error("placeholder '{name}' is missing from the binding")]
    MissingPlaceholder {
        /// The placeholder name that could not be resolved.
        name: String,
    },

    /// `pow` was called with a non-positive exponent.
    #[error("pow requires an exponent >= 1, got {k}")]
    InvalidExponent {
        /// The offending exponent.
        k: i64,
    },

    /// `div` was called with a zero scalar divisor.
    #[error("division by zero")]
    DivideByZero,
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
