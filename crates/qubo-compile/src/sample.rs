//! Samples: an assignment of variables to domain values, and the vartype
//! tag that says which domain (spec §4.H, §6).

use std::collections::HashMap;
use std::fmt;

use crate::error::{CompileError, CompileResult};

/// A solver sample: variable label to assigned value (`0`/`1` for
/// [`Vartype::Binary`], `-1`/`+1` for [`Vartype::Spin`]).
pub type Sample = HashMap<String, f64>;

/// Which domain a sample's values are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vartype {
    /// `x in {0, 1}`.
    Binary,
    /// `s in {-1, +1}`.
    Spin,
}

impl Vartype {
    /// Parse the external string tag (`"BINARY"` / `"SPIN"`).
    pub fn parse(tag: &str) -> CompileResult<Self> {
        match tag {
            "BINARY" => Ok(Vartype::Binary),
            "SPIN" => Ok(Vartype::Spin),
            other => Err(CompileError::UnrecognizedVartype {
                tag: other.to_string(),
            }),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Vartype::Binary => "BINARY",
            Vartype::Spin => "SPIN",
        }
    }

    /// Map one value in this vartype's domain to its binary (`0.0`/`1.0`)
    /// equivalent, failing if the value is outside the domain.
    fn to_binary(self, label: &str, value: f64) -> CompileResult<f64> {
        match self {
            Vartype::Binary if value == 0.0 || value == 1.0 => Ok(value),
            Vartype::Spin if value == -1.0 || value == 1.0 => Ok((value + 1.0) / 2.0),
            _ => Err(CompileError::InvalidSampleValue {
                label: label.to_string(),
                value,
                vartype: self,
            }),
        }
    }
}

impl fmt::Display for Vartype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Normalise a sample to binary `{0.0, 1.0}` values for every label the
/// model references (spec §4.H step 1), failing if a referenced label is
/// absent or its value is outside the vartype's domain.
pub fn normalize_sample(
    sample: &Sample,
    vartype: Vartype,
    labels: &[String],
) -> CompileResult<HashMap<String, f64>> {
    let mut binary = HashMap::with_capacity(labels.len());
    for label in labels {
        let value = sample
            .get(label)
            .ok_or_else(|| CompileError::SampleMissingVariable {
                label: label.clone(),
            })?;
        binary.insert(label.clone(), vartype.to_binary(label, *value)?);
    }
    // Every model label is present (checked above); any size difference
    // now means the sample carries entries the model doesn't reference.
    if sample.len() != labels.len() {
        return Err(CompileError::SampleSizeMismatch {
            expected: labels.len(),
            got: sample.len(),
        });
    }
    Ok(binary)
}
